//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure for the checkout API.
//! The wire format is camelCase to match the storefront client; field-level
//! defaults let value validation happen in the domain, where it produces a
//! proper 400 instead of a deserializer rejection.

use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartItem, ItemOption};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a hosted checkout session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    /// Buyer email, prefilled at the provider's checkout page.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Cart contents.
    #[serde(default)]
    pub items: Vec<CartItemDto>,

    /// Checkout page locale, provider-defined codes.
    #[serde(default)]
    pub locale: Option<String>,
}

/// One cart line as sent by the storefront.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub base_sku: Option<String>,

    #[serde(default)]
    pub part_number: String,

    #[serde(default)]
    pub qty: i64,

    #[serde(default)]
    pub options: Vec<ItemOptionDto>,

    #[serde(default)]
    pub unit_price_cents: i64,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub notes: Option<String>,
}

/// One configured option on a cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemOptionDto {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub value: String,
}

/// Query string for the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<CartItemDto> for CartItem {
    fn from(dto: CartItemDto) -> Self {
        Self {
            product_name: dto.product_name,
            base_sku: dto.base_sku,
            part_number: dto.part_number,
            qty: dto.qty,
            options: dto.options.into_iter().map(Into::into).collect(),
            unit_price_cents: dto.unit_price_cents,
            currency: dto.currency,
            notes: dto.notes,
        }
    }
}

impl From<ItemOptionDto> for ItemOption {
    fn from(dto: ItemOptionDto) -> Self {
        Self {
            code: dto.code,
            value: dto.value,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a freshly opened checkout session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionResponse {
    /// Hosted checkout URL to redirect the buyer to.
    pub url: String,

    /// Provider session id, used later for status queries.
    pub session_id: String,
}

/// Response for a status query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStatusResponse {
    pub paid: bool,
    pub session_id: String,
    pub payment_intent: Option<String>,
}

/// Error body for every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
