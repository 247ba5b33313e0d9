//! Back-office wire types.
//!
//! Request and response shapes for the store's admin REST API. The API
//! wraps every resource in a singular or plural envelope key
//! (`{"customer": ...}`, `{"orders": [...]}`), mirrored here so serde
//! produces the exact documented bodies.

use serde::{Deserialize, Serialize};

use crate::ports::{NewOrder, OrderLineItem, OrderProperty};

// ════════════════════════════════════════════════════════════════════════════════
// Request Payloads
// ════════════════════════════════════════════════════════════════════════════════

/// Body for `POST /customers.json`.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerPayload {
    pub customer: CustomerBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerBody {
    pub email: String,
}

impl CustomerPayload {
    pub fn with_email(email: &str) -> Self {
        Self {
            customer: CustomerBody {
                email: email.to_string(),
            },
        }
    }
}

/// Body for `POST /orders.json`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub order: OrderBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderBody {
    /// Existing customer reference; omitted entirely when unresolved so
    /// the store does not try to attach customer id 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,

    pub email: String,
    pub financial_status: String,
    pub line_items: Vec<LineItemPayload>,
    pub note: String,
    pub note_attributes: Vec<PropertyPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRef {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemPayload {
    pub title: String,
    pub quantity: i64,
    pub price: String,
    pub properties: Vec<PropertyPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyPayload {
    pub name: String,
    pub value: String,
}

impl From<NewOrder> for OrderPayload {
    fn from(order: NewOrder) -> Self {
        Self {
            order: OrderBody {
                customer: order.customer_id.map(|id| CustomerRef { id }),
                email: order.email,
                financial_status: order.financial_status,
                line_items: order.line_items.into_iter().map(Into::into).collect(),
                note: order.note,
                note_attributes: order.note_attributes.into_iter().map(Into::into).collect(),
            },
        }
    }
}

impl From<OrderLineItem> for LineItemPayload {
    fn from(item: OrderLineItem) -> Self {
        Self {
            title: item.title,
            quantity: item.quantity,
            price: item.price,
            properties: item.properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderProperty> for PropertyPayload {
    fn from(property: OrderProperty) -> Self {
        Self {
            name: property.name,
            value: property.value,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response Payloads
// ════════════════════════════════════════════════════════════════════════════════

/// Response of `GET /customers/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomersEnvelope {
    #[serde(default)]
    pub customers: Vec<ShopifyCustomer>,
}

/// Response of `POST /customers.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerEnvelope {
    pub customer: ShopifyCustomer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyCustomer {
    pub id: i64,
    pub email: Option<String>,
}

/// Response of `POST /orders.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEnvelope {
    pub order: ShopifyOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrder {
    pub id: i64,
    pub name: Option<String>,
}
