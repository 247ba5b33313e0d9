//! Back-office commerce port.
//!
//! Boundary contract for the downstream store where customers and
//! fulfillable orders live. Order projection drives these three calls in
//! sequence: customer search, optional customer create, order create.

use async_trait::async_trait;
use thiserror::Error;

/// Back-office store operations.
#[async_trait]
pub trait Backoffice: Send + Sync {
    /// Look up a customer record by email.
    ///
    /// `Ok(None)` means the directory was searched and no record exists;
    /// errors mean the search itself failed.
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CustomerRecord>, BackofficeError>;

    /// Create a customer record with just an email.
    async fn create_customer(&self, email: &str) -> Result<CustomerRecord, BackofficeError>;

    /// Create an order.
    async fn create_order(&self, order: NewOrder) -> Result<CreatedOrder, BackofficeError>;
}

/// A customer record in the back-office directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    /// Back-office customer id.
    pub id: i64,

    /// Customer email.
    pub email: String,
}

/// An order to create in the back-office.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Existing customer to attach, when one was resolved.
    pub customer_id: Option<i64>,

    /// Buyer email on the order.
    pub email: String,

    /// Payment state, `paid` for orders projected from completed
    /// checkouts.
    pub financial_status: String,

    /// Order lines.
    pub line_items: Vec<OrderLineItem>,

    /// Free-text note for back-office staff.
    pub note: String,

    /// Structured reconciliation fields mirrored from the note.
    pub note_attributes: Vec<OrderProperty>,
}

/// One order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    /// Line title shown in the back-office.
    pub title: String,

    /// Quantity ordered.
    pub quantity: i64,

    /// Unit price as a decimal string with two fraction digits.
    pub price: String,

    /// Custom properties carried on the line.
    pub properties: Vec<OrderProperty>,
}

/// A name/value property on a line item or order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderProperty {
    pub name: String,
    pub value: String,
}

impl OrderProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A created back-office order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    /// Back-office order id.
    pub id: i64,

    /// Display name, e.g. `#1001`, when the store assigns one.
    pub name: Option<String>,
}

/// Error from a back-office call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackofficeError {
    #[error("Back-office request failed: {0}")]
    Network(String),

    #[error("Back-office API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected back-office response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait stays object-safe; the projector holds `Arc<dyn Backoffice>`.
    fn _accepts_dyn(_backoffice: &dyn Backoffice) {}

    #[test]
    fn order_property_constructor() {
        let property = OrderProperty::new("part_number", "PN-1");
        assert_eq!(property.name, "part_number");
        assert_eq!(property.value, "PN-1");
    }

    #[test]
    fn api_error_display_carries_status() {
        let error = BackofficeError::Api {
            status: 422,
            message: "line_items required".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("line_items required"));
    }
}
