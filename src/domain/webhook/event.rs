//! Webhook event types.
//!
//! These mirror the provider's delivery payloads as they arrive on the
//! wire: an event envelope with an arbitrary `data.object`, and the
//! checkout session object carried by completion events. Parsing is
//! tolerant of extra fields so provider-side additions do not break
//! deliveries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::cart::CART_METADATA_KEY;

/// Event type announcing a completed checkout session.
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Webhook event envelope as delivered by the provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g. "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event payload containing the affected object.
    pub data: EventData,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventData {
    /// The object affected by this event, shape depends on event type.
    pub object: serde_json::Value,
}

impl WebhookEvent {
    /// Whether this event announces a completed checkout session.
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == CHECKOUT_COMPLETED
    }

    /// Parse `data.object` as a checkout session, if it is one.
    pub fn checkout_session(&self) -> Option<CheckoutSession> {
        serde_json::from_value(self.data.object.clone()).ok()
    }
}

/// Checkout session object carried by completion events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Session payment status ("paid", "unpaid", "no_payment_required").
    #[serde(default)]
    pub payment_status: String,

    /// Email the buyer entered during checkout.
    pub customer_email: Option<String>,

    /// Provider-side customer id, when one was attached.
    pub customer: Option<String>,

    /// Payment intent id for the completed payment.
    pub payment_intent: Option<String>,

    /// Opaque metadata attached at session creation.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// The compact cart token attached at session creation, if present.
    pub fn cart_token(&self) -> Option<&str> {
        self.metadata.get(CART_METADATA_KEY).map(String::as_str)
    }

    /// Whether the session has been paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_checkout_completed_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "livemode": false,
            "data": {
                "object": {
                    "id": "cs_test_abc123",
                    "object": "checkout.session",
                    "customer": "cus_test_xyz",
                    "customer_email": "buyer@example.com",
                    "payment_intent": "pi_test_789",
                    "payment_status": "paid",
                    "status": "complete",
                    "metadata": {
                        "cart": "{\"items\":[]}"
                    }
                }
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "evt_1234567890");
        assert!(event.is_checkout_completed());

        let session = event.checkout_session().unwrap();
        assert_eq!(session.id, "cs_test_abc123");
        assert_eq!(session.customer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(session.payment_intent.as_deref(), Some("pi_test_789"));
        assert!(session.is_paid());
        assert_eq!(session.cart_token(), Some("{\"items\":[]}"));
    }

    #[test]
    fn other_event_types_are_not_completed() {
        let json = r#"{
            "id": "evt_other",
            "type": "payment_intent.created",
            "data": { "object": {} }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert!(!event.is_checkout_completed());
    }

    #[test]
    fn session_without_metadata_has_no_cart_token() {
        let json = r#"{
            "id": "evt_bare",
            "type": "checkout.session.completed",
            "data": {
                "object": { "id": "cs_bare", "payment_status": "paid" }
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        let session = event.checkout_session().unwrap();
        assert_eq!(session.cart_token(), None);
        assert_eq!(session.customer_email, None);
    }

    #[test]
    fn non_session_object_does_not_parse_as_session() {
        let json = r#"{
            "id": "evt_weird",
            "type": "checkout.session.completed",
            "data": { "object": "not an object" }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert!(event.checkout_session().is_none());
    }

    #[test]
    fn envelope_missing_type_fails_to_parse() {
        let json = r#"{ "id": "evt_x", "data": { "object": {} } }"#;
        assert!(serde_json::from_str::<WebhookEvent>(json).is_err());
    }
}
