//! GetCheckoutStatusHandler - Query handler for a session's payment state.

use std::sync::Arc;

use crate::ports::PaymentGateway;

use super::error::CheckoutError;

/// Query for the payment state of one checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutStatusQuery {
    pub session_id: Option<String>,
}

/// Point-in-time payment state, as reported by the provider.
#[derive(Debug, Clone)]
pub struct CheckoutStatus {
    pub session_id: String,
    pub paid: bool,
    pub payment_intent: Option<String>,
}

/// Handler for checkout status queries.
pub struct GetCheckoutStatusHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl GetCheckoutStatusHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: CheckoutStatusQuery) -> Result<CheckoutStatus, CheckoutError> {
        let session_id = query.session_id.as_deref().map(str::trim).unwrap_or_default();
        if session_id.is_empty() {
            return Err(CheckoutError::MissingSessionId);
        }

        let status = self.gateway.get_checkout_session(session_id).await?;

        Ok(CheckoutStatus {
            paid: status.is_paid(),
            session_id: status.id,
            payment_intent: status.payment_intent,
        })
    }
}
