//! ProcessWebhookHandler - Authenticates and dispatches provider webhook deliveries.

use thiserror::Error;

use crate::domain::webhook::{WebhookEvent, WebhookVerifier};

use super::project_order::{OrderProjector, ProjectionOutcome};

/// Command carrying one raw webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Request body exactly as received; the signature covers these
    /// bytes, so no re-encoding before verification.
    pub payload: Vec<u8>,

    /// Value of the signature header, when the caller sent one.
    pub signature: Option<String>,
}

/// Caller-visible webhook failures.
///
/// Only authentication and parse failures surface; everything past that
/// point is absorbed into [`WebhookOutcome`] so the provider never sees
/// an error it would retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    #[error("Webhook payload is not valid JSON")]
    MalformedPayload,
}

/// What happened to an accepted delivery.
///
/// Accepted and processed are distinct states: the provider only learns
/// that the event was accepted. Whether projection actually produced an
/// order is recorded here and in the logs, never signalled upstream,
/// because a retry against an order store with no dedup key would mint
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Completed checkout projected into a back-office order.
    Processed { order_id: i64 },

    /// Accepted, but no order came out of it.
    AcceptedNotProcessed { reason: &'static str },

    /// Event type this service does not handle.
    Ignored { event_type: String },
}

/// Handler for inbound webhook deliveries.
pub struct ProcessWebhookHandler {
    verifier: WebhookVerifier,
    projector: OrderProjector,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: WebhookVerifier, projector: OrderProjector) -> Self {
        Self { verifier, projector }
    }

    pub async fn handle(&self, cmd: ProcessWebhookCommand) -> Result<WebhookOutcome, WebhookError> {
        // 1. Authenticate before touching the payload.
        if !self.verifier.verify(&cmd.payload, cmd.signature.as_deref()) {
            tracing::warn!("webhook rejected: signature verification failed");
            return Err(WebhookError::InvalidSignature);
        }

        // 2. Parse the event envelope.
        let event: WebhookEvent = serde_json::from_slice(&cmd.payload).map_err(|error| {
            tracing::warn!(error = %error, "webhook rejected: payload is not valid JSON");
            WebhookError::MalformedPayload
        })?;

        // 3. Dispatch on event type.
        if !event.is_checkout_completed() {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "ignoring webhook event type"
            );
            return Ok(WebhookOutcome::Ignored {
                event_type: event.event_type,
            });
        }

        // 4. Project. From here on every failure is acknowledged.
        let Some(session) = event.checkout_session() else {
            tracing::error!(
                event_id = %event.id,
                "completed event carries no parsable session object"
            );
            return Ok(WebhookOutcome::AcceptedNotProcessed {
                reason: "session object unparsable",
            });
        };

        let outcome = match self.projector.project(&session).await {
            ProjectionOutcome::OrderCreated { order_id } => WebhookOutcome::Processed { order_id },
            ProjectionOutcome::NoCartItems => WebhookOutcome::AcceptedNotProcessed {
                reason: "no cart items in session metadata",
            },
            ProjectionOutcome::Failed => WebhookOutcome::AcceptedNotProcessed {
                reason: "order projection failed",
            },
        };
        Ok(outcome)
    }
}
