//! Checkout flow errors.

use thiserror::Error;

use crate::domain::cart::CartError;
use crate::ports::GatewayError;

/// Failures surfaced by the checkout handlers.
///
/// The first three are caller mistakes and carry messages safe to show;
/// `Gateway` wraps downstream detail that belongs in logs, not
/// responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Cart contents failed validation.
    #[error("{0}")]
    Validation(#[from] CartError),

    /// Buyer email is missing or not plausibly an address.
    #[error("A valid customer email is required")]
    InvalidEmail,

    /// Status query without a session id.
    #[error("The session_id query parameter is required")]
    MissingSessionId,

    /// Payment provider call failed.
    #[error("Payment provider request failed")]
    Gateway(#[from] GatewayError),
}
