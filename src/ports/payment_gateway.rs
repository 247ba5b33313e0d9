//! Payment gateway port.
//!
//! Boundary contract for the hosted checkout provider. Implementations
//! talk to the provider's REST API directly; callers only see these
//! types.

use async_trait::async_trait;

/// Hosted checkout provider operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// Returns the session id and the URL the buyer is redirected to.
    async fn create_checkout_session(
        &self,
        spec: CheckoutSessionSpec,
    ) -> Result<CreatedSession, GatewayError>;

    /// Fetch the current state of a checkout session.
    async fn get_checkout_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError>;
}

/// Everything needed to create a checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionSpec {
    /// Provider payment mode, e.g. `payment` for a one-time charge.
    pub mode: String,

    /// Buyer email to prefill at checkout.
    pub customer_email: Option<String>,

    /// Checkout page locale, provider-defined codes.
    pub locale: Option<String>,

    /// Redirect target after successful payment.
    pub success_url: String,

    /// Redirect target when the buyer abandons checkout.
    pub cancel_url: String,

    /// One entry per cart line.
    pub line_items: Vec<SessionLineItem>,

    /// Compact cart token to attach as opaque session metadata.
    pub cart_token: String,
}

/// One provider-facing line item.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLineItem {
    /// Product display name.
    pub name: String,

    /// Human-readable configuration summary.
    pub description: Option<String>,

    /// Unit price in minor units.
    pub unit_amount_cents: i64,

    /// Uppercase 3-letter currency code.
    pub currency: String,

    /// Quantity ordered.
    pub quantity: i64,
}

/// A freshly created checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedSession {
    /// Provider session id (cs_...).
    pub id: String,

    /// Hosted checkout URL for the buyer.
    pub url: String,
}

/// Point-in-time state of a checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    /// Provider session id.
    pub id: String,

    /// Provider payment status ("paid", "unpaid", ...).
    pub payment_status: String,

    /// Payment intent id once a payment exists.
    pub payment_intent: Option<String>,
}

impl SessionStatus {
    /// Whether the session has been paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// Error from a payment gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayError {
    /// Machine-readable error category.
    pub code: GatewayErrorCode,

    /// Human-readable description, safe for logs (not for callers).
    pub message: String,

    /// Whether retrying the same call could succeed.
    pub retryable: bool,
}

/// Categories of gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// Transport-level failure reaching the provider.
    Network,

    /// The provider rejected the request.
    Provider,

    /// The provider answered with an unexpected shape.
    InvalidResponse,

    /// The referenced session does not exist.
    NotFound,
}

impl GatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            code: GatewayErrorCode::Network,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            code: GatewayErrorCode::Provider,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            code: GatewayErrorCode::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(session_id: &str) -> Self {
        Self {
            code: GatewayErrorCode::NotFound,
            message: format!("Checkout session not found: {}", session_id),
            retryable: false,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}
