//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::checkout::{
    CheckoutError, CheckoutStatusQuery, CreateCheckoutCommand, CreateCheckoutHandler,
    GetCheckoutStatusHandler,
};
use crate::application::handlers::webhook::{
    OrderProjector, ProcessWebhookCommand, ProcessWebhookHandler, WebhookError,
};
use crate::config::SiteConfig;
use crate::domain::webhook::WebhookVerifier;
use crate::ports::{Backoffice, GatewayErrorCode, PaymentGateway};

use super::dto::{
    CheckoutStatusResponse, CreateCheckoutSessionRequest, CreateCheckoutSessionResponse,
    ErrorResponse, StatusQuery,
};

/// Signature header sent by the provider. Header lookup is
/// case-insensitive, so `Stripe-Signature` variants match too.
const SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub backoffice: Arc<dyn Backoffice>,
    pub webhook_verifier: WebhookVerifier,
    pub site: SiteConfig,
}

impl CheckoutAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.payment_gateway.clone(), self.site.clone())
    }

    pub fn checkout_status_handler(&self) -> GetCheckoutStatusHandler {
        GetCheckoutStatusHandler::new(self.payment_gateway.clone())
    }

    pub fn webhook_handler(&self) -> ProcessWebhookHandler {
        ProcessWebhookHandler::new(
            self.webhook_verifier.clone(),
            OrderProjector::new(self.backoffice.clone()),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout/session - Open a hosted checkout session
pub async fn create_checkout_session(
    State(state): State<CheckoutAppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        customer_email: request.customer_email,
        items: request.items.into_iter().map(Into::into).collect(),
        locale: request.locale,
    };

    let created = handler.handle(cmd).await?;

    Ok(Json(CreateCheckoutSessionResponse {
        url: created.url,
        session_id: created.session_id,
    }))
}

/// GET /api/checkout/status?session_id=... - Query a session's payment state
pub async fn checkout_session_status(
    State(state): State<CheckoutAppState>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let handler = state.checkout_status_handler();
    let status = handler
        .handle(CheckoutStatusQuery {
            session_id: query.session_id,
        })
        .await?;

    Ok(Json(CheckoutStatusResponse {
        paid: status.paid,
        session_id: status.session_id,
        payment_intent: status.payment_intent,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook Handler
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks/stripe - Receive provider webhook deliveries
///
/// Responds 200 `ok` to every authenticated, parsable delivery, even
/// when projection fails downstream; anything else would make the
/// provider retry against an order store with no dedup key. Signature
/// and parse failures get a 400.
pub async fn payment_webhook(
    State(state): State<CheckoutAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match handler.handle(cmd).await {
        Ok(_outcome) => (StatusCode::OK, "ok"),
        Err(WebhookError::InvalidSignature) => (StatusCode::BAD_REQUEST, "invalid signature"),
        Err(WebhookError::MalformedPayload) => (StatusCode::BAD_REQUEST, "invalid payload"),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.0 {
            CheckoutError::Validation(_)
            | CheckoutError::InvalidEmail
            | CheckoutError::MissingSessionId => (StatusCode::BAD_REQUEST, self.0.to_string()),

            CheckoutError::Gateway(error) if error.code == GatewayErrorCode::NotFound => {
                (StatusCode::NOT_FOUND, "Checkout session not found".to_string())
            }

            // Provider detail goes to the logs, not to the caller.
            CheckoutError::Gateway(error) => {
                tracing::error!(
                    code = ?error.code,
                    retryable = error.retryable,
                    error = %error.message,
                    "payment gateway call failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Payment provider request failed".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
