//! Axum router configuration for checkout endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    checkout_session_status, create_checkout_session, payment_webhook, CheckoutAppState,
};

/// Create the checkout API router.
///
/// # Routes
/// - `POST /session` - Open a hosted checkout session
/// - `GET /status` - Query a session's payment state
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/session", post(create_checkout_session))
        .route("/status", get(checkout_session_status))
}

/// Create the webhook router.
///
/// Separate from the checkout routes because webhook calls carry no
/// user context; they are authenticated by signature instead.
///
/// # Routes
/// - `POST /stripe` - Receive provider webhook deliveries
pub fn webhook_routes() -> Router<CheckoutAppState> {
    Router::new().route("/stripe", post(payment_webhook))
}

/// Create the complete checkout module router.
///
/// Combines checkout routes and webhook routes into a single router
/// suitable for mounting at `/api`.
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .nest("/checkout", checkout_routes())
        .nest("/webhooks", webhook_routes())
}
