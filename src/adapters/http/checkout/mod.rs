//! HTTP adapter for checkout endpoints.
//!
//! Exposes the checkout flow via REST API:
//! - `POST /api/checkout/session` - Open a hosted checkout session
//! - `GET /api/checkout/status?session_id=...` - Query a session's payment state
//! - `POST /api/webhooks/stripe` - Receive provider webhook deliveries

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CheckoutAppState;
pub use routes::checkout_router;
