//! Payment provider adapter (Stripe-compatible API).
//!
//! Implements the `PaymentGateway` port with direct wire calls:
//! - Checkout session creation (form-encoded POST)
//! - Checkout session retrieval
//! - Bracket-notation form encoding for nested payloads
//!
//! # Security
//!
//! - The API secret key is handled via `secrecy::SecretString`
//! - Webhook signature verification lives in `domain::webhook`; this
//!   adapter only speaks the request/response wire format

pub mod form;
mod gateway;
mod mock;

pub use gateway::{StripeGateway, StripeGatewayConfig};
pub use mock::MockPaymentGateway;
