//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod checkout;
pub mod webhook;

pub use checkout::{
    CheckoutError, CheckoutStatus, CheckoutStatusQuery, CreateCheckoutCommand,
    CreateCheckoutHandler, CreatedCheckout, GetCheckoutStatusHandler,
};
pub use webhook::{
    OrderProjector, ProcessWebhookCommand, ProcessWebhookHandler, ProjectionOutcome, WebhookError,
    WebhookOutcome,
};
