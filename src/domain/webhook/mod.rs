//! Webhook domain module.
//!
//! Authentication and typing of provider-initiated webhook deliveries.
//!
//! # Module Structure
//!
//! - `verifier` - Timestamped HMAC signature verification
//! - `event` - Event envelope and checkout session payload types

mod event;
mod verifier;

pub use event::{CheckoutSession, EventData, WebhookEvent, CHECKOUT_COMPLETED};
pub use verifier::{SignatureHeader, WebhookVerifier};
