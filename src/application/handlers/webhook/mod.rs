//! Webhook delivery handlers.

mod process_event;
mod project_order;

pub use process_event::{
    ProcessWebhookCommand, ProcessWebhookHandler, WebhookError, WebhookOutcome,
};
pub use project_order::{OrderProjector, ProjectionOutcome};
