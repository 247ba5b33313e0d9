//! Checkout session handlers.

mod create_session;
mod error;
mod get_status;

pub use create_session::{CreateCheckoutCommand, CreateCheckoutHandler, CreatedCheckout};
pub use error::CheckoutError;
pub use get_status::{CheckoutStatus, CheckoutStatusQuery, GetCheckoutStatusHandler};
