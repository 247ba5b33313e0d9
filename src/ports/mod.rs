//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentGateway` - Hosted checkout session creation and retrieval
//!
//! ## Back-office Ports
//!
//! - `Backoffice` - Customer directory and order creation in the
//!   downstream store

mod backoffice;
mod payment_gateway;

pub use backoffice::{
    Backoffice, BackofficeError, CreatedOrder, CustomerRecord, NewOrder, OrderLineItem,
    OrderProperty,
};
pub use payment_gateway::{
    CheckoutSessionSpec, CreatedSession, GatewayError, GatewayErrorCode, PaymentGateway,
    SessionLineItem, SessionStatus,
};
