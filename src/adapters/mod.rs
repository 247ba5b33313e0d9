//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Inbound REST API (checkout endpoints, webhook receiver)
//! - `stripe` - Payment provider client (hosted checkout sessions)
//! - `shopify` - Back-office store client (customers, orders)

pub mod http;
pub mod shopify;
pub mod stripe;
