//! Back-office store adapter (Shopify-compatible admin API)
//!
//! Implements the [`Backoffice`](crate::ports::Backoffice) port against
//! the store's admin REST API: customer search and create plus order
//! create, each wrapped in the API's envelope types.
//!
//! ## Security
//!
//! The admin access token travels in the `X-Shopify-Access-Token`
//! header on every request and is held as a [`secrecy::SecretString`]
//! so it never appears in debug output.

mod client;
mod mock;
mod types;

pub use client::{ShopifyBackoffice, ShopifyConfig};
pub use mock::MockBackoffice;
