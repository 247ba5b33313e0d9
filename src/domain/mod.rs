//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `cart` - Configured cart lines and the compact metadata codec
//! - `webhook` - Webhook signature verification and event payload types

pub mod cart;
pub mod webhook;
