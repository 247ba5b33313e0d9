//! Cartbridge - Storefront Checkout Bridge
//!
//! This crate connects a configurable-product storefront to a hosted
//! payment provider and a back-office commerce store: it opens checkout
//! sessions carrying a compact cart token, verifies the provider's
//! webhook signatures, and projects completed payments into back-office
//! orders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
