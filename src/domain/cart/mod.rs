//! Cart domain module.
//!
//! Configured product lines, the cart aggregate, and the compact codec
//! that carries a cart through the payment provider's metadata channel.
//!
//! # Module Structure
//!
//! - `item` - Cart lines, configuration identity, validation
//! - `compact` - Size-bounded cart token encode/decode

mod compact;
mod item;

pub use compact::{CompactCart, CompactItem, CART_METADATA_KEY, MAX_TOKEN_CHARS, OPTIONS_MAX_CHARS};
pub use item::{Cart, CartError, CartItem, ItemOption, DESCRIPTION_MAX_CHARS};
