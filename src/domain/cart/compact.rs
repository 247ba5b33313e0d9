//! Compact cart codec.
//!
//! The payment provider's metadata channel is a flat string slot with a
//! hard length ceiling, round-tripped verbatim to webhook events. The
//! compact cart is a lossy, size-bounded projection of the cart that fits
//! that slot: short field names, options flattened to one string, notes
//! and base SKU dropped.
//!
//! Degradation is graceful on both sides. Encoding past the ceiling
//! truncates to a fixed prefix plus an ellipsis marker, which may no
//! longer be valid JSON; decoding treats that as data loss and yields
//! nothing rather than failing the caller.

use serde::{Deserialize, Serialize};

use super::item::{truncate_chars, Cart, CartItem, ItemOption};

/// Metadata key under which the encoded cart is attached to a session.
pub const CART_METADATA_KEY: &str = "cart";

/// Provider-imposed ceiling for the metadata value, in characters.
pub const MAX_TOKEN_CHARS: usize = 4500;

/// Characters kept when the encoded token exceeds the ceiling.
const TRUNCATED_PREFIX_CHARS: usize = 4490;

/// Marker appended to a truncated token.
const TRUNCATION_SUFFIX: &str = "...";

/// Character cap for one item's flattened options string.
pub const OPTIONS_MAX_CHARS: usize = 200;

/// Size-bounded projection of a cart, carried through the provider's
/// opaque metadata channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactCart {
    /// Buyer email captured at checkout, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Compacted line items.
    #[serde(default)]
    pub items: Vec<CompactItem>,
}

/// One compacted cart line. Field names are single letters to stretch the
/// metadata budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactItem {
    /// Part number.
    pub pn: String,

    /// Quantity.
    pub q: i64,

    /// Unit price in cents, exactly as used to create the session.
    pub up: i64,

    /// Uppercase 3-letter currency code.
    pub c: String,

    /// Options flattened to `code:value` pairs joined by `|`, capped at
    /// [`OPTIONS_MAX_CHARS`] characters. Absent when the item has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o: Option<String>,

    /// Product display name, kept for order line titles downstream.
    pub n: String,
}

impl CompactCart {
    /// Project a cart into its compact form.
    pub fn from_cart(cart: &Cart, email: Option<&str>) -> Self {
        Self {
            email: email.map(str::to_string),
            items: cart.items().iter().map(CompactItem::from_cart_item).collect(),
        }
    }

    /// Serialize to the metadata token.
    ///
    /// Output never exceeds [`MAX_TOKEN_CHARS`] characters: an oversized
    /// serialization is cut to its first 4490 characters with `...`
    /// appended. The truncated form is intentionally allowed to be
    /// invalid JSON.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        if json.chars().count() > MAX_TOKEN_CHARS {
            let mut truncated: String = json.chars().take(TRUNCATED_PREFIX_CHARS).collect();
            truncated.push_str(TRUNCATION_SUFFIX);
            truncated
        } else {
            json
        }
    }

    /// Parse a metadata token back into a compact cart.
    ///
    /// Returns `None` when the token does not parse as a compact cart
    /// object, including the truncated-encoding case. Never panics.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl CompactItem {
    fn from_cart_item(item: &CartItem) -> Self {
        let flattened = item
            .options
            .iter()
            .map(|o| format!("{}:{}", o.code, o.value))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            pn: item.part_number.clone(),
            q: item.qty,
            up: item.unit_price_cents,
            c: item.currency.clone(),
            o: if flattened.is_empty() {
                None
            } else {
                Some(truncate_chars(&flattened, OPTIONS_MAX_CHARS))
            },
            n: item.product_name.clone(),
        }
    }

    /// Re-expand the flattened options string.
    ///
    /// Splits on `|`, then each pair on its first `:`. Pairs missing
    /// either half (including fragments left by truncation) are dropped
    /// silently.
    pub fn options(&self) -> Vec<ItemOption> {
        let Some(raw) = &self.o else {
            return Vec::new();
        };
        raw.split('|')
            .filter_map(|pair| {
                let (code, value) = pair.split_once(':')?;
                if code.is_empty() || value.is_empty() {
                    return None;
                }
                Some(ItemOption {
                    code: code.to_string(),
                    value: value.to_string(),
                })
            })
            .collect()
    }
}
