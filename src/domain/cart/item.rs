//! Cart line items and the cart aggregate.
//!
//! A cart line is a configured product: part number plus the option
//! selections and free-text notes chosen by the buyer. Two lines with the
//! same configuration are one line with an accumulated quantity.
//!
//! # Design Decisions
//!
//! - **Money in cents**: unit prices are i64 minor units (never floats)
//! - **Configuration identity**: part number + notes + options, in the
//!   order the buyer picked them; reordering options makes a new line
//! - **Validation before merge**: every incoming line is validated on its
//!   own, then folded into the cart

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character cap for provider-facing line item descriptions.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A single option selection on a configured product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOption {
    /// Option code, e.g. `finish`.
    pub code: String,

    /// Selected value, e.g. `matte-black`.
    pub value: String,
}

/// One configured line in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Display name of the product.
    pub product_name: String,

    /// Catalog SKU of the unconfigured base product, when known.
    pub base_sku: Option<String>,

    /// Part number identifying the configured product.
    pub part_number: String,

    /// Quantity ordered. Must be at least 1.
    pub qty: i64,

    /// Option selections in the order the buyer made them.
    pub options: Vec<ItemOption>,

    /// Unit price in minor units (cents). Must be positive.
    pub unit_price_cents: i64,

    /// ISO currency code, uppercase 3 letters.
    pub currency: String,

    /// Free-text notes from the buyer.
    pub notes: Option<String>,
}

impl CartItem {
    /// Validate a single line item.
    ///
    /// # Errors
    ///
    /// Returns `CartError` for an empty product name or part number, a
    /// quantity below 1, a non-positive unit price, or a currency that is
    /// not an uppercase 3-letter code.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.product_name.trim().is_empty() {
            return Err(CartError::MissingProductName);
        }
        if self.part_number.trim().is_empty() {
            return Err(CartError::MissingPartNumber);
        }
        if self.qty < 1 {
            return Err(CartError::InvalidQuantity);
        }
        if self.unit_price_cents < 1 {
            return Err(CartError::InvalidUnitPrice);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CartError::InvalidCurrency);
        }
        Ok(())
    }

    /// Whether `other` is the same configured product as this line.
    ///
    /// Equality is part number, notes (absent normalized to empty), and
    /// options element-wise in their original order.
    pub fn same_configuration(&self, other: &CartItem) -> bool {
        self.part_number == other.part_number
            && self.normalized_notes() == other.normalized_notes()
            && self.options == other.options
    }

    /// Human-readable description for the payment provider's line item,
    /// built from part number, options, and notes. Capped at
    /// [`DESCRIPTION_MAX_CHARS`] characters.
    pub fn description(&self) -> String {
        let mut parts = vec![self.part_number.clone()];
        if !self.options.is_empty() {
            parts.push(
                self.options
                    .iter()
                    .map(|o| format!("{}: {}", o.code, o.value))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        if let Some(notes) = &self.notes {
            if !notes.is_empty() {
                parts.push(notes.clone());
            }
        }
        truncate_chars(&parts.join(" | "), DESCRIPTION_MAX_CHARS)
    }

    fn normalized_notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// Cart aggregate: validated line items with merged configurations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from raw line items.
    ///
    /// Every item is validated, lines with the same configuration are
    /// merged by accumulating quantity, and cart-level rules are checked.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if any item fails validation, the resulting
    /// cart is empty, or items mix currencies.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut cart = Cart::default();
        for item in items {
            item.validate()?;
            cart.add(item);
        }
        if cart.items.is_empty() {
            return Err(CartError::Empty);
        }
        let currency = &cart.items[0].currency;
        if cart.items.iter().any(|item| &item.currency != currency) {
            return Err(CartError::MixedCurrencies);
        }
        Ok(cart)
    }

    /// Add a line, merging into an existing line with the same
    /// configuration. Assumes the item has already been validated.
    fn add(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.same_configuration(&item))
        {
            Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
            None => self.items.push(item),
        }
    }

    /// The merged line items.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cart total in minor units.
    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.unit_price_cents.saturating_mul(item.qty))
            .sum()
    }
}

/// Errors raised while assembling or validating a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Cart contains no items")]
    Empty,

    #[error("Product name is required")]
    MissingProductName,

    #[error("Part number is required")]
    MissingPartNumber,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Unit price must be a positive integer in cents")]
    InvalidUnitPrice,

    #[error("Currency must be an uppercase 3-letter code")]
    InvalidCurrency,

    #[error("All cart items must use the same currency")]
    MixedCurrencies,
}

/// Truncate to at most `max_chars` characters, counting characters rather
/// than bytes so multi-byte names cannot split mid-character.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        value.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk_lamp() -> CartItem {
        CartItem {
            product_name: "Desk Lamp".to_string(),
            base_sku: Some("LAMP".to_string()),
            part_number: "LAMP-BLK-40W".to_string(),
            qty: 1,
            options: vec![
                ItemOption {
                    code: "finish".to_string(),
                    value: "black".to_string(),
                },
                ItemOption {
                    code: "wattage".to_string(),
                    value: "40w".to_string(),
                },
            ],
            unit_price_cents: 4999,
            currency: "USD".to_string(),
            notes: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_item() {
        assert!(desk_lamp().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let item = CartItem {
            qty: 0,
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::InvalidQuantity));
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let item = CartItem {
            qty: -2,
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::InvalidQuantity));
    }

    #[test]
    fn validate_rejects_zero_price() {
        let item = CartItem {
            unit_price_cents: 0,
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::InvalidUnitPrice));
    }

    #[test]
    fn validate_rejects_lowercase_currency() {
        let item = CartItem {
            currency: "usd".to_string(),
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::InvalidCurrency));
    }

    #[test]
    fn validate_rejects_long_currency() {
        let item = CartItem {
            currency: "USDT".to_string(),
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::InvalidCurrency));
    }

    #[test]
    fn validate_rejects_blank_part_number() {
        let item = CartItem {
            part_number: "  ".to_string(),
            ..desk_lamp()
        };
        assert_eq!(item.validate(), Err(CartError::MissingPartNumber));
    }

    #[test]
    fn same_configuration_ignores_quantity_and_name() {
        let a = desk_lamp();
        let b = CartItem {
            qty: 5,
            product_name: "Renamed Lamp".to_string(),
            ..desk_lamp()
        };
        assert!(a.same_configuration(&b));
    }

    #[test]
    fn same_configuration_normalizes_absent_notes() {
        let a = CartItem {
            notes: None,
            ..desk_lamp()
        };
        let b = CartItem {
            notes: Some(String::new()),
            ..desk_lamp()
        };
        assert!(a.same_configuration(&b));
    }

    #[test]
    fn same_configuration_is_order_sensitive_for_options() {
        let a = desk_lamp();
        let mut reversed = desk_lamp();
        reversed.options.reverse();
        assert!(!a.same_configuration(&reversed));
    }

    #[test]
    fn same_configuration_differs_on_notes() {
        let a = desk_lamp();
        let b = CartItem {
            notes: Some("engrave initials".to_string()),
            ..desk_lamp()
        };
        assert!(!a.same_configuration(&b));
    }

    #[test]
    fn from_items_merges_same_configuration() {
        let cart = Cart::from_items(vec![
            desk_lamp(),
            CartItem {
                qty: 2,
                ..desk_lamp()
            },
        ])
        .unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 3);
    }

    #[test]
    fn from_items_keeps_distinct_configurations_apart() {
        let other = CartItem {
            part_number: "LAMP-WHT-40W".to_string(),
            ..desk_lamp()
        };
        let cart = Cart::from_items(vec![desk_lamp(), other]).unwrap();
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn from_items_rejects_empty_cart() {
        assert_eq!(Cart::from_items(vec![]), Err(CartError::Empty));
    }

    #[test]
    fn from_items_rejects_mixed_currencies() {
        let eur = CartItem {
            part_number: "LAMP-EU".to_string(),
            currency: "EUR".to_string(),
            ..desk_lamp()
        };
        assert_eq!(
            Cart::from_items(vec![desk_lamp(), eur]),
            Err(CartError::MixedCurrencies)
        );
    }

    #[test]
    fn total_cents_sums_quantity_times_price() {
        let cart = Cart::from_items(vec![
            desk_lamp(),
            CartItem {
                part_number: "SHADE-1".to_string(),
                qty: 2,
                unit_price_cents: 500,
                ..desk_lamp()
            },
        ])
        .unwrap();
        assert_eq!(cart.total_cents(), 4999 + 1000);
    }

    #[test]
    fn description_joins_part_number_options_and_notes() {
        let item = CartItem {
            notes: Some("gift wrap".to_string()),
            ..desk_lamp()
        };
        assert_eq!(
            item.description(),
            "LAMP-BLK-40W | finish: black, wattage: 40w | gift wrap"
        );
    }

    #[test]
    fn description_without_options_or_notes_is_part_number() {
        let item = CartItem {
            options: vec![],
            notes: None,
            ..desk_lamp()
        };
        assert_eq!(item.description(), "LAMP-BLK-40W");
    }

    #[test]
    fn description_is_capped() {
        let item = CartItem {
            notes: Some("x".repeat(600)),
            ..desk_lamp()
        };
        assert_eq!(item.description().chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        let value = "é".repeat(10);
        let truncated = truncate_chars(&value, 4);
        assert_eq!(truncated.chars().count(), 4);
        assert_eq!(truncated, "éééé");
    }
}
