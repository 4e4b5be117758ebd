//! Cart engine: line items, quantity rules and shipping-adjusted totals.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use citropoth_core::{Price, ProductId};

use crate::models::{CartItem, CartTotals, Product};

/// Free-shipping threshold and flat fee.
///
/// Shipping is free only when the subtotal is strictly greater than the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_shipping_threshold: Price,
    pub flat_fee: Price,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::from_dollars(150),
            flat_fee: Price::from_dollars(15),
        }
    }
}

impl ShippingPolicy {
    /// Shipping charged for a given subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal > self.free_shipping_threshold {
            Price::ZERO
        } else {
            self.flat_fee
        }
    }

    /// Subtotal, shipping and total for a set of lines.
    #[must_use]
    pub fn totals(&self, items: &[CartItem]) -> CartTotals {
        let subtotal: Price = items.iter().map(CartItem::line_total).sum();
        let shipping = self.shipping_for(subtotal);
        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// The shopping cart.
///
/// Holds at most one line per product ID, in insertion order. Persisted as a
/// plain array of lines; duplicate IDs in stored data are merged on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same ID gains one unit (saturating); the
    /// stored snapshot is left as it was. Otherwise a new line is appended.
    pub fn add(&mut self, product: &Product) -> NonZeroU32 {
        if let Some(item) = self.get_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartItem::single(product.clone()));
        NonZeroU32::MIN
    }

    /// Adjust a line's quantity by `delta`, never going below one.
    ///
    /// Returns the new quantity, or `None` when no line has this ID.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Option<NonZeroU32> {
        let item = self.get_mut(id)?;

        let target = i64::from(item.quantity.get()).saturating_add(delta);
        let clamped = u32::try_from(target.max(1)).unwrap_or(u32::MAX);
        item.quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);

        Some(item.quantity)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines (cart badge).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Totals under `policy`.
    #[must_use]
    pub fn totals(&self, policy: &ShippingPolicy) -> CartTotals {
        policy.totals(&self.items)
    }

    /// Deep copy of the lines, as recorded in an order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(stored: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for line in stored {
            if let Some(existing) = cart.get_mut(line.id()) {
                existing.quantity = existing.quantity.saturating_add(line.quantity.get());
            } else {
                cart.items.push(line);
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
