//! Cart line and total types.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use citropoth_core::{Price, ProductId};

use super::product::Product;

/// One cart line: a product snapshot plus a quantity of at least one.
///
/// The product fields are flattened so a stored line reads as the product
/// with an extra `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// A new line holding a single unit.
    #[must_use]
    pub fn single(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Product ID of this line.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity.get()
    }
}

/// Computed amounts for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Price,
    /// Shipping charge under the active policy.
    pub shipping: Price,
    /// Subtotal plus shipping.
    pub total: Price,
}

impl CartTotals {
    /// Whether the order ships for free.
    #[must_use]
    pub const fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}
