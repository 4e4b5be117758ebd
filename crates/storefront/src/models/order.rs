//! Order record created at checkout completion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use citropoth_core::{Email, OrderId, OrderStatus, Price};

use super::cart::CartItem;

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order number (`ORD-` prefixed).
    pub id: OrderId,
    /// Owner, or [`Email::guest`] for anonymous checkouts.
    pub user_email: Email,
    /// Deep copy of the cart at completion time.
    pub items: Vec<CartItem>,
    /// Sum of line totals at completion time.
    #[serde(default)]
    pub subtotal: Price,
    /// Shipping charged at completion time.
    #[serde(default)]
    pub shipping: Price,
    /// Amount charged, shipping included. Never recomputed.
    pub total: Price,
    /// When the checkout completed.
    pub date: DateTime<Utc>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Whether the order was placed without an account.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user_email.matches(Email::GUEST)
    }
}
