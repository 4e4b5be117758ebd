//! Order recorder: turns the cart into an immutable order at checkout.

use chrono::{DateTime, Utc};
use thiserror::Error;

use citropoth_core::{Email, OrderId, OrderStatus};

use crate::models::{Order, Session};

use super::cart::{Cart, ShippingPolicy};

/// Errors from checkout completion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// Order history, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    #[must_use]
    pub const fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Record the cart as a new order and clear it.
    ///
    /// The order is owned by the signed-in user, or by the guest placeholder
    /// when nobody is signed in. Totals are computed once here and never
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines; nothing is
    /// recorded and the cart is untouched.
    pub fn complete_checkout(
        &mut self,
        cart: &mut Cart,
        session: &Session,
        policy: &ShippingPolicy,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = cart.totals(policy);
        let user_email = session.email().cloned().unwrap_or_else(Email::guest);

        let order = Order {
            id: OrderId::generate(),
            user_email,
            items: cart.snapshot(),
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            date: now,
            status: OrderStatus::Initiated,
        };

        self.orders.insert(0, order.clone());
        cart.clear();

        Ok(order)
    }

    /// All orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders owned by `email`, compared case-insensitively.
    pub fn orders_for<'a>(&'a self, email: &'a Email) -> impl Iterator<Item = &'a Order> + 'a {
        self.orders
            .iter()
            .filter(move |order| order.user_email.same_identity(email))
    }

    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl From<Vec<Order>> for OrderBook {
    fn from(orders: Vec<Order>) -> Self {
        Self::new(orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use citropoth_core::{Category, Price, ProductId, Role};

    use crate::models::{Product, SessionUser};

    use super::*;

    fn product(id: &str, dollars: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Price::from_dollars(dollars),
            category: Category::Paintings,
            image: String::new(),
            description: String::new(),
            rating: 5.0,
            reviews: Vec::new(),
            is_limited: false,
        }
    }

    fn member() -> Session {
        Session::Authenticated(SessionUser {
            name: "Maya".to_string(),
            email: Email::parse("maya@example.com").unwrap(),
            role: Role::Member,
        })
    }

    #[test]
    fn test_checkout_records_and_clears() {
        let mut book = OrderBook::default();
        let mut cart = Cart::new();
        cart.add(&product("1", 45));
        cart.add(&product("3", 120));
        let expected = cart.totals(&ShippingPolicy::default());

        let order = book
            .complete_checkout(&mut cart, &member(), &ShippingPolicy::default(), Utc::now())
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(book.len(), 1);
        assert_eq!(order.total, expected.total);
        assert_eq!(order.total, Price::from_dollars(165));
        assert_eq!(order.status, OrderStatus::Initiated);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.user_email.as_str(), "maya@example.com");
        assert!(order.id.as_str().starts_with(OrderId::PREFIX));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut book = OrderBook::default();
        let mut cart = Cart::new();

        let err = book
            .complete_checkout(&mut cart, &member(), &ShippingPolicy::default(), Utc::now())
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert!(book.is_empty());
    }

    #[test]
    fn test_anonymous_checkout_uses_guest_email() {
        let mut book = OrderBook::default();
        let mut cart = Cart::new();
        cart.add(&product("5", 55));

        let order = book
            .complete_checkout(
                &mut cart,
                &Session::Anonymous,
                &ShippingPolicy::default(),
                Utc::now(),
            )
            .unwrap();
        assert!(order.is_guest());
    }

    #[test]
    fn test_newest_first_and_filter_by_owner() {
        let mut book = OrderBook::default();
        let policy = ShippingPolicy::default();

        let mut cart = Cart::new();
        cart.add(&product("1", 45));
        let first = book
            .complete_checkout(&mut cart, &member(), &policy, Utc::now())
            .unwrap();

        cart.add(&product("2", 68));
        let second = book
            .complete_checkout(&mut cart, &Session::Anonymous, &policy, Utc::now())
            .unwrap();

        assert_eq!(book.orders().first().unwrap().id, second.id);
        let owner = Email::parse("MAYA@example.com").unwrap();
        let mine: Vec<_> = book.orders_for(&owner).collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().unwrap().id, first.id);
        assert!(book.get(&first.id).is_some());
    }

    #[test]
    fn test_history_round_trip_keeps_breakdown() {
        let mut book = OrderBook::default();
        let mut cart = Cart::new();
        cart.add(&product("1", 45));

        let order = book
            .complete_checkout(&mut cart, &member(), &ShippingPolicy::default(), Utc::now())
            .unwrap();

        let json = serde_json::to_string(book.orders()).unwrap();
        let restored: Vec<Order> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, book.orders());
        assert_eq!(restored.first().unwrap().total, order.total);
        assert_eq!(restored.first().unwrap().shipping, Price::from_dollars(15));
    }
}
