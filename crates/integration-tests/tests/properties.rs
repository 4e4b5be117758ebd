//! Property tests for cart and registration invariants.

use chrono::Utc;
use proptest::prelude::*;

use citropoth_core::{Price, ProductId};
use citropoth_integration_tests::product;
use citropoth_storefront::AppError;
use citropoth_storefront::models::Order;
use citropoth_storefront::services::{AuthError, AuthGate, Cart, ShippingPolicy};

fn line_strategy() -> impl Strategy<Value = (u8, u32, u32)> {
    // (product slot, price in cents, times added)
    (0u8..6, 0u32..50_000, 1u32..5)
}

proptest! {
    #[test]
    fn repeated_adds_make_one_line(times in 1u32..40) {
        let piece = product("1", 45);
        let mut cart = Cart::new();
        for _ in 0..times {
            cart.add(&piece);
        }

        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.get(&piece.id).map(|item| item.quantity.get()), Some(times));
    }

    #[test]
    fn quantity_never_below_one(
        adds in 1u32..10,
        deltas in prop::collection::vec(-20i64..20, 0..20),
    ) {
        let piece = product("1", 45);
        let mut cart = Cart::new();
        for _ in 0..adds {
            cart.add(&piece);
        }

        for delta in deltas {
            let quantity = cart.update_quantity(&piece.id, delta);
            prop_assert!(quantity.is_some_and(|q| q.get() >= 1));
        }
    }

    #[test]
    fn total_is_subtotal_plus_threshold_shipping(
        lines in prop::collection::vec(line_strategy(), 0..8),
    ) {
        let mut cart = Cart::new();
        let mut expected = Price::ZERO;
        let mut seen = std::collections::HashMap::new();

        for (slot, cents, times) in lines {
            // The first price seen for a slot is the one the line keeps
            let cents = *seen.entry(slot).or_insert(cents);
            let mut piece = product(&slot.to_string(), 0);
            piece.price = Price::from_cents(cents);
            for _ in 0..times {
                cart.add(&piece);
                expected = expected + piece.price;
            }
        }

        let policy = ShippingPolicy::default();
        let totals = cart.totals(&policy);
        prop_assert_eq!(totals.subtotal, expected);

        let shipping = if expected > Price::from_dollars(150) {
            Price::ZERO
        } else {
            Price::from_dollars(15)
        };
        prop_assert_eq!(totals.shipping, shipping);
        prop_assert_eq!(totals.total, expected + shipping);
    }

    #[test]
    fn cart_round_trips_through_json(
        lines in prop::collection::vec(line_strategy(), 0..8),
    ) {
        let mut cart = Cart::new();
        for (slot, _, times) in lines {
            let piece = product(&format!("p{slot}"), 10);
            for _ in 0..times {
                cart.add(&piece);
            }
        }

        let json = serde_json::to_string(&cart).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let back: Cart = serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back, cart);
    }

    #[test]
    fn checkout_snapshot_matches_cart(
        lines in prop::collection::vec(line_strategy(), 1..6),
    ) {
        use citropoth_storefront::models::Session;
        use citropoth_storefront::services::OrderBook;

        let mut cart = Cart::new();
        for (slot, cents, times) in lines {
            let mut piece = product(&format!("p{slot}"), 0);
            piece.price = Price::from_cents(cents);
            if cart.get(&piece.id).is_some() {
                continue;
            }
            for _ in 0..times {
                cart.add(&piece);
            }
        }

        let policy = ShippingPolicy::default();
        let before_items = cart.items().to_vec();
        let before_totals = cart.totals(&policy);

        let mut book = OrderBook::default();
        let order: Order = book
            .complete_checkout(&mut cart, &Session::Anonymous, &policy, Utc::now())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert!(cart.is_empty());
        prop_assert_eq!(book.len(), 1);
        prop_assert_eq!(order.items, before_items);
        prop_assert_eq!(order.total, before_totals.total);
    }
}

proptest! {
    // Every registration runs Argon2, so keep the case count small
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn duplicate_registration_always_fails(
        local in "[a-z]{1,12}",
        upper in any::<bool>(),
        first_password in "[a-zA-Z0-9]{8,16}",
        second_password in "[a-zA-Z0-9]{8,16}",
    ) {
        let mut gate = AuthGate::default();
        let email = format!("{local}@example.com");
        gate.register("First", &email, &first_password)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let again = if upper { email.to_uppercase() } else { email };
        let result = gate
            .register("Second", &again, &second_password)
            .map_err(AppError::from);
        prop_assert!(matches!(result, Err(AppError::Auth(AuthError::DuplicateEmail))));
        prop_assert_eq!(gate.users().len(), 1);
    }
}

#[test]
fn unknown_line_updates_are_noops() {
    let mut cart = Cart::new();
    cart.add(&product("1", 45));
    let before = cart.clone();

    assert!(cart.update_quantity(&ProductId::new("2"), 5).is_none());
    assert!(!cart.remove(&ProductId::new("2")));
    assert_eq!(cart, before);
}
