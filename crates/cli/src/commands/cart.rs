//! Cart and checkout commands.

use citropoth_core::ProductId;
use citropoth_storefront::{AppError, Result};

use crate::Shop;

/// Show cart lines and totals.
pub fn show(shop: &Shop) {
    let cart = shop.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!(
            "{:<34} {:<32} {:>4} x {:>9} = {:>9}",
            item.id().as_str(),
            item.product.name,
            item.quantity,
            item.product.price.display(),
            item.line_total().display()
        );
    }

    let totals = shop.totals();
    println!();
    println!("Items:    {}", cart.item_count());
    println!("Subtotal: {}", totals.subtotal);
    if totals.ships_free() {
        println!("Shipping: free");
    } else {
        println!(
            "Shipping: {} (free over {})",
            totals.shipping,
            shop.shipping().free_shipping_threshold
        );
    }
    println!("Total:    {}", totals.total);
}

/// Add one of a product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product.
pub fn add(shop: &mut Shop, id: &ProductId) -> Result<()> {
    let quantity = shop
        .add_to_cart(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    println!("Added. {quantity} in cart.");
    Ok(())
}

/// Change a line's quantity.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the cart.
pub fn update(shop: &mut Shop, id: &ProductId, delta: i64) -> Result<()> {
    let quantity = shop
        .update_quantity(id, delta)
        .ok_or_else(|| AppError::NotFound(format!("cart line {id}")))?;

    println!("Quantity is now {quantity}.");
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the cart.
pub fn remove(shop: &mut Shop, id: &ProductId) -> Result<()> {
    if !shop.remove_from_cart(id) {
        return Err(AppError::NotFound(format!("cart line {id}")));
    }

    println!("Removed.");
    Ok(())
}

/// Empty the cart.
pub fn clear(shop: &mut Shop) {
    shop.clear_cart();
    println!("Cart cleared.");
}

/// Complete checkout.
///
/// # Errors
///
/// Returns `AppError::Checkout` when the cart is empty.
pub fn checkout(shop: &mut Shop) -> Result<()> {
    let order = shop.checkout()?;

    println!("Order {} placed for {}.", order.id, order.user_email);
    println!(
        "{} items, subtotal {}, shipping {}, total {}.",
        order.item_count(),
        order.subtotal,
        order.shipping,
        order.total
    );
    println!("Status: {}", order.status);
    Ok(())
}
