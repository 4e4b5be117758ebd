//! Account commands.

use citropoth_storefront::Result;

use crate::Shop;

/// Create a customer account. The customer still has to log in.
///
/// # Errors
///
/// Returns `AppError::Auth` when the account is refused.
pub fn register(shop: &mut Shop, name: &str, email: &str, password: &str) -> Result<()> {
    let user = shop.register(name, email, password)?;
    println!("Welcome, {}. Log in with {} to continue.", user.name, user.email);
    Ok(())
}

/// Sign in.
///
/// # Errors
///
/// Returns `AppError::Auth` with invalid credentials.
pub fn login(shop: &mut Shop, email: &str, password: &str) -> Result<()> {
    let user = shop.login(email, password)?;
    println!("Signed in as {} ({}).", user.name, user.role);
    Ok(())
}

/// Sign out.
pub fn logout(shop: &mut Shop) {
    let next = shop.logout();
    println!("Signed out. Back to {next}.");
}

/// Show the current session.
pub fn whoami(shop: &Shop) {
    match shop.session().user() {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
        None => println!("Not signed in."),
    }
}

/// List the signed-in customer's orders.
pub fn orders(shop: &Shop) {
    if !shop.session().is_logged_in() {
        println!("Sign in to see your orders.");
        return;
    }

    let orders = shop.my_orders();
    if orders.is_empty() {
        println!("No orders yet.");
        return;
    }

    for order in orders {
        println!(
            "{}  {}  {:<10}  {} items  {}",
            order.id,
            order.date.format("%Y-%m-%d"),
            order.status.to_string(),
            order.item_count(),
            order.total
        );
    }
}
