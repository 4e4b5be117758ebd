//! Command implementations. Each prints its result to stdout.

pub mod account;
pub mod admin;
pub mod advise;
pub mod blog;
pub mod cart;
pub mod catalog;

use citropoth_storefront::Page;

use crate::Shop;

/// Print the page the current session lands on.
pub fn page(shop: &Shop, requested: Page) {
    let resolved = shop.navigate(requested);
    if resolved == requested {
        println!("{resolved}");
    } else {
        println!("{resolved} (redirected from {requested})");
    }
}
