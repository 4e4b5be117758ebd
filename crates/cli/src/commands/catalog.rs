//! Catalog browsing and reviews.

use citropoth_core::{Category, ProductId, ReviewRating};
use citropoth_storefront::models::Product;
use citropoth_storefront::{AppError, Result};

use crate::Shop;

fn print_row(product: &Product) {
    let limited = if product.is_limited { "  [limited]" } else { "" };
    println!(
        "{:<34} {:<32} {:>9}  {}{limited}",
        product.id.as_str(),
        product.name,
        product.price.display(),
        product.category.label()
    );
}

/// List products, optionally in one category.
pub fn list(shop: &Shop, category: Option<Category>) {
    let catalog = shop.catalog();
    match category {
        Some(category) => catalog.by_category(category).for_each(print_row),
        None => catalog.products().iter().for_each(print_row),
    }
}

/// List limited releases.
pub fn limited(shop: &Shop) {
    shop.catalog().limited_releases().for_each(print_row);
}

/// Show one product with its reviews.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID.
pub fn show(shop: &Shop, id: &ProductId) -> Result<()> {
    let product = shop
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    println!("{}", product.name);
    println!("{} | {} | rated {:.1}", product.price, product.category, product.rating);
    if product.is_limited {
        println!("Limited release");
    }
    println!();
    println!("{}", product.description);

    if !product.reviews.is_empty() {
        println!();
        println!("Reviews ({}):", product.reviews.len());
        for review in &product.reviews {
            println!(
                "  {} {} on {}: {}",
                review.rating, review.user, review.date, review.comment
            );
        }
    }

    Ok(())
}

/// Post a review under the current session's name.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product.
pub fn review(shop: &mut Shop, id: &ProductId, stars: u8, comment: &str) -> Result<()> {
    let review = shop
        .add_review(id, ReviewRating::saturating(stars), comment)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    println!("Thanks, {}! Your {} review is posted.", review.user, review.rating);
    Ok(())
}
