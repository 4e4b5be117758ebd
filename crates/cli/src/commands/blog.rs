//! Journal commands.

use citropoth_core::BlogPostId;
use citropoth_storefront::{AppError, Result};

use crate::Shop;

/// List journal posts, newest first.
pub fn list(shop: &Shop) {
    for post in shop.blog().posts() {
        println!(
            "{:<34} {}  ({}, {})",
            post.id.as_str(),
            post.title,
            post.author,
            post.display_date()
        );
        println!("{:<34} {}", "", post.excerpt);
    }
}

/// Show one journal post.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID.
pub fn show(shop: &Shop, id: &BlogPostId) -> Result<()> {
    let post = shop
        .blog()
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    println!("{}", post.title);
    println!("{} | {} | {}", post.category, post.author, post.display_date());
    println!();
    println!("{}", post.content);
    Ok(())
}
