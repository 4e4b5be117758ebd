//! Craft advisor commands.
//!
//! Ctrl-C cancels a pending request; the advisor then answers with its
//! fallback text.

use citropoth_core::ProductId;
use citropoth_storefront::services::CraftAdvisor;
use citropoth_storefront::{AppError, Result};

use crate::Shop;

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Suggest a craft project.
pub async fn recommend(advisor: &CraftAdvisor, hint: &str) {
    let text = advisor
        .craft_recommendation_or_cancel(hint, interrupted())
        .await;
    println!("{text}");
}

/// Write a story for a catalog product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product.
pub async fn story(shop: &Shop, advisor: &CraftAdvisor, id: &ProductId) -> Result<()> {
    let product = shop
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let text = advisor
        .product_story_or_cancel(&product.name, interrupted())
        .await;
    println!("{}", product.name);
    println!("{text}");
    Ok(())
}
