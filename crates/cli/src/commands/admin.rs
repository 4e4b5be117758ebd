//! Administrator commands.
//!
//! # Usage
//!
//! ```bash
//! # Produce the hash for CITROPOTH_ADMIN_PASSWORD_HASH
//! citropoth admin hash-password -p 'a long passphrase'
//!
//! # After `citropoth account login` with the admin email
//! citropoth admin product add -n "Raku Bowl" -p 90 -c ceramics -d "Crackled glaze"
//! citropoth admin blog delete b2
//! citropoth admin users
//! ```

use citropoth_core::{BlogPostId, ProductId};
use citropoth_storefront::models::{NewBlogPost, NewProduct};
use citropoth_storefront::services::auth;
use citropoth_storefront::{AppError, Result};

use crate::{BlogFields, BlogPatch, ProductFields, ProductPatch, Shop};

/// Print an Argon2id hash for the admin password.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the password is too short, or
/// `AppError::Auth` if hashing fails.
pub fn hash_password(password: &str) -> Result<()> {
    if password.chars().count() < auth::MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {} characters",
            auth::MIN_PASSWORD_LENGTH
        )));
    }

    let hash = auth::hash_password(password)?;
    println!("{hash}");
    Ok(())
}

/// Catalog a new product.
///
/// # Errors
///
/// Returns `AppError::Auth` unless signed in as the administrator.
pub fn add_product(shop: &mut Shop, fields: ProductFields) -> Result<()> {
    let product = shop.add_product(NewProduct {
        name: fields.name,
        price: fields.price,
        category: fields.category,
        image: fields.image,
        description: fields.description,
        is_limited: fields.limited,
    })?;

    println!("Added {} as {}.", product.name, product.id);
    Ok(())
}

/// Change fields of an existing product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID, or `AppError::Auth`
/// unless signed in as the administrator.
pub fn update_product(shop: &mut Shop, id: &ProductId, patch: ProductPatch) -> Result<()> {
    let mut product = shop
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if let Some(name) = patch.name {
        product.name = name;
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(category) = patch.category {
        product.category = category;
    }
    if let Some(description) = patch.description {
        product.description = description;
    }
    if let Some(image) = patch.image {
        product.image = image;
    }
    if let Some(limited) = patch.limited {
        product.is_limited = limited;
    }

    if !shop.update_product(product)? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    println!("Updated {id}.");
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID, or `AppError::Auth`
/// unless signed in as the administrator.
pub fn delete_product(shop: &mut Shop, id: &ProductId) -> Result<()> {
    if !shop.delete_product(id)? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    println!("Deleted {id}.");
    Ok(())
}

/// Publish a journal post.
///
/// # Errors
///
/// Returns `AppError::Auth` unless signed in as the administrator.
pub fn add_blog_post(shop: &mut Shop, fields: BlogFields) -> Result<()> {
    let post = shop.add_blog_post(NewBlogPost {
        title: fields.title,
        excerpt: fields.excerpt,
        content: fields.content,
        category: fields.category,
        image: fields.image,
    })?;

    println!("Published \"{}\" as {}.", post.title, post.id);
    Ok(())
}

/// Change fields of an existing journal post.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID, or `AppError::Auth`
/// unless signed in as the administrator.
pub fn update_blog_post(shop: &mut Shop, id: &BlogPostId, patch: BlogPatch) -> Result<()> {
    let mut post = shop
        .blog()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if let Some(title) = patch.title {
        post.title = title;
    }
    if let Some(excerpt) = patch.excerpt {
        post.excerpt = excerpt;
    }
    if let Some(content) = patch.content {
        post.content = content;
    }
    if let Some(category) = patch.category {
        post.category = category;
    }
    if let Some(image) = patch.image {
        post.image = image;
    }

    if !shop.update_blog_post(post)? {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    println!("Updated {id}.");
    Ok(())
}

/// Delete a journal post.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown ID, or `AppError::Auth`
/// unless signed in as the administrator.
pub fn delete_blog_post(shop: &mut Shop, id: &BlogPostId) -> Result<()> {
    if !shop.delete_blog_post(id)? {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    println!("Deleted {id}.");
    Ok(())
}

/// List registered customers.
///
/// # Errors
///
/// Returns `AppError::Auth` unless signed in as the administrator.
pub fn users(shop: &Shop) -> Result<()> {
    let users = shop.users()?;
    if users.is_empty() {
        println!("No registered customers.");
    }
    for user in users {
        println!("{:<32} {}", user.name, user.email);
    }
    Ok(())
}
