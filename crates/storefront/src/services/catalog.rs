//! Catalog store: products and their review lists.
//!
//! The product list is held behind an `Arc`. [`Catalog::snapshot`] hands out
//! a cheap handle; mutations go through `Arc::make_mut`, so a snapshot taken
//! before a mutation never observes it.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use citropoth_core::{BlogPostId, Category, ProductId};

use crate::models::{NewReview, Product, Review};

/// Errors from catalog mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product with this ID is already catalogued.
    #[error("product {0} already exists")]
    DuplicateProduct(ProductId),

    /// A blog post with this ID is already published.
    #[error("blog post {0} already exists")]
    DuplicateBlogPost(BlogPostId),
}

/// The set of purchasable products, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Shared read-only handle to the current product list.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.products)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products flagged as limited releases.
    pub fn limited_releases(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_limited)
    }

    /// Products in one department.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Prepend a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if the ID is already taken.
    pub fn add_product(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.get(&product.id).is_some() {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        Arc::make_mut(&mut self.products).insert(0, product);
        Ok(())
    }

    /// Replace the product with the same ID. Returns `false` if none exists.
    pub fn update_product(&mut self, product: Product) -> bool {
        let Some(index) = self.position(&product.id) else {
            return false;
        };

        if let Some(slot) = Arc::make_mut(&mut self.products).get_mut(index) {
            *slot = product;
        }
        true
    }

    /// Remove a product. Returns whether it existed.
    ///
    /// Cart lines and orders keep their own copies and are not touched.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        Arc::make_mut(&mut self.products).remove(index);
        true
    }

    /// Prepend a review dated `today` to a product.
    ///
    /// Returns the stored review, or `None` (catalog unchanged) when the
    /// product does not exist.
    pub fn add_review(
        &mut self,
        id: &ProductId,
        review: NewReview,
        today: NaiveDate,
    ) -> Option<Review> {
        let index = self.position(id)?;

        let review = review.into_review(today);
        let product = Arc::make_mut(&mut self.products).get_mut(index)?;
        product.reviews.insert(0, review.clone());
        Some(review)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|product| &product.id == id)
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use citropoth_core::{Price, ReviewRating};

    use super::*;

    fn product(id: &str, category: Category, limited: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Price::from_dollars(40),
            category,
            image: String::new(),
            description: String::new(),
            rating: 4.0,
            reviews: Vec::new(),
            is_limited: limited,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("1", Category::Ceramics, false),
            product("2", Category::Textiles, false),
            product("l1", Category::Ceramics, true),
        ])
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_add_product_prepends() {
        let mut catalog = catalog();
        catalog
            .add_product(product("9", Category::Jewelry, false))
            .unwrap();

        assert_eq!(catalog.products().first().unwrap().id.as_str(), "9");
        assert_eq!(catalog.products().len(), 4);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut catalog = catalog();
        let err = catalog
            .add_product(product("1", Category::Jewelry, false))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProduct(ProductId::new("1")));
        assert_eq!(catalog.products().len(), 3);
    }

    #[test]
    fn test_update_and_delete() {
        let mut catalog = catalog();

        let mut changed = product("2", Category::Textiles, true);
        changed.name = "Renamed".to_string();
        assert!(catalog.update_product(changed));
        assert_eq!(catalog.get(&ProductId::new("2")).unwrap().name, "Renamed");

        assert!(!catalog.update_product(product("missing", Category::Textiles, false)));

        assert!(catalog.delete_product(&ProductId::new("2")));
        assert!(!catalog.delete_product(&ProductId::new("2")));
        assert!(catalog.get(&ProductId::new("2")).is_none());
    }

    #[test]
    fn test_add_review_prepends() {
        let mut catalog = catalog();
        let first = NewReview {
            user: "Sarah J.".to_string(),
            rating: ReviewRating::new(5).unwrap(),
            comment: "Lovely".to_string(),
        };
        let second = NewReview {
            user: "Mark T.".to_string(),
            rating: ReviewRating::new(3).unwrap(),
            comment: "Fine".to_string(),
        };

        catalog.add_review(&ProductId::new("1"), first, today()).unwrap();
        let stored = catalog
            .add_review(&ProductId::new("1"), second, today())
            .unwrap();

        let reviews = &catalog.get(&ProductId::new("1")).unwrap().reviews;
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews.first().unwrap(), &stored);
        assert_eq!(stored.date, today());
    }

    #[test]
    fn test_add_review_unknown_product_is_noop() {
        let mut catalog = catalog();
        let before = catalog.clone();

        let review = NewReview {
            user: NewReview::GUEST_NAME.to_string(),
            rating: ReviewRating::default(),
            comment: "Where is it?".to_string(),
        };
        assert!(catalog
            .add_review(&ProductId::new("ghost"), review, today())
            .is_none());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut catalog = catalog();
        let snapshot = catalog.snapshot();

        catalog.delete_product(&ProductId::new("1"));
        catalog
            .add_product(product("new", Category::Paintings, false))
            .unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.first().unwrap().id.as_str(), "1");
        assert_eq!(catalog.products().first().unwrap().id.as_str(), "new");
    }

    #[test]
    fn test_filters() {
        let catalog = catalog();
        assert_eq!(catalog.limited_releases().count(), 1);
        assert_eq!(catalog.by_category(Category::Ceramics).count(), 2);
        assert_eq!(catalog.by_category(Category::Paintings).count(), 0);
    }
}
