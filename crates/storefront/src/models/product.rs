//! Product and review types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use citropoth_core::{Category, Price, ProductId, ReviewId, ReviewRating};

/// Image used when a new product is catalogued without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://images.unsplash.com/photo-1578749556568-bc2c40e68b61?auto=format&fit=crop&q=80&w=600";

/// Rating given to newly catalogued products.
pub const NEW_PRODUCT_RATING: f64 = 5.0;

/// Highest curated product rating.
pub const MAX_PRODUCT_RATING: f64 = 5.0;

/// Force a curated rating into 0.0..=5.0. NaN becomes 0.0.
#[must_use]
pub const fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_PRODUCT_RATING)
    }
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_rating)
}

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Department.
    pub category: Category,
    /// Image URI.
    pub image: String,
    /// Long description.
    pub description: String,
    /// Curated rating from 0.0 to 5.0, clamped on load.
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: f64,
    /// Reviews, newest first.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Whether this is a limited-release piece.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_limited: bool,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// ID generated at submission time.
    pub id: ReviewId,
    /// Reviewer display name (not bound to an account).
    pub user: String,
    /// Star rating.
    pub rating: ReviewRating,
    /// Free-text comment.
    pub comment: String,
    /// Submission date.
    pub date: NaiveDate,
}

/// Review form input, before it is given an ID and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user: String,
    pub rating: ReviewRating,
    pub comment: String,
}

impl NewReview {
    /// Display name used by the review form when nobody is signed in.
    pub const GUEST_NAME: &'static str = "Guest User";

    /// Stamp the submission with a fresh ID and the given date.
    #[must_use]
    pub fn into_review(self, date: NaiveDate) -> Review {
        Review {
            id: ReviewId::generate(),
            user: self.user,
            rating: self.rating,
            comment: self.comment,
            date,
        }
    }
}

/// Admin form input for cataloguing a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub image: Option<String>,
    pub description: String,
    pub is_limited: bool,
}

impl NewProduct {
    /// Build the catalog entry with a generated ID, no reviews and the
    /// default rating and image.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: ProductId::generate(),
            name: self.name,
            price: self.price,
            category: self.category,
            image: self
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_owned()),
            description: self.description,
            rating: NEW_PRODUCT_RATING,
            reviews: Vec::new(),
            is_limited: self.is_limited,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stored_product() {
        let json = r#"{
            "id": "1",
            "name": "Earthbound Terra Cotta Vase",
            "price": 45.00,
            "description": "Hand-thrown terra cotta vase.",
            "category": "Ceramics",
            "image": "https://example.com/vase.jpg",
            "rating": 4.8,
            "reviews": [
                { "id": "r1", "user": "Sarah J.", "rating": 5, "comment": "Beautiful!", "date": "2023-10-12" }
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price, Price::from_dollars(45));
        assert!(!product.is_limited);
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(
            product.reviews.first().unwrap().date,
            NaiveDate::from_ymd_opt(2023, 10, 12).unwrap()
        );
    }

    #[test]
    fn test_stored_rating_is_clamped() {
        let stored = |rating: &str| {
            let json = format!(
                r#"{{"id": "9", "name": "Bowl", "price": 30, "category": "Ceramics",
                    "image": "", "description": "", "rating": {rating}}}"#
            );
            serde_json::from_str::<Product>(&json).unwrap().rating
        };

        assert!((stored("7.0") - MAX_PRODUCT_RATING).abs() < f64::EPSILON);
        assert!(stored("-2.5").abs() < f64::EPSILON);
        assert!((stored("4.6") - 4.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_rating_handles_nan() {
        assert!(clamp_rating(f64::NAN).abs() < f64::EPSILON);
        assert!((clamp_rating(f64::INFINITY) - MAX_PRODUCT_RATING).abs() < f64::EPSILON);
    }

    #[test]
    fn test_limited_flag_serialized_only_when_set() {
        let mut product = NewProduct {
            name: "Urn".to_string(),
            price: Price::from_dollars(240),
            category: Category::Ceramics,
            image: None,
            description: String::new(),
            is_limited: false,
        }
        .into_product();

        let json = serde_json::to_string(&product).unwrap();
        assert!(!json.contains("isLimited"));

        product.is_limited = true;
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"isLimited\":true"));
    }

    #[test]
    fn test_new_product_defaults() {
        let product = NewProduct {
            name: "Hoops".to_string(),
            price: Price::from_dollars(55),
            category: Category::Jewelry,
            image: Some("   ".to_string()),
            description: "Silver".to_string(),
            is_limited: false,
        }
        .into_product();

        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
        assert!((product.rating - NEW_PRODUCT_RATING).abs() < f64::EPSILON);
        assert!(product.reviews.is_empty());
        assert!(!product.id.as_str().is_empty());
    }

    #[test]
    fn test_new_review_is_stamped() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let review = NewReview {
            user: NewReview::GUEST_NAME.to_string(),
            rating: ReviewRating::new(4).unwrap(),
            comment: "Lovely glaze".to_string(),
        }
        .into_review(date);

        assert_eq!(review.date, date);
        assert_eq!(review.user, "Guest User");
        assert!(!review.id.as_str().is_empty());
    }
}
