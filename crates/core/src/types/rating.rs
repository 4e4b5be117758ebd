//! Star rating given in a product review.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ReviewRating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside 1..=5.
    #[error("rating must be between {min} and {max} stars (got {got})")]
    OutOfRange {
        /// Lowest accepted value.
        min: u8,
        /// Highest accepted value.
        max: u8,
        /// Value that was supplied.
        got: u8,
    },
}

/// An integer star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ReviewRating(u8);

impl ReviewRating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating (and the form default).
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` unless `stars` is in 1..=5.
    pub const fn new(stars: u8) -> Result<Self, RatingError> {
        if stars < Self::MIN || stars > Self::MAX {
            return Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got: stars,
            });
        }
        Ok(Self(stars))
    }

    /// Create a rating, clamping `stars` into 1..=5.
    #[must_use]
    pub const fn saturating(stars: u8) -> Self {
        if stars < Self::MIN {
            Self(Self::MIN)
        } else if stars > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(stars)
        }
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl Default for ReviewRating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for ReviewRating {
    type Error = RatingError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<ReviewRating> for u8 {
    fn from(rating: ReviewRating) -> Self {
        rating.0
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(ReviewRating::new(0).is_err());
        assert!(ReviewRating::new(1).is_ok());
        assert!(ReviewRating::new(5).is_ok());
        assert!(matches!(
            ReviewRating::new(6),
            Err(RatingError::OutOfRange { got: 6, .. })
        ));
    }

    #[test]
    fn test_saturating() {
        assert_eq!(ReviewRating::saturating(0).stars(), 1);
        assert_eq!(ReviewRating::saturating(4).stars(), 4);
        assert_eq!(ReviewRating::saturating(9).stars(), 5);
    }

    #[test]
    fn test_default_is_five_stars() {
        assert_eq!(ReviewRating::default().stars(), 5);
    }

    #[test]
    fn test_serde() {
        let rating: ReviewRating = serde_json::from_str("4").unwrap();
        assert_eq!(rating.stars(), 4);
        assert_eq!(serde_json::to_string(&rating).unwrap(), "4");
        assert!(serde_json::from_str::<ReviewRating>("9").is_err());
    }
}
