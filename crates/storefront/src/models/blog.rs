//! Blog post types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use citropoth_core::BlogPostId;

/// Cover image used when a post is composed without one.
pub const DEFAULT_BLOG_IMAGE: &str = "https://images.unsplash.com/photo-1459749411177-0421800673e6?auto=format&fit=crop&q=80&w=800";

/// Byline used when the composing admin has no display name.
pub const DEFAULT_AUTHOR: &str = "Chief Artisan";

/// Long date format shown on the blog ("March 15, 2024").
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// A journal entry shown on the blog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    /// Stored as `YYYY-MM-DD`; the long display form is also accepted.
    #[serde(deserialize_with = "deserialize_post_date")]
    pub date: NaiveDate,
    pub image: String,
    pub category: String,
}

impl BlogPost {
    /// Publication date as shown on the blog ("March 15, 2024").
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

fn deserialize_post_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%B %d, %Y"))
        .map_err(|e| serde::de::Error::custom(format!("invalid post date {raw:?}: {e}")))
}

/// Admin form input for composing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
}

impl NewBlogPost {
    /// Publish under `author` on `date` with a generated ID.
    #[must_use]
    pub fn into_post(self, author: &str, date: NaiveDate) -> BlogPost {
        let author = if author.trim().is_empty() {
            DEFAULT_AUTHOR
        } else {
            author
        };

        BlogPost {
            id: BlogPostId::generate(),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: author.to_owned(),
            date,
            image: self
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BLOG_IMAGE.to_owned()),
            category: self.category,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> NewBlogPost {
        NewBlogPost {
            title: "Kiln Notes".to_string(),
            excerpt: "Firing schedules".to_string(),
            content: "Cone 6 is a forgiving place to start.".to_string(),
            category: "Tutorial".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_display_date() {
        let post = draft().into_post("Elena Vance", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(post.display_date(), "March 5, 2024");
    }

    #[test]
    fn test_date_accepts_both_forms() {
        let iso: BlogPost = serde_json::from_value(serde_json::json!({
            "id": "b1", "title": "t", "excerpt": "e", "content": "c", "author": "a",
            "date": "2024-03-15", "image": "i", "category": "Philosophy"
        }))
        .unwrap();
        let long: BlogPost = serde_json::from_value(serde_json::json!({
            "id": "b1", "title": "t", "excerpt": "e", "content": "c", "author": "a",
            "date": "March 15, 2024", "image": "i", "category": "Philosophy"
        }))
        .unwrap();

        assert_eq!(iso.date, long.date);
        assert_eq!(serde_json::to_value(&iso).unwrap()["date"], "2024-03-15");
    }

    #[test]
    fn test_defaults_for_author_and_image() {
        let post = draft().into_post("  ", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.image, DEFAULT_BLOG_IMAGE);
        assert!(post.id.as_str().starts_with('b'));
    }
}
