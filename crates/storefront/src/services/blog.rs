//! Blog shelf: the journal posts shown on the blog page.

use std::sync::Arc;

use citropoth_core::BlogPostId;

use crate::models::BlogPost;

use super::catalog::CatalogError;

/// Published posts, newest first. Copy-on-write like [`super::Catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogShelf {
    posts: Arc<Vec<BlogPost>>,
}

impl BlogShelf {
    #[must_use]
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: Arc::new(posts),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<BlogPost>> {
        Arc::clone(&self.posts)
    }

    #[must_use]
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    #[must_use]
    pub fn get(&self, id: &BlogPostId) -> Option<&BlogPost> {
        self.posts.iter().find(|post| &post.id == id)
    }

    /// Prepend a post.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateBlogPost` if the ID is already taken.
    pub fn add_post(&mut self, post: BlogPost) -> Result<(), CatalogError> {
        if self.get(&post.id).is_some() {
            return Err(CatalogError::DuplicateBlogPost(post.id));
        }

        Arc::make_mut(&mut self.posts).insert(0, post);
        Ok(())
    }

    /// Replace the post with the same ID. Returns `false` if none exists.
    pub fn update_post(&mut self, post: BlogPost) -> bool {
        let Some(index) = self.position(&post.id) else {
            return false;
        };

        if let Some(slot) = Arc::make_mut(&mut self.posts).get_mut(index) {
            *slot = post;
        }
        true
    }

    /// Remove a post. Returns whether it existed.
    pub fn delete_post(&mut self, id: &BlogPostId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        Arc::make_mut(&mut self.posts).remove(index);
        true
    }

    fn position(&self, id: &BlogPostId) -> Option<usize> {
        self.posts.iter().position(|post| &post.id == id)
    }
}

impl From<Vec<BlogPost>> for BlogShelf {
    fn from(posts: Vec<BlogPost>) -> Self {
        Self::new(posts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::NewBlogPost;

    use super::*;

    fn post(title: &str) -> BlogPost {
        NewBlogPost {
            title: title.to_string(),
            excerpt: String::new(),
            content: String::new(),
            category: "Philosophy".to_string(),
            image: None,
        }
        .into_post("Elena Vance", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_add_update_delete() {
        let mut shelf = BlogShelf::default();
        let first = post("First");
        let second = post("Second");

        shelf.add_post(first.clone()).unwrap();
        shelf.add_post(second.clone()).unwrap();
        assert_eq!(shelf.posts().first().unwrap().id, second.id);

        let mut edited = first.clone();
        edited.title = "First, revised".to_string();
        assert!(shelf.update_post(edited));
        assert_eq!(shelf.get(&first.id).unwrap().title, "First, revised");

        assert!(shelf.delete_post(&first.id));
        assert!(!shelf.delete_post(&first.id));
        assert_eq!(shelf.posts().len(), 1);
    }

    #[test]
    fn test_duplicate_post_rejected() {
        let mut shelf = BlogShelf::default();
        let original = post("Slow Crafting");
        shelf.add_post(original.clone()).unwrap();

        let err = shelf.add_post(original.clone()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateBlogPost(original.id));
    }

    #[test]
    fn test_update_unknown_returns_false() {
        let mut shelf = BlogShelf::default();
        assert!(!shelf.update_post(post("Nowhere")));
        assert!(shelf.posts().is_empty());
    }
}
