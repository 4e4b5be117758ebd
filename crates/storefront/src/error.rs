//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. Operational failures
//! are captured to Sentry before a user-safe message is shown.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::StoreError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::services::orders::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication or authorization failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout could not be completed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog mutation was rejected.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this is an operational failure rather than a user mistake.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::Config(_) | Self::Auth(AuthError::PasswordHash)
        )
    }

    /// Log the error, capturing operational failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
    }

    /// Message safe to show to the user.
    ///
    /// Internal details are never exposed, and every credential failure reads
    /// the same.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(_) => "Internal storage error".to_string(),
            Self::Config(err) => format!("Configuration problem: {err}"),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::DuplicateEmail => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::EmptyName => "Please enter your name".to_string(),
                AuthError::Forbidden => "Administrator access required".to_string(),
                AuthError::PasswordHash => "Authentication error".to_string(),
            },
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::Catalog(err) => err.to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str, role: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(email.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
        scope.set_tag("role", role);
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
        scope.remove_tag("role");
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "l1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_internal_classification() {
        let io = std::io::Error::other("disk full");
        assert!(AppError::Store(StoreError::Io(io)).is_internal());
        assert!(!AppError::Auth(AuthError::InvalidCredentials).is_internal());
        assert!(!AppError::Checkout(CheckoutError::EmptyCart).is_internal());
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let io = std::io::Error::other("/home/curator/.citropoth/orders.json: disk full");
        let message = AppError::Store(StoreError::Io(io)).user_message();
        assert_eq!(message, "Internal storage error");
        assert!(!message.contains("orders.json"));

        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).user_message(),
            "Invalid credentials"
        );
        assert_eq!(
            AppError::Auth(AuthError::DuplicateEmail).user_message(),
            "An account with this email already exists"
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::EmptyCart).user_message(),
            "Your cart is empty"
        );
    }
}
