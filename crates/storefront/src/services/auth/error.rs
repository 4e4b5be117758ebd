//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid email format (registration only; login reports
    /// `InvalidCredentials` instead).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] citropoth_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email (compared case-insensitively) already exists.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Registration without a display name.
    #[error("name must not be empty")]
    EmptyName,

    /// Operation reserved for the administrator.
    #[error("administrator access required")]
    Forbidden,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
