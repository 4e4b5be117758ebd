//! Error types for the craft advisor.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when requesting generated text.
///
/// The advisor never surfaces these to callers; they are logged and replaced
/// by a fallback string.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// The reply contained no text.
    #[error("empty response")]
    EmptyResponse,

    /// No reply within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The caller gave up before a reply arrived.
    #[error("request cancelled")]
    Cancelled,

    /// No API key is configured.
    #[error("text generation is not configured")]
    Disabled,
}

/// Error body returned by the Gemini API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric code (mirrors the HTTP status).
    #[serde(default)]
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Canonical status name (e.g., `INVALID_ARGUMENT`).
    #[serde(default)]
    pub status: Option<String>,
}
