//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CITROPOTH_DATA_DIR` - Directory holding the stored entities (default: .citropoth)
//! - `CITROPOTH_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 150.00)
//! - `CITROPOTH_FLAT_SHIPPING_FEE` - Shipping charged otherwise (default: 15.00)
//! - `CITROPOTH_ADMIN_EMAIL` - Reserved administrator email
//! - `CITROPOTH_ADMIN_PASSWORD_HASH` - Argon2 PHC hash of the administrator password
//! - `GEMINI_API_KEY` - Gemini API key for the craft advisor (high entropy)
//! - `GEMINI_MODEL` - Model name (default: gemini-3-flash-preview)
//! - `GEMINI_TIMEOUT_SECS` - Advisor request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The two admin variables must be set together. Without them no
//! administrator exists.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use argon2::password_hash::PasswordHash;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use citropoth_core::{Email, Price};

use crate::services::cart::ShippingPolicy;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_DATA_DIR: &str = ".citropoth";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 10;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed blob store
    pub data_dir: PathBuf,
    /// Free-shipping threshold and flat fee
    pub shipping: ShippingPolicy,
    /// Reserved administrator identity, if configured
    pub admin: Option<AdminIdentity>,
    /// Craft advisor settings, if an API key is configured
    pub gemini: Option<GeminiConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// The reserved administrator credential.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct AdminIdentity {
    /// Administrator email (compared case-insensitively)
    pub email: Email,
    /// Argon2 PHC string
    pub password_hash: SecretString,
}

impl std::fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key (sent as `x-goog-api-key`)
    pub api_key: SecretString,
    /// Model name
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, if only one of the
    /// admin variables is set, or if the Gemini key fails validation
    /// (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let data_dir = PathBuf::from(env.or_default("CITROPOTH_DATA_DIR", DEFAULT_DATA_DIR));
        let defaults = ShippingPolicy::default();
        let shipping = ShippingPolicy {
            free_shipping_threshold: env
                .price("CITROPOTH_FREE_SHIPPING_THRESHOLD")?
                .unwrap_or(defaults.free_shipping_threshold),
            flat_fee: env
                .price("CITROPOTH_FLAT_SHIPPING_FEE")?
                .unwrap_or(defaults.flat_fee),
        };

        Ok(Self {
            data_dir,
            shipping,
            admin: AdminIdentity::from_env(&env)?,
            gemini: GeminiConfig::from_env(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }

    /// Defaults for a local profile rooted at `data_dir`: standard shipping,
    /// no administrator, no advisor.
    #[must_use]
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            shipping: ShippingPolicy::default(),
            admin: None,
            gemini: None,
            sentry_dsn: None,
        }
    }
}

impl AdminIdentity {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Option<Self>, ConfigError> {
        const EMAIL: &str = "CITROPOTH_ADMIN_EMAIL";
        const HASH: &str = "CITROPOTH_ADMIN_PASSWORD_HASH";

        match (env.optional(EMAIL), env.optional(HASH)) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(HASH.to_string())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar(EMAIL.to_string())),
            (Some(email), Some(hash)) => {
                let email = Email::parse(&email)
                    .map_err(|e| ConfigError::InvalidEnvVar(EMAIL.to_string(), e.to_string()))?;
                PasswordHash::new(&hash).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        HASH.to_string(),
                        format!("not an Argon2 PHC string: {e}"),
                    )
                })?;

                Ok(Some(Self {
                    email,
                    password_hash: SecretString::from(hash),
                }))
            }
        }
    }
}

impl GeminiConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = env.validated_secret("GEMINI_API_KEY")? else {
            return Ok(None);
        };

        let timeout_secs: u64 = env
            .parsed("GEMINI_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "GEMINI_TIMEOUT_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }

        Ok(Some(Self {
            api_key,
            model: env.or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup. Blank values count as unset.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an optional environment variable.
    fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Parse an optional non-negative amount.
    fn price(&self, key: &str) -> Result<Option<Price>, ConfigError> {
        self.parsed::<Decimal>(key)?
            .map(|amount| {
                Price::new(amount)
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Load and validate an optional secret.
    fn validated_secret(&self, key: &str) -> Result<Option<SecretString>, ConfigError> {
        let Some(value) = self.optional(key) else {
            return Ok(None);
        };
        validate_secret_strength(&value, key)?;
        Ok(Some(SecretString::from(value)))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
