//! Craft advisor: AI-written recommendations and product stories.
//!
//! Requests go through a [`TextGenerator`] under a timeout and may be
//! cancelled by the caller. Every failure path (no API key, HTTP or API
//! error, empty reply, timeout, cancellation) is logged and answered with a
//! fixed fallback string, so callers always get displayable text.
//!
//! Product stories are cached per product name using `moka` (1-hour TTL).

mod error;
mod gemini;

pub use error::GenerationError;
pub use gemini::GeminiClient;

use std::future::{Future, pending};
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use crate::config::GeminiConfig;

/// Shown when a recommendation cannot be generated.
pub const RECOMMENDATION_FALLBACK: &str =
    "Something unique is waiting for you! Explore our ceramics collection for inspiration.";

/// Shown when a product story cannot be generated.
pub const STORY_FALLBACK: &str =
    "Each piece is crafted with soul and intention, bringing timeless beauty to your space.";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const STORY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
const STORY_CACHE_CAPACITY: u64 = 500;

/// One generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Persona the model should adopt.
    pub system_instruction: String,
    /// The user-turn text.
    pub contents: String,
    /// Sampling temperature; the model default when `None`.
    pub temperature: Option<f32>,
}

impl Prompt {
    /// Prompt asking for a short DIY project or product suggestion.
    #[must_use]
    pub fn craft_recommendation(query_hint: &str) -> Self {
        Self {
            system_instruction: "You are a creative craft consultant for an artisanal store."
                .to_owned(),
            contents: format!(
                "User is interested in art and craft. Suggest a DIY craft project or a product \
                 type based on: {query_hint}. Keep it short and inspiring."
            ),
            temperature: Some(0.7),
        }
    }

    /// Prompt asking for a two-sentence poetic product description.
    #[must_use]
    pub fn product_story(product_name: &str) -> Self {
        Self {
            system_instruction: "You are a poetic copywriter for a high-end craft brand."
                .to_owned(),
            contents: format!(
                "Write a 2-sentence poetic description for a product named \"{product_name}\"."
            ),
            temperature: None,
        }
    }
}

/// Something that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for `prompt`.
    fn generate(
        &self,
        prompt: &Prompt,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Recommendation and story writer with fallbacks.
#[derive(Debug)]
pub struct CraftAdvisor<G = GeminiClient> {
    generator: Option<G>,
    timeout: Duration,
    stories: Cache<String, String>,
}

impl CraftAdvisor<GeminiClient> {
    /// Build a Gemini-backed advisor, or a disabled one when no API key is
    /// configured or the client cannot be built.
    #[must_use]
    pub fn from_config(config: Option<&GeminiConfig>) -> Self {
        let Some(config) = config else {
            debug!("No Gemini API key configured, craft advisor disabled");
            return Self::disabled();
        };

        match GeminiClient::new(config) {
            Ok(client) => Self::new(Some(client), config.timeout),
            Err(e) => {
                warn!(error = %e, "Failed to build Gemini client, craft advisor disabled");
                Self::disabled()
            }
        }
    }
}

impl<G: TextGenerator> CraftAdvisor<G> {
    /// Create an advisor. With no generator every call returns its fallback.
    #[must_use]
    pub fn new(generator: Option<G>, timeout: Duration) -> Self {
        let stories = Cache::builder()
            .max_capacity(STORY_CACHE_CAPACITY)
            .time_to_live(STORY_CACHE_TTL)
            .build();

        Self {
            generator,
            timeout,
            stories,
        }
    }

    /// An advisor that never calls out and always falls back.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, DEFAULT_TIMEOUT)
    }

    /// Whether a generator is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Suggest a craft project or product type for `query_hint`.
    pub async fn craft_recommendation(&self, query_hint: &str) -> String {
        self.craft_recommendation_or_cancel(query_hint, pending())
            .await
    }

    /// Like [`Self::craft_recommendation`], returning the fallback as soon
    /// as `cancel` completes.
    #[instrument(skip(self, cancel))]
    pub async fn craft_recommendation_or_cancel(
        &self,
        query_hint: &str,
        cancel: impl Future<Output = ()> + Send,
    ) -> String {
        let prompt = Prompt::craft_recommendation(query_hint);
        match self.request(&prompt, cancel).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Craft recommendation unavailable, using fallback");
                RECOMMENDATION_FALLBACK.to_owned()
            }
        }
    }

    /// Write a short poetic story for a product.
    pub async fn product_story(&self, product_name: &str) -> String {
        self.product_story_or_cancel(product_name, pending()).await
    }

    /// Like [`Self::product_story`], returning the fallback as soon as
    /// `cancel` completes. Only generated stories are cached.
    #[instrument(skip(self, cancel))]
    pub async fn product_story_or_cancel(
        &self,
        product_name: &str,
        cancel: impl Future<Output = ()> + Send,
    ) -> String {
        if let Some(story) = self.stories.get(product_name).await {
            debug!("Cache hit for product story");
            return story;
        }

        let prompt = Prompt::product_story(product_name);
        match self.request(&prompt, cancel).await {
            Ok(story) => {
                self.stories
                    .insert(product_name.to_owned(), story.clone())
                    .await;
                story
            }
            Err(e) => {
                warn!(error = %e, "Product story unavailable, using fallback");
                STORY_FALLBACK.to_owned()
            }
        }
    }

    async fn request(
        &self,
        prompt: &Prompt,
        cancel: impl Future<Output = ()> + Send,
    ) -> Result<String, GenerationError> {
        let generator = self.generator.as_ref().ok_or(GenerationError::Disabled)?;

        let text = tokio::select! {
            biased;
            () = cancel => return Err(GenerationError::Cancelled),
            result = tokio::time::timeout(self.timeout, generator.generate(prompt)) => {
                result.map_err(|_| GenerationError::Timeout(self.timeout))??
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text.to_owned())
    }
}
