//! Gemini API client for text generation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GenerationError};
use super::{Prompt, TextGenerator};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.inner.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Api` if the API key is not a valid header
    /// value, or `GenerationError::Http` if the HTTP client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret()).map_err(|e| {
            GenerationError::Api {
                status: 0,
                message: format!("Invalid API key format: {e}"),
            }
        })?;
        api_key.set_sensitive(true);
        headers.insert("x-goog-api-key", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint: format!("{GEMINI_API_BASE}/{}:generateContent", config.model),
            }),
        })
    }

    /// Model name requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    async fn generate_content(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::from(prompt);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(api_error(status.as_u16(), body));
        }

        let reply: GenerateContentResponse = response.json().await?;
        reply.text().ok_or(GenerationError::EmptyResponse)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(
        &self,
        prompt: &Prompt,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        self.generate_content(prompt)
    }
}

/// Build an API error from a non-success response body.
fn api_error(status: u16, body: String) -> GenerationError {
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map_or(body, |parsed| parsed.error.message);
    GenerationError::Api { status, message }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    system_instruction: Content<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> From<&'a Prompt> for GenerateContentRequest<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        Self {
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &prompt.contents,
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &prompt.system_instruction,
                }],
            },
            generation_config: prompt
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let prompt = Prompt {
            system_instruction: "You are a creative craft consultant.".to_string(),
            contents: "Suggest something tactile.".to_string(),
            temperature: Some(0.5),
        };

        let value = serde_json::to_value(GenerateContentRequest::from(&prompt)).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            "Suggest something tactile."
        );
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are a creative craft consultant."
        );
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_request_without_temperature() {
        let prompt = Prompt {
            system_instruction: String::new(),
            contents: "Hello".to_string(),
            temperature: None,
        };

        let value = serde_json::to_value(GenerateContentRequest::from(&prompt)).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Try a coil pot. " }, { "text": "Start small." }]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.text().as_deref(),
            Some("Try a coil pot. Start small.")
        );
    }

    #[test]
    fn test_response_without_text() {
        let blocked = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;
        let response: GenerateContentResponse = serde_json::from_str(blocked).unwrap();
        assert!(response.text().is_none());

        let blank = r#"{ "candidates": [{ "content": { "parts": [{ "text": "   " }] } }] }"#;
        let response: GenerateContentResponse = serde_json::from_str(blank).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_uses_message_when_parsable() {
        let body = r#"{ "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" } }"#;
        let err = api_error(429, body.to_string());
        assert!(matches!(
            err,
            GenerationError::Api { status: 429, ref message } if message == "Quota exceeded"
        ));

        let err = api_error(502, "Bad Gateway".to_string());
        assert!(matches!(
            err,
            GenerationError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }
}
