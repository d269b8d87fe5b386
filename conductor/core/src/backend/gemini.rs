//! Gemini Backend Implementation
//!
//! Metadata backend for Google's Gemini text-generation API.
//!
//! # Gemini API
//!
//! - `POST /v1beta/models/{model}:generateContent` - generate content
//! - `GET /v1beta/models/{model}` - model info (used as a health check)
//!
//! The request sets `responseMimeType: application/json` together with a
//! response schema that requires all five metadata fields, so the model's text
//! part is itself a JSON object. That text is parsed into a
//! [`MetadataPayload`] and validated before it is returned.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::traits::{BackendError, MetadataBackend};
use crate::character::Character;
use crate::metadata::{CharacterMetadata, MetadataPayload};

/// Gemini backend client
#[derive(Clone)]
pub struct GeminiBackend {
    /// API key (sent as `x-goog-api-key`)
    api_key: String,
    /// Model identifier
    model: String,
    /// API base URL
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Get the model URL
    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.base_url, self.model)
    }

    /// Get generateContent endpoint URL
    fn generate_url(&self) -> String {
        format!("{}:generateContent", self.model_url())
    }

    /// Build the prompt for a character
    fn build_prompt(character: Character) -> String {
        format!(
            "Provide fun and friendly information for the Chinese character: \"{character}\". \
             Return the Pinyin, a simple English definition, a natural and colloquial Chinese \
             example sentence (something a friend would say in daily life, keep it simple), \
             and the English translation of that sentence."
        )
    }

    /// Build the generateContent request body
    fn build_request(character: Character) -> Value {
        let string = json!({ "type": "STRING" });
        json!({
            "contents": [
                { "parts": [ { "text": Self::build_prompt(character) } ] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "character": string,
                        "pinyin": string,
                        "definition": string,
                        "exampleSentence": string,
                        "exampleTranslation": string,
                    },
                    "required": [
                        "character",
                        "pinyin",
                        "definition",
                        "exampleSentence",
                        "exampleTranslation"
                    ],
                },
            },
        })
    }

    /// Pull the concatenated text parts out of the first candidate
    fn extract_text(data: &Value) -> Option<String> {
        let parts = data
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Turn a generateContent response into validated metadata
    fn parse_response(
        data: &Value,
        character: Character,
    ) -> Result<CharacterMetadata, BackendError> {
        let text = Self::extract_text(data).ok_or(BackendError::EmptyResponse)?;
        let payload: MetadataPayload = serde_json::from_str(text.trim())?;
        Ok(payload.validate(character)?)
    }
}

#[async_trait]
impl MetadataBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }

    async fn fetch(&self, character: Character) -> Result<CharacterMetadata, BackendError> {
        tracing::debug!(character = %character, model = %self.model, "Requesting metadata");

        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(character))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, body = %body, "Metadata service error response");
            return Err(BackendError::status(status, &body));
        }

        let data: Value = response.json().await?;
        Self::parse_response(&data, character)
    }
}
