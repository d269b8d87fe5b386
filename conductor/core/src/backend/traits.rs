//! Metadata Backend Traits
//!
//! Trait definitions for character metadata sources. This abstraction lets the
//! Conductor ask "what does this character mean?" without knowing whether the
//! answer comes from a hosted text-generation model or the built-in fallback.
//!
//! Implementations handle provider-specific details (API formats, auth,
//! response schemas) and must return a record whose five text fields are all
//! present; shape validation happens before a record leaves the backend.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::character::Character;
use crate::metadata::{CharacterMetadata, MetadataError};

/// Default hosted model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL for the hosted model
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Longest response body kept in a [`BackendError::Status`]
pub const STATUS_BODY_LIMIT: usize = 200;

/// Errors a metadata fetch can end with
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("metadata service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body on one line, cut to [`STATUS_BODY_LIMIT`] chars
        body: String,
    },

    /// Service answered without any text to parse
    #[error("metadata service returned an empty response")]
    EmptyResponse,

    /// Response text was not the JSON object we asked for
    #[error("metadata response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Response JSON failed shape validation
    #[error(transparent)]
    Invalid(#[from] MetadataError),

    /// Request exceeded the configured fetch timeout
    #[error("metadata request timed out after {0:?}")]
    Timeout(Duration),
}

impl BackendError {
    /// Status error with the body flattened to one line and truncated
    pub fn status(status: u16, body: &str) -> Self {
        let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
        let body = if flat.chars().count() > STATUS_BODY_LIMIT {
            let cut: String = flat.chars().take(STATUS_BODY_LIMIT).collect();
            format!("{cut}…")
        } else {
            flat
        };
        Self::Status { status, body }
    }
}

/// Metadata backend trait
///
/// Implement this trait to add support for another metadata provider.
#[async_trait]
pub trait MetadataBackend: Send + Sync {
    /// Get the backend name (e.g., "Gemini", "Offline")
    fn name(&self) -> &str;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Fetch validated metadata for a character
    async fn fetch(&self, character: Character) -> Result<CharacterMetadata, BackendError>;
}

#[async_trait]
impl MetadataBackend for Box<dyn MetadataBackend> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn health_check(&self) -> bool {
        (**self).health_check().await
    }

    async fn fetch(&self, character: Character) -> Result<CharacterMetadata, BackendError> {
        (**self).fetch(character).await
    }
}

/// Backend selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendConfig {
    /// Hosted Gemini model
    Gemini {
        /// API key for authentication
        api_key: String,
        /// Model identifier
        model: String,
        /// API base URL
        base_url: String,
    },
    /// Built-in fallback data, no network
    Offline,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Offline
    }
}

impl BackendConfig {
    /// Create Gemini configuration with the default model and endpoint
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::Gemini {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Select a backend from the environment
    ///
    /// Uses Gemini when `API_KEY` or `GEMINI_API_KEY` holds a non-empty key,
    /// otherwise falls back to offline data.
    #[must_use]
    pub fn from_env() -> Self {
        api_key_from_env().map_or(Self::Offline, Self::gemini)
    }

    /// Build the configured backend
    #[must_use]
    pub fn build(&self, request_timeout: Duration) -> Box<dyn MetadataBackend> {
        match self {
            Self::Gemini {
                api_key,
                model,
                base_url,
            } => Box::new(super::GeminiBackend::new(
                api_key.clone(),
                model.clone(),
                base_url.clone(),
                request_timeout,
            )),
            Self::Offline => Box::new(super::OfflineBackend),
        }
    }
}

/// Read the metadata API key from the environment
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    ["API_KEY", "GEMINI_API_KEY"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_default() {
        assert_eq!(BackendConfig::default(), BackendConfig::Offline);
    }

    #[test]
    fn test_gemini_config_defaults() {
        match BackendConfig::gemini("secret") {
            BackendConfig::Gemini {
                api_key,
                model,
                base_url,
            } => {
                assert_eq!(api_key, "secret");
                assert_eq!(model, DEFAULT_MODEL);
                assert_eq!(base_url, DEFAULT_BASE_URL);
            }
            BackendConfig::Offline => panic!("Expected Gemini config"),
        }
    }

    #[test]
    fn test_build_names() {
        let offline = BackendConfig::Offline.build(Duration::from_secs(1));
        assert_eq!(offline.name(), "Offline");

        let gemini = BackendConfig::gemini("k").build(Duration::from_secs(1));
        assert_eq!(gemini.name(), "Gemini");
    }

    #[test]
    fn test_status_body_truncated() {
        let page = format!("{{\n  \"error\": {{\n    \"message\": \"{}\"\n  }}\n}}", "错".repeat(500));
        let err = BackendError::status(400, &page);

        let BackendError::Status { status, body } = &err else {
            panic!("expected a status error");
        };
        assert_eq!(*status, 400);
        assert_eq!(body.chars().count(), STATUS_BODY_LIMIT + 1);
        assert!(body.ends_with('…'));
        assert!(!body.contains('\n'));
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_status_body_short_kept() {
        let err = BackendError::status(503, "  service\n unavailable ");
        assert_eq!(
            err.to_string(),
            "metadata service returned 503: service unavailable"
        );
    }

    #[test]
    fn test_error_display() {
        let err = BackendError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));

        let err = BackendError::from(MetadataError::MissingField("pinyin"));
        assert!(err.to_string().contains("pinyin"));
    }
}
