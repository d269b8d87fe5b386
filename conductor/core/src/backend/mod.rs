//! Metadata Backend Integration
//!
//! This module provides abstracted access to character metadata sources
//! through a common trait interface.
//!
//! # Available Backends
//!
//! - **Gemini**: hosted text-generation model with a JSON response schema
//! - **Offline**: built-in fallback record, used when no API key is configured
//!
//! # Usage
//!
//! ```ignore
//! use hanzi_conductor::backend::{BackendConfig, MetadataBackend};
//! use hanzi_conductor::Character;
//!
//! let backend = BackendConfig::from_env().build(Duration::from_secs(15));
//! let data = backend.fetch(Character::from_input("猫")?).await?;
//! ```

mod gemini;
mod offline;
mod traits;

pub use gemini::GeminiBackend;
pub use offline::OfflineBackend;
pub use traits::{
    api_key_from_env, BackendConfig, BackendError, MetadataBackend, DEFAULT_BASE_URL,
    DEFAULT_MODEL, STATUS_BODY_LIMIT,
};
