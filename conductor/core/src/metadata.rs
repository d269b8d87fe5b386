//! Character Metadata
//!
//! The display record for a character: pinyin, a short definition, and an
//! everyday example sentence with its translation. Metadata is produced by a
//! [`MetadataBackend`](crate::backend::MetadataBackend) and treated as opaque
//! text by everything downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::Character;

/// Definition used by the offline fallback for characters other than 猫
pub const OFFLINE_DEFINITION: &str = "Definition unavailable (No API Key)";

/// Metadata shown in the info panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMetadata {
    /// The character this record describes
    pub character: Character,
    /// Tone-marked pinyin (e.g. "māo")
    pub pinyin: String,
    /// Simple English definition
    pub definition: String,
    /// Colloquial Chinese example sentence
    pub example_sentence: String,
    /// English translation of the example sentence
    pub example_translation: String,
}

impl CharacterMetadata {
    /// The fallback record used when no metadata service is configured
    ///
    /// 猫 gets the full built-in record; any other character reuses it with
    /// the character swapped in and the definition marked unavailable.
    #[must_use]
    pub fn fallback_for(character: Character) -> Self {
        let cat = Self {
            character: Character::default(),
            pinyin: "māo".to_string(),
            definition: "cat".to_string(),
            example_sentence: "这只小猫真可爱！".to_string(),
            example_translation: "This little cat is so cute!".to_string(),
        };

        if character == cat.character {
            cat
        } else {
            Self {
                character,
                definition: OFFLINE_DEFINITION.to_string(),
                ..cat
            }
        }
    }
}

/// A metadata payload failed shape validation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// A required field is absent or blank
    #[error("metadata field '{0}' is missing or empty")]
    MissingField(&'static str),

    /// The character field does not hold a Chinese character
    #[error("metadata character '{0}' is not a Chinese character")]
    InvalidCharacter(String),
}

/// Unvalidated metadata as returned by a text-generation service
///
/// Every field is optional so a partial response reports which field is
/// missing instead of failing with a generic decode error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPayload {
    /// Character echoed back by the service
    pub character: Option<String>,
    /// Pinyin
    pub pinyin: Option<String>,
    /// Definition
    pub definition: Option<String>,
    /// Example sentence
    pub example_sentence: Option<String>,
    /// Example translation
    pub example_translation: Option<String>,
}

impl MetadataPayload {
    /// Validate the payload for the character that was requested
    ///
    /// All five fields must be present and non-blank. When the service echoes a
    /// different (but valid) character the record is re-keyed to `requested`,
    /// since the request is what the board is showing.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] naming the first field that fails.
    pub fn validate(self, requested: Character) -> Result<CharacterMetadata, MetadataError> {
        let echoed = required(self.character, "character")?;
        let echoed = Character::from_input(&echoed)
            .map_err(|_| MetadataError::InvalidCharacter(echoed.clone()))?;
        if echoed != requested {
            tracing::warn!(
                requested = %requested,
                echoed = %echoed,
                "Metadata service answered for a different character"
            );
        }

        Ok(CharacterMetadata {
            character: requested,
            pinyin: required(self.pinyin, "pinyin")?,
            definition: required(self.definition, "definition")?,
            example_sentence: required(self.example_sentence, "exampleSentence")?,
            example_translation: required(self.example_translation, "exampleTranslation")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, MetadataError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(MetadataError::MissingField(field)),
    }
}
