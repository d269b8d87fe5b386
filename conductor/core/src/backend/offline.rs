//! Offline Backend
//!
//! Serves the built-in fallback record so the board stays usable without a
//! metadata credential.

use async_trait::async_trait;

use super::traits::{BackendError, MetadataBackend};
use crate::character::Character;
use crate::metadata::CharacterMetadata;

/// Backend that never touches the network
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineBackend;

#[async_trait]
impl MetadataBackend for OfflineBackend {
    fn name(&self) -> &'static str {
        "Offline"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn fetch(&self, character: Character) -> Result<CharacterMetadata, BackendError> {
        tracing::warn!(character = %character, "No API key found, returning fallback metadata");
        Ok(CharacterMetadata::fallback_for(character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::OFFLINE_DEFINITION;

    #[tokio::test]
    async fn test_offline_cat() {
        let data = OfflineBackend
            .fetch(Character::from_input("猫").unwrap())
            .await
            .unwrap();
        assert_eq!(data.pinyin, "māo");
        assert_eq!(data.definition, "cat");
    }

    #[tokio::test]
    async fn test_offline_other() {
        let data = OfflineBackend
            .fetch(Character::from_input("学").unwrap())
            .await
            .unwrap();
        assert_eq!(data.character.as_char(), '学');
        assert_eq!(data.definition, OFFLINE_DEFINITION);
    }
}
