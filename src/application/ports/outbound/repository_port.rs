//! Repository port - Interface for character persistence
//!
//! Application services depend on this trait, not on a concrete store.
//! Implementations must serialize `save`/`delete` against each other and
//! give `find_by_id`/`find_all` a consistent snapshot.

use async_trait::async_trait;

use crate::domain::entities::Character;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("character '{0}' not found")]
    NotFound(String),
    #[error("error accessing character store: {0}")]
    Io(#[from] std::io::Error),
    #[error("error decoding character data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Repository port for Character operations, keyed by character name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Insert or replace the character with the same name
    async fn save(&self, character: &Character) -> Result<(), RepositoryError>;

    /// Get a character by name
    async fn find_by_id(&self, name: &str) -> Result<Character, RepositoryError>;

    /// Every stored character, in storage order
    async fn find_all(&self) -> Result<Vec<Character>, RepositoryError>;

    /// Remove a character by name
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;
}
