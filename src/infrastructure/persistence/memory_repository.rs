use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepositoryError};
use crate::domain::entities::Character;

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Map-backed repository for service tests, keyed by lowercase name
#[derive(Default)]
pub struct InMemoryCharacterRepository {
    characters: RwLock<BTreeMap<String, Character>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn save(&self, character: &Character) -> Result<(), RepositoryError> {
        self.characters
            .write()
            .await
            .insert(key(&character.name), character.clone());
        Ok(())
    }

    async fn find_by_id(&self, name: &str) -> Result<Character, RepositoryError> {
        self.characters
            .read()
            .await
            .get(&key(name))
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Character>, RepositoryError> {
        Ok(self.characters.read().await.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        self.characters
            .write()
            .await
            .remove(&key(name))
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }
}
