//! Character repository backed by a JSON file
//!
//! Every write rewrites the whole document into a sibling temp file and
//! renames it over the original, so an interrupted write never leaves a
//! truncated store behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepositoryError};
use crate::domain::entities::Character;

pub struct JsonFileCharacterRepository {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileCharacterRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing and empty files both read as an empty store
    async fn load(&self) -> Result<Vec<Character>, RepositoryError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    async fn write(&self, characters: &[Character]) -> Result<(), RepositoryError> {
        let data = serde_json::to_vec_pretty(characters)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, &data).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o644)).await?;
        }
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), count = characters.len(), "Wrote character store");
        Ok(())
    }
}

#[async_trait]
impl CharacterRepositoryPort for JsonFileCharacterRepository {
    async fn save(&self, character: &Character) -> Result<(), RepositoryError> {
        let _guard = self.lock.write().await;

        let mut characters = self.load().await?;
        match characters
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(&character.name))
        {
            Some(existing) => *existing = character.clone(),
            None => characters.push(character.clone()),
        }

        self.write(&characters).await
    }

    async fn find_by_id(&self, name: &str) -> Result<Character, RepositoryError> {
        let _guard = self.lock.read().await;

        self.load()
            .await?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Character>, RepositoryError> {
        let _guard = self.lock.read().await;
        self.load().await
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let _guard = self.lock.write().await;

        let mut characters = self.load().await?;
        let before = characters.len();
        characters.retain(|c| !c.name.eq_ignore_ascii_case(name));
        if characters.len() == before {
            return Err(RepositoryError::NotFound(name.to_string()));
        }

        self.write(&characters).await
    }
}
