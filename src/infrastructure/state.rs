//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::application::ports::outbound::EnrichmentPort;
use crate::application::services::{CharacterService, CharacterServiceImpl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dnd_api::{DndApiClient, OfflineEnricher, RateLimiter};
use crate::infrastructure::persistence::JsonFileCharacterRepository;
use crate::infrastructure::srd_loader;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub character_service: Arc<dyn CharacterService>,
}

impl AppState {
    pub async fn new(config: AppConfig, cancel: CancellationToken) -> Result<Self> {
        let (equipment_path, spells_path) =
            (config.equipment_path.clone(), config.spells_path.clone());
        let catalog = tokio::task::spawn_blocking(move || {
            srd_loader::load_catalog(&equipment_path, &spells_path)
        })
        .await
        .context("SRD loader task failed")?
        .context("failed to load static SRD data")?;

        let repository = JsonFileCharacterRepository::new(&config.characters_path);

        let enrichment: Arc<dyn EnrichmentPort> = if config.enrichment_enabled {
            let limiter = RateLimiter::new(config.api_burst, config.api_requests_per_second);
            Arc::new(
                DndApiClient::new(
                    &config.api_base_url,
                    Duration::from_secs(config.api_timeout_secs),
                    Arc::new(limiter),
                    cancel.clone(),
                )
                .context("failed to build SRD API client")?,
            )
        } else {
            tracing::info!("Enrichment disabled, using offline enricher");
            Arc::new(OfflineEnricher)
        };

        let character_service = CharacterServiceImpl::new(
            Arc::new(repository),
            enrichment,
            Arc::new(catalog),
            cancel,
        );

        Ok(Self {
            config,
            character_service: Arc::new(character_service),
        })
    }
}
