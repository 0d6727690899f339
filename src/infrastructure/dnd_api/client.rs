//! Client for the public 5e SRD API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::rate_limiter::RateLimiter;
use crate::application::ports::outbound::EnrichmentPort;
use crate::domain::value_objects::{Armor, Spell, Weapon};

#[derive(Debug, thiserror::Error)]
pub enum DndApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("request cancelled")]
    Cancelled,
}

/// Lowercase with spaces replaced by hyphens
pub fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

pub struct DndApiClient {
    client: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
    cancel: CancellationToken,
}

impl DndApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        limiter: Arc<RateLimiter>,
        cancel: CancellationToken,
    ) -> Result<Self, DndApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter,
            cancel,
        })
    }

    async fn get_resource<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DndApiError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(DndApiError::Cancelled),
            _ = self.limiter.acquire() => {}
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DndApiError::Cancelled),
            result = self.send(endpoint) => result,
        }
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DndApiError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(DndApiError::ApiError(format!(
                "{} returned {}",
                endpoint,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_spell(&self, name: &str) -> Result<ApiSpell, DndApiError> {
        self.get_resource(&format!("spells/{}", slug(name))).await
    }

    async fn fetch_equipment<T: DeserializeOwned>(&self, name: &str) -> Result<T, DndApiError> {
        self.get_resource(&format!("equipment/{}", slug(name))).await
    }
}

#[async_trait]
impl EnrichmentPort for DndApiClient {
    async fn enrich_spell(&self, spell: &mut Spell) {
        if spell.name.is_empty() {
            return;
        }
        match self.fetch_spell(&spell.name).await {
            Ok(api) => api.apply(spell),
            Err(e) => tracing::debug!(spell = %spell.name, error = %e, "Spell enrichment skipped"),
        }
    }

    async fn enrich_weapon(&self, weapon: &mut Weapon) {
        match self.fetch_equipment::<ApiWeapon>(&weapon.name).await {
            Ok(api) => api.apply(weapon),
            Err(e) => tracing::debug!(weapon = %weapon.name, error = %e, "Weapon enrichment skipped"),
        }
    }

    async fn enrich_armor(&self, armor: &mut Armor) {
        match self.fetch_equipment::<ApiArmor>(&armor.name).await {
            Ok(api) => api.apply(armor),
            Err(e) => tracing::debug!(armor = %armor.name, error = %e, "Armor enrichment skipped"),
        }
    }
}

// API response types, reduced to the fields we copy

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiSpell {
    range: String,
    school: NamedRef,
}

impl ApiSpell {
    fn apply(self, spell: &mut Spell) {
        spell.range = self.range;
        spell.school = self.school.name;
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiDamage {
    damage_dice: String,
    damage_type: NamedRef,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiRange {
    normal: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiWeapon {
    category_range: String,
    damage: ApiDamage,
    properties: Vec<NamedRef>,
    range: ApiRange,
}

impl ApiWeapon {
    fn apply(self, weapon: &mut Weapon) {
        if !self.damage.damage_dice.is_empty() {
            weapon.damage = if self.damage.damage_type.name.is_empty() {
                self.damage.damage_dice
            } else {
                format!("{} {}", self.damage.damage_dice, self.damage.damage_type.name)
            };
        }

        weapon.category = self.category_range;
        weapon.range = if self.range.normal > 5 {
            format!("{} ft. (Ranged)", self.range.normal)
        } else {
            "5 ft. (Melee)".to_string()
        };
        weapon.two_handed = self.properties.iter().any(|p| p.name == "Two-Handed");
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiArmor {
    armor_category: String,
}

impl ApiArmor {
    fn apply(self, armor: &mut Armor) {
        armor.category = self.armor_category;
    }
}
