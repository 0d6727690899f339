use async_trait::async_trait;

use crate::application::ports::outbound::EnrichmentPort;
use crate::domain::value_objects::{Armor, Spell, Weapon};

/// Enricher that never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEnricher;

#[async_trait]
impl EnrichmentPort for OfflineEnricher {
    async fn enrich_spell(&self, _spell: &mut Spell) {}

    async fn enrich_weapon(&self, _weapon: &mut Weapon) {}

    async fn enrich_armor(&self, _armor: &mut Armor) {}
}
