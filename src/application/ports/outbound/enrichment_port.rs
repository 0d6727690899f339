//! Enrichment port - best-effort hydration of sparse SRD records
//!
//! Implementations fill descriptive fields in place and never fail: a record
//! they cannot enrich is left exactly as it was.

use async_trait::async_trait;

use crate::domain::value_objects::{Armor, Spell, Weapon};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentPort: Send + Sync {
    /// Fill range and school
    async fn enrich_spell(&self, spell: &mut Spell);

    /// Fill damage, category, range and the two-handed flag
    async fn enrich_weapon(&self, weapon: &mut Weapon);

    /// Fill the armor category
    async fn enrich_armor(&self, armor: &mut Armor);
}
