//! SRD catalog - the spells and equipment a character can pick from
//!
//! Loaded once at startup and shared read-only. All lookups are
//! case-insensitive; keys are stored lowercase.

use std::collections::{BTreeMap, HashMap};

use super::value_objects::{normalize_spell_name, Armor, Shield, Spell, Weapon};

#[derive(Debug, Clone, Default)]
pub struct SrdCatalog {
    pub spells: BTreeMap<u8, Vec<Spell>>,
    pub weapons: HashMap<String, Weapon>,
    pub armors: HashMap<String, Armor>,
    pub shields: HashMap<String, Shield>,
}

impl SrdCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.entry(spell.level).or_default().push(spell);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.insert(catalog_key(&weapon.name), weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armors.insert(catalog_key(&armor.name), armor);
        self
    }

    pub fn with_shield(mut self, shield: Shield) -> Self {
        self.shields.insert(catalog_key(&shield.name), shield);
        self
    }

    /// Search every level for a spell by name
    pub fn find_spell(&self, name: &str) -> Option<&Spell> {
        let wanted = normalize_spell_name(name);
        self.spells
            .values()
            .flatten()
            .find(|spell| spell.name.eq_ignore_ascii_case(&wanted))
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(&catalog_key(name))
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.get(&catalog_key(name))
    }

    pub fn shield(&self, name: &str) -> Option<&Shield> {
        self.shields.get(&catalog_key(name))
    }

    pub fn spell_count(&self) -> usize {
        self.spells.values().map(Vec::len).sum()
    }
}

pub fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}
