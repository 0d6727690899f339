//! Equippable items: weapons, armor and shields

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A weapon from the SRD catalog
///
/// Catalog rows only carry a name; the remaining fields are filled in by
/// enrichment when the weapon is equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub item_type: String,
    pub category: String,
    pub range: String,
    pub damage: String,
    pub two_handed: bool,
}

impl Weapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: "Weapon".to_string(),
            ..Default::default()
        }
    }

    pub fn two_handed(mut self) -> Self {
        self.two_handed = true;
        self
    }
}

/// How much of the DEX modifier a piece of armor lets through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DexCap {
    #[default]
    Full,
    /// Capped at +2
    Limited,
    None,
}

impl DexCap {
    pub fn apply(&self, dex_modifier: i32) -> i32 {
        match self {
            Self::Full => dex_modifier,
            Self::Limited => dex_modifier.min(2),
            Self::None => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub item_type: String,
    pub category: String,
    pub base_ac: i32,
    pub dex_cap: DexCap,
}

impl Armor {
    pub fn new(name: impl Into<String>, base_ac: i32, dex_cap: DexCap) -> Self {
        Self {
            name: name.into(),
            item_type: "Armor".to_string(),
            category: String::new(),
            base_ac,
            dex_cap,
        }
    }

    /// AC granted by this armor for the given DEX modifier
    pub fn armor_class(&self, dex_modifier: i32) -> i32 {
        self.base_ac + self.dex_cap.apply(dex_modifier)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shield {
    pub name: String,
    pub item_type: String,
    pub category: String,
}

impl Shield {
    pub const AC_BONUS: i32 = 2;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: "Shield".to_string(),
            category: String::new(),
        }
    }
}

/// Hand a weapon is equipped in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponSlot {
    MainHand,
    OffHand,
}

impl WeaponSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainHand => "main hand",
            Self::OffHand => "off hand",
        }
    }
}

impl fmt::Display for WeaponSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main hand" => Ok(Self::MainHand),
            "off hand" => Ok(Self::OffHand),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dex_cap() {
        assert_eq!(DexCap::Full.apply(4), 4);
        assert_eq!(DexCap::Limited.apply(4), 2);
        assert_eq!(DexCap::Limited.apply(-1), -1);
        assert_eq!(DexCap::None.apply(4), 0);
    }

    #[test]
    fn test_armor_class() {
        let chain_shirt = Armor::new("chain shirt", 13, DexCap::Limited);
        assert_eq!(chain_shirt.armor_class(3), 15);
    }

    #[test]
    fn test_weapon_slot_parsing() {
        assert_eq!("Main Hand".parse::<WeaponSlot>(), Ok(WeaponSlot::MainHand));
        assert_eq!("off hand".parse::<WeaponSlot>(), Ok(WeaponSlot::OffHand));
        assert_eq!("belt".parse::<WeaponSlot>(), Err("belt".to_string()));
    }
}
