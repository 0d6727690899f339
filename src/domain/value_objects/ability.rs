//! Ability scores and their modifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six ability keys, serialized as their three-letter abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityKey {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl AbilityKey {
    pub const ALL: [AbilityKey; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Lowercase full name, as shown on the sheet
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for AbilityKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| {
                key.abbreviation().eq_ignore_ascii_case(wanted)
                    || key.full_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown ability '{}'", s))
    }
}

/// A single ability score with its cached modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub score: i32,
    pub modifier: i32,
}

impl Ability {
    pub fn new(score: i32) -> Self {
        let mut ability = Self { score, modifier: 0 };
        ability.calculate_modifier();
        ability
    }

    /// modifier = floor((score - 10) / 2)
    pub fn calculate_modifier(&mut self) {
        self.modifier = self.score.saturating_sub(10).div_euclid(2);
    }

    pub fn increase(&mut self, bonus: i32) {
        self.score = self.score.saturating_add(bonus);
        self.calculate_modifier();
    }
}
