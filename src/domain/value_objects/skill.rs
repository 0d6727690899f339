//! The eighteen skills and their governing abilities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AbilityKey;

/// A skill, serialized by its canonical Title Case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Acrobatics,
    #[serde(rename = "Animal Handling")]
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    #[serde(rename = "Sleight of Hand")]
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Self::Acrobatics,
        Self::AnimalHandling,
        Self::Arcana,
        Self::Athletics,
        Self::Deception,
        Self::History,
        Self::Insight,
        Self::Intimidation,
        Self::Investigation,
        Self::Medicine,
        Self::Nature,
        Self::Perception,
        Self::Performance,
        Self::Persuasion,
        Self::Religion,
        Self::SleightOfHand,
        Self::Stealth,
        Self::Survival,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Acrobatics => "Acrobatics",
            Self::AnimalHandling => "Animal Handling",
            Self::Arcana => "Arcana",
            Self::Athletics => "Athletics",
            Self::Deception => "Deception",
            Self::History => "History",
            Self::Insight => "Insight",
            Self::Intimidation => "Intimidation",
            Self::Investigation => "Investigation",
            Self::Medicine => "Medicine",
            Self::Nature => "Nature",
            Self::Perception => "Perception",
            Self::Performance => "Performance",
            Self::Persuasion => "Persuasion",
            Self::Religion => "Religion",
            Self::SleightOfHand => "Sleight of Hand",
            Self::Stealth => "Stealth",
            Self::Survival => "Survival",
        }
    }

    pub fn ability(&self) -> AbilityKey {
        use AbilityKey::*;
        match self {
            Self::Athletics => Strength,
            Self::Acrobatics | Self::SleightOfHand | Self::Stealth => Dexterity,
            Self::Arcana | Self::History | Self::Investigation | Self::Nature | Self::Religion => {
                Intelligence
            }
            Self::AnimalHandling
            | Self::Insight
            | Self::Medicine
            | Self::Perception
            | Self::Survival => Wisdom,
            Self::Deception | Self::Intimidation | Self::Performance | Self::Persuasion => {
                Charisma
            }
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the canonical Title Case name only
impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.name() == s)
            .ok_or_else(|| format!("unknown skill '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(skill.name().parse::<Skill>(), Ok(skill));
        }
        assert!("sleight of hand".parse::<Skill>().is_err());
    }

    #[test]
    fn test_serializes_as_title_case() {
        let json = serde_json::to_string(&Skill::AnimalHandling).unwrap();
        assert_eq!(json, "\"Animal Handling\"");
    }

    #[test]
    fn test_governing_abilities() {
        assert_eq!(Skill::Athletics.ability(), AbilityKey::Strength);
        assert_eq!(Skill::Perception.ability(), AbilityKey::Wisdom);
        assert_eq!(Skill::Religion.ability(), AbilityKey::Intelligence);
        assert_eq!(Skill::Persuasion.ability(), AbilityKey::Charisma);
    }
}
