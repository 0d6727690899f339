//! Playable races

use crate::domain::value_objects::{AbilityKey, Skill};

use super::normalize_key;

#[derive(Debug)]
pub struct RaceRules {
    pub name: &'static str,
    pub ability_increases: &'static [(AbilityKey, i32)],
    /// A race grants at most one fixed skill proficiency
    pub skill: Option<Skill>,
}

use AbilityKey::*;

static RACES: &[RaceRules] = &[
    RaceRules {
        name: "human",
        ability_increases: &[
            (Strength, 1),
            (Dexterity, 1),
            (Constitution, 1),
            (Intelligence, 1),
            (Wisdom, 1),
            (Charisma, 1),
        ],
        skill: None,
    },
    RaceRules {
        name: "lightfoot halfling",
        ability_increases: &[(Dexterity, 2), (Charisma, 1)],
        skill: None,
    },
    RaceRules {
        name: "high elf",
        ability_increases: &[(Dexterity, 2), (Intelligence, 1)],
        skill: Some(Skill::Perception),
    },
    RaceRules {
        name: "half orc",
        ability_increases: &[(Strength, 2), (Constitution, 1)],
        skill: Some(Skill::Intimidation),
    },
    RaceRules {
        name: "hill dwarf",
        ability_increases: &[(Constitution, 2), (Wisdom, 1)],
        skill: Some(Skill::History),
    },
    RaceRules {
        name: "mountain dwarf",
        ability_increases: &[(Strength, 2), (Constitution, 2)],
        skill: None,
    },
    RaceRules {
        name: "dwarf",
        ability_increases: &[(Constitution, 2)],
        skill: Some(Skill::History),
    },
    RaceRules {
        name: "gnome",
        ability_increases: &[(Intelligence, 2)],
        skill: None,
    },
];

/// Look up a race; case-insensitive, "half-orc" and "half orc" are the same
pub fn race(name: &str) -> Option<&'static RaceRules> {
    let key = normalize_key(name);
    RACES.iter().find(|race| race.name == key)
}

pub fn all_races() -> impl Iterator<Item = &'static RaceRules> {
    RACES.iter()
}
