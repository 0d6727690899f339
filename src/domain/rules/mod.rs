//! Rule tables - immutable reference data for the fifth-edition ruleset
//!
//! Race, class and background lookups are case-insensitive and treat
//! hyphens as spaces ("Half-Orc" == "half orc").

mod armor;
mod backgrounds;
mod classes;
mod races;
mod spell_slots;

pub use armor::armor_stats;
pub use backgrounds::background_skills;
pub use classes::{
    all_classes, casting_ability, caster_kind, class, default_skills, hit_die, slot_progression,
    unarmored_defense, ClassRules, HitDie,
};
pub use races::{all_races, race, RaceRules};
pub use spell_slots::SlotProgression;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

/// Accepted range for a base ability score, before racial increases
pub const MIN_ABILITY_SCORE: i32 = 1;
pub const MAX_ABILITY_SCORE: i32 = 30;

pub const MAX_SPELL_LEVEL: u8 = 9;

/// proficiency bonus = 2 + floor((level - 1) / 4)
pub fn proficiency_bonus(level: u8) -> i32 {
    2 + (i32::from(level) - 1).div_euclid(4)
}

pub(crate) fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_bonus_progression() {
        let expected = [(1, 2), (4, 2), (5, 3), (8, 3), (9, 4), (13, 5), (17, 6), (20, 6)];
        for (level, bonus) in expected {
            assert_eq!(proficiency_bonus(level), bonus, "level {}", level);
        }
    }
}
