//! Class table: spellcasting style, hit dice and default skill picks

use crate::domain::value_objects::{AbilityKey, CasterKind, Skill};

use super::normalize_key;
use super::spell_slots::SlotProgression;

/// Hit die size and the fixed per-level average taken after level 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitDie {
    pub max: i32,
    pub average: i32,
}

impl HitDie {
    pub const D6: HitDie = HitDie { max: 6, average: 4 };
    pub const D8: HitDie = HitDie { max: 8, average: 5 };
    pub const D10: HitDie = HitDie { max: 10, average: 6 };
}

#[derive(Debug)]
pub struct ClassRules {
    pub name: &'static str,
    pub caster_kind: CasterKind,
    pub casting_ability: Option<AbilityKey>,
    pub slot_progression: Option<SlotProgression>,
    pub hit_die: HitDie,
    /// Ability added to 10 + DEX when fighting without armor
    pub unarmored_defense: Option<AbilityKey>,
    /// Used when the player picks no skills of their own
    pub default_skills: &'static [Skill],
}

use AbilityKey::*;
use Skill::*;

static CLASSES: &[ClassRules] = &[
    ClassRules {
        name: "fighter",
        caster_kind: CasterKind::None,
        casting_ability: None,
        slot_progression: None,
        hit_die: HitDie::D10,
        unarmored_defense: None,
        default_skills: &[Acrobatics, AnimalHandling],
    },
    ClassRules {
        name: "rogue",
        caster_kind: CasterKind::None,
        casting_ability: None,
        slot_progression: None,
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[Acrobatics, Athletics, Deception, Insight],
    },
    ClassRules {
        name: "barbarian",
        caster_kind: CasterKind::None,
        casting_ability: None,
        slot_progression: None,
        hit_die: HitDie::D6,
        unarmored_defense: Some(Constitution),
        default_skills: &[AnimalHandling, Athletics],
    },
    ClassRules {
        name: "monk",
        caster_kind: CasterKind::None,
        casting_ability: None,
        slot_progression: None,
        hit_die: HitDie::D6,
        unarmored_defense: Some(Wisdom),
        default_skills: &[Acrobatics, Athletics],
    },
    ClassRules {
        name: "wizard",
        caster_kind: CasterKind::Prepared,
        casting_ability: Some(Intelligence),
        slot_progression: Some(SlotProgression::Full),
        hit_die: HitDie::D6,
        unarmored_defense: None,
        default_skills: &[Arcana, History],
    },
    ClassRules {
        name: "cleric",
        caster_kind: CasterKind::Prepared,
        casting_ability: Some(Wisdom),
        slot_progression: Some(SlotProgression::Full),
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[History, Insight],
    },
    ClassRules {
        name: "druid",
        caster_kind: CasterKind::Prepared,
        casting_ability: Some(Wisdom),
        slot_progression: Some(SlotProgression::Full),
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[Medicine, Nature],
    },
    ClassRules {
        name: "paladin",
        caster_kind: CasterKind::Prepared,
        casting_ability: Some(Charisma),
        slot_progression: Some(SlotProgression::Half),
        hit_die: HitDie::D10,
        unarmored_defense: None,
        default_skills: &[Athletics, Insight],
    },
    ClassRules {
        name: "sorcerer",
        caster_kind: CasterKind::Learned,
        casting_ability: Some(Charisma),
        slot_progression: Some(SlotProgression::Full),
        hit_die: HitDie::D6,
        unarmored_defense: None,
        default_skills: &[Intimidation, Persuasion],
    },
    ClassRules {
        name: "warlock",
        caster_kind: CasterKind::Learned,
        casting_ability: Some(Charisma),
        slot_progression: Some(SlotProgression::Pact),
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[Arcana, Deception],
    },
    ClassRules {
        name: "bard",
        caster_kind: CasterKind::Learned,
        casting_ability: Some(Charisma),
        slot_progression: Some(SlotProgression::Full),
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[Deception, Performance, Persuasion],
    },
    ClassRules {
        name: "ranger",
        caster_kind: CasterKind::Learned,
        casting_ability: Some(Wisdom),
        slot_progression: Some(SlotProgression::Half),
        hit_die: HitDie::D8,
        unarmored_defense: None,
        default_skills: &[Nature, Stealth, Survival],
    },
];

pub fn class(name: &str) -> Option<&'static ClassRules> {
    let key = normalize_key(name);
    CLASSES.iter().find(|class| class.name == key)
}

pub fn all_classes() -> impl Iterator<Item = &'static ClassRules> {
    CLASSES.iter()
}

pub fn caster_kind(class_name: &str) -> CasterKind {
    class(class_name).map_or(CasterKind::None, |c| c.caster_kind)
}

/// Unknown classes roll a d6
pub fn hit_die(class_name: &str) -> HitDie {
    class(class_name).map_or(HitDie::D6, |c| c.hit_die)
}

pub fn unarmored_defense(class_name: &str) -> Option<AbilityKey> {
    class(class_name).and_then(|c| c.unarmored_defense)
}

pub fn casting_ability(class_name: &str) -> Option<AbilityKey> {
    class(class_name).and_then(|c| c.casting_ability)
}

pub fn slot_progression(class_name: &str) -> Option<SlotProgression> {
    class(class_name).and_then(|c| c.slot_progression)
}

pub fn default_skills(class_name: &str) -> &'static [Skill] {
    class(class_name).map(|c| c.default_skills).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caster_kinds() {
        assert_eq!(caster_kind("Wizard"), CasterKind::Prepared);
        assert_eq!(caster_kind("warlock"), CasterKind::Learned);
        assert_eq!(caster_kind("FIGHTER"), CasterKind::None);
        assert_eq!(caster_kind("artificer"), CasterKind::None);
    }

    #[test]
    fn test_hit_dice_are_case_insensitive() {
        assert_eq!(hit_die("Fighter"), HitDie::D10);
        assert_eq!(hit_die("fighter"), HitDie::D10);
        assert_eq!(hit_die("ROGUE"), HitDie::D8);
        assert_eq!(hit_die("sorcerer"), HitDie::D6);
        assert_eq!(hit_die("unknown"), HitDie::D6);
    }

    #[test]
    fn test_every_caster_has_an_ability_and_a_progression() {
        for class in all_classes() {
            assert_eq!(
                class.caster_kind.is_caster(),
                class.casting_ability.is_some(),
                "{}",
                class.name
            );
            assert_eq!(
                class.caster_kind.is_caster(),
                class.slot_progression.is_some(),
                "{}",
                class.name
            );
        }
    }
}
