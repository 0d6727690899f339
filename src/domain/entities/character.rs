//! Character entity - a player character and its derived statistics
//!
//! Every derived field (proficiency bonus, hit points, armor class, spell
//! statistics, slot table) is a function of the raw inputs. `recompute` runs
//! the whole derivation in one pass and is called after every mutation and
//! after every load, so stored values are only ever a cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::rules;
use crate::domain::value_objects::{
    Ability, AbilityKey, Armor, CasterKind, Shield, Skill, Spell, Weapon, WeaponSlot,
};

/// A player character, identified by its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: String,
    pub level: u8,
    pub proficiency_bonus: i32,
    #[serde(default)]
    pub caster_kind: CasterKind,

    // Combat
    pub max_hit_points: i32,
    pub current_hit_points: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub passive_perception: i32,

    pub ability_scores: BTreeMap<AbilityKey, Ability>,
    /// Always holds all eighteen skills
    #[serde(default)]
    pub skill_proficiencies: BTreeMap<Skill, bool>,
    /// Expertise implies proficiency
    #[serde(default)]
    pub skill_expertise: BTreeMap<Skill, bool>,

    // Equipment
    #[serde(default)]
    pub main_hand: Option<Weapon>,
    #[serde(default)]
    pub off_hand: Option<Weapon>,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default)]
    pub shield: Option<Shield>,

    // Spellcasting
    /// Keyed by normalised spell name; only used by learned casters
    #[serde(default)]
    pub known_spells: BTreeMap<String, Spell>,
    /// Keyed by normalised spell name; only used by prepared casters
    #[serde(default)]
    pub prepared_spells: BTreeMap<String, Spell>,
    /// Spell level (0 = cantrips) to slot count
    #[serde(default)]
    pub max_spell_slots: BTreeMap<u8, u32>,
    #[serde(default)]
    pub spell_casting_ability: Option<AbilityKey>,
    #[serde(default)]
    pub spell_save_dc: i32,
    #[serde(default)]
    pub spell_attack_bonus: i32,
}

impl Character {
    /// Build a level 1 character from six ability scores, applying racial
    /// increases. Derived combat and spell statistics are left for
    /// `recompute`.
    pub fn new(
        name: impl Into<String>,
        race: impl Into<String>,
        class: impl Into<String>,
        background: impl Into<String>,
        scores: &BTreeMap<AbilityKey, i32>,
    ) -> Result<Self, DomainError> {
        if scores.len() != AbilityKey::ALL.len() {
            return Err(DomainError::InvalidScoreCount(scores.len()));
        }

        let race = race.into();
        let class = class.into();

        let mut ability_scores: BTreeMap<AbilityKey, Ability> = scores
            .iter()
            .map(|(key, score)| (*key, Ability::new(*score)))
            .collect();

        if let Some(race_rules) = rules::race(&race) {
            for (key, bonus) in race_rules.ability_increases {
                if let Some(ability) = ability_scores.get_mut(key) {
                    ability.increase(*bonus);
                }
            }
        }

        let mut character = Self {
            name: name.into(),
            caster_kind: rules::caster_kind(&class),
            race,
            class,
            background: background.into(),
            level: rules::MIN_LEVEL,
            proficiency_bonus: 0,
            max_hit_points: 0,
            current_hit_points: 0,
            armor_class: 0,
            initiative: 0,
            passive_perception: 0,
            ability_scores,
            skill_proficiencies: Skill::ALL.into_iter().map(|skill| (skill, false)).collect(),
            skill_expertise: BTreeMap::new(),
            main_hand: None,
            off_hand: None,
            armor: None,
            shield: None,
            known_spells: BTreeMap::new(),
            prepared_spells: BTreeMap::new(),
            max_spell_slots: BTreeMap::new(),
            spell_casting_ability: None,
            spell_save_dc: 0,
            spell_attack_bonus: 0,
        };
        character.update_proficiency_bonus(rules::MIN_LEVEL);
        Ok(character)
    }

    /// Modifier for an ability, 0 when the score is missing
    pub fn ability_modifier(&self, key: AbilityKey) -> i32 {
        self.ability_scores.get(&key).map_or(0, |a| a.modifier)
    }

    pub fn is_proficient(&self, skill: Skill) -> bool {
        self.skill_proficiencies.get(&skill).copied().unwrap_or(false)
    }

    pub fn has_expertise(&self, skill: Skill) -> bool {
        self.skill_expertise.get(&skill).copied().unwrap_or(false)
    }

    pub fn proficient_skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.skill_proficiencies
            .iter()
            .filter(|(_, proficient)| **proficient)
            .map(|(skill, _)| *skill)
    }

    pub fn expertise_skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.skill_expertise
            .iter()
            .filter(|(_, expert)| **expert)
            .map(|(skill, _)| *skill)
    }

    /// Mark skills proficient. A skill that is already proficient is
    /// promoted to expertise instead.
    pub fn set_skill_proficiencies<I>(&mut self, skills: I)
    where
        I: IntoIterator<Item = Skill>,
    {
        for skill in skills {
            if self.is_proficient(skill) {
                self.skill_expertise.insert(skill, true);
            }
            self.skill_proficiencies.insert(skill, true);
        }
    }

    pub fn update_proficiency_bonus(&mut self, level: u8) {
        self.level = level;
        self.proficiency_bonus = rules::proficiency_bonus(level);
    }

    /// Ability modifier plus the proficiency bonus when proficient.
    /// Expertise is tracked but does not double the bonus.
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        let mut modifier = self.ability_modifier(skill.ability());
        if self.is_proficient(skill) {
            modifier += self.proficiency_bonus;
        }
        modifier
    }

    pub fn calculate_max_hit_points(&mut self) {
        let die = rules::hit_die(&self.class);
        let con = self.ability_modifier(AbilityKey::Constitution);

        let mut total = die.max.saturating_add(con).max(1);
        for _ in 2..=self.level {
            total = total.saturating_add(die.average.saturating_add(con).max(1));
        }

        let prior_max = self.max_hit_points;
        self.max_hit_points = total;

        if self.current_hit_points <= 0
            || self.current_hit_points == prior_max
            || self.current_hit_points > total
        {
            self.current_hit_points = total;
        }
    }

    pub fn calculate_combat_stats(&mut self) {
        let dex = self.ability_modifier(AbilityKey::Dexterity);

        self.initiative = dex;
        self.passive_perception = 10 + self.skill_modifier(Skill::Perception);

        let base_ac = match &self.armor {
            Some(armor) if armor.base_ac > 0 => armor.armor_class(dex),
            Some(_) => 10 + dex,
            None => {
                let unarmored = rules::unarmored_defense(&self.class)
                    .map_or(0, |key| self.ability_modifier(key));
                10 + dex + unarmored
            }
        };

        self.armor_class = base_ac;
        if self.shield.is_some() {
            self.armor_class += Shield::AC_BONUS;
        }
    }

    pub fn calculate_spell_stats(&mut self) {
        let Some(ability) = rules::casting_ability(&self.class) else {
            self.spell_casting_ability = None;
            self.spell_save_dc = 0;
            self.spell_attack_bonus = 0;
            return;
        };

        let modifier = self.ability_modifier(ability);
        self.spell_casting_ability = Some(ability);
        self.spell_save_dc = 8 + self.proficiency_bonus + modifier;
        self.spell_attack_bonus = self.proficiency_bonus + modifier;
    }

    pub fn calculate_max_spell_slots(&mut self) {
        self.max_spell_slots.clear();

        let Some(progression) = rules::slot_progression(&self.class) else {
            return;
        };

        self.max_spell_slots.extend(progression.slots_at(self.level));
        if let Some(cantrips) = progression.cantrips_at(self.level).filter(|c| *c > 0) {
            self.max_spell_slots.insert(0, cantrips);
        }
    }

    /// Highest spell level with at least one slot (0 when only cantrips or none)
    pub fn max_slot_level(&self) -> u8 {
        self.max_spell_slots
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(level, _)| *level)
            .max()
            .unwrap_or(0)
    }

    pub fn slots_at(&self, spell_level: u8) -> u32 {
        self.max_spell_slots.get(&spell_level).copied().unwrap_or(0)
    }

    /// How many spells a prepared caster may hold: floor(level / 2) plus the
    /// casting modifier, never below 1. `None` when the class does not cast
    /// or the casting score is missing.
    pub fn preparation_limit(&self) -> Option<i32> {
        let ability = rules::casting_ability(&self.class)?;
        let score = self.ability_scores.get(&ability)?;
        Some((i32::from(self.level) / 2 + score.modifier).max(1))
    }

    pub fn equip_weapon_slot(
        &mut self,
        weapon: Weapon,
        slot: WeaponSlot,
    ) -> Result<(), DomainError> {
        match slot {
            WeaponSlot::MainHand => {
                if self.main_hand.is_some() {
                    return Err(DomainError::SlotOccupied(slot));
                }
                if weapon.two_handed {
                    self.off_hand = None;
                }
                self.main_hand = Some(weapon);
            }
            WeaponSlot::OffHand => {
                if self.off_hand.is_some() {
                    return Err(DomainError::SlotOccupied(slot));
                }
                if let Some(main) = self.main_hand.as_ref().filter(|w| w.two_handed) {
                    return Err(DomainError::MainHandTwoHanded(main.name.clone()));
                }
                self.off_hand = Some(weapon);
            }
        }
        Ok(())
    }

    /// Full derivation pass
    pub fn recompute(&mut self) {
        self.normalize_skill_flags();
        for ability in self.ability_scores.values_mut() {
            ability.calculate_modifier();
        }
        if self.main_hand.as_ref().is_some_and(|w| w.two_handed) {
            self.off_hand = None;
        }

        self.caster_kind = rules::caster_kind(&self.class);
        self.update_proficiency_bonus(self.level);
        self.calculate_max_hit_points();
        self.calculate_combat_stats();
        self.calculate_spell_stats();
        self.calculate_max_spell_slots();
    }

    fn normalize_skill_flags(&mut self) {
        for skill in Skill::ALL {
            self.skill_proficiencies.entry(skill).or_insert(false);
        }
        let proficiencies = &self.skill_proficiencies;
        self.skill_expertise
            .retain(|skill, expert| *expert && proficiencies.get(skill).copied().unwrap_or(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DexCap;

    fn standard_scores() -> BTreeMap<AbilityKey, i32> {
        BTreeMap::from([
            (AbilityKey::Strength, 15),
            (AbilityKey::Dexterity, 14),
            (AbilityKey::Constitution, 13),
            (AbilityKey::Intelligence, 12),
            (AbilityKey::Wisdom, 10),
            (AbilityKey::Charisma, 8),
        ])
    }

    fn character(race: &str, class: &str) -> Character {
        let mut c = Character::new("Tester", race, class, "acolyte", &standard_scores()).unwrap();
        c.recompute();
        c
    }

    #[test]
    fn test_new_requires_six_scores() {
        let mut scores = standard_scores();
        scores.remove(&AbilityKey::Charisma);
        let err = Character::new("X", "human", "fighter", "soldier", &scores).unwrap_err();
        assert_eq!(err, DomainError::InvalidScoreCount(5));
    }

    #[test]
    fn test_new_applies_racial_increases() {
        let c = character("hill dwarf", "fighter");
        assert_eq!(c.ability_scores[&AbilityKey::Constitution], Ability { score: 15, modifier: 2 });
        assert_eq!(c.ability_scores[&AbilityKey::Wisdom], Ability { score: 11, modifier: 0 });
        assert_eq!(c.ability_scores[&AbilityKey::Strength].score, 15);

        let human = character("Human", "fighter");
        assert_eq!(human.ability_scores[&AbilityKey::Charisma], Ability { score: 9, modifier: -1 });
    }

    #[test]
    fn test_new_initialises_all_skills_and_level_one() {
        let c = character("gnome", "wizard");
        assert_eq!(c.skill_proficiencies.len(), 18);
        assert!(c.skill_proficiencies.values().all(|p| !p));
        assert_eq!(c.level, 1);
        assert_eq!(c.proficiency_bonus, 2);
        assert_eq!(c.caster_kind, CasterKind::Prepared);
    }

    #[test]
    fn test_repeated_skill_becomes_expertise() {
        let mut c = character("human", "rogue");
        c.set_skill_proficiencies([Skill::Stealth, Skill::Insight]);
        c.set_skill_proficiencies([Skill::Insight]);
        assert!(c.is_proficient(Skill::Stealth));
        assert!(c.has_expertise(Skill::Insight));
        assert!(!c.has_expertise(Skill::Stealth));
    }

    #[test]
    fn test_skill_modifier_adds_proficiency_once() {
        let mut c = character("human", "rogue");
        // DEX 15 -> +2
        assert_eq!(c.skill_modifier(Skill::Stealth), 2);
        c.set_skill_proficiencies([Skill::Stealth, Skill::Stealth]);
        assert!(c.has_expertise(Skill::Stealth));
        assert_eq!(c.skill_modifier(Skill::Stealth), 4);
    }

    #[test]
    fn test_max_hit_points_by_level() {
        let mut c = character("hill dwarf", "Fighter");
        // CON 15 -> +2, d10: 10 + 2
        assert_eq!(c.max_hit_points, 12);
        assert_eq!(c.current_hit_points, 12);

        c.level = 5;
        c.recompute();
        // 12 + 4 * (6 + 2)
        assert_eq!(c.max_hit_points, 44);
        assert_eq!(c.current_hit_points, 44);
    }

    #[test]
    fn test_hit_points_floor_at_one_per_level() {
        let mut scores = standard_scores();
        scores.insert(AbilityKey::Constitution, 1);
        let mut c = Character::new("Frail", "gnome", "wizard", "sage", &scores).unwrap();
        c.update_proficiency_bonus(3);
        c.recompute();
        // CON 1 -> -5: every level floors at 1
        assert_eq!(c.max_hit_points, 3);
    }

    #[test]
    fn test_current_hit_points_keep_damage_and_clamp() {
        let mut c = character("human", "fighter");
        c.level = 3;
        c.recompute();
        let max = c.max_hit_points;

        c.current_hit_points = max - 5;
        c.recompute();
        assert_eq!(c.current_hit_points, max - 5);

        c.level = 1;
        c.recompute();
        assert!(c.current_hit_points <= c.max_hit_points);
        assert_eq!(c.current_hit_points, c.max_hit_points);
    }

    #[test]
    fn test_unarmored_armor_class() {
        // DEX 14 -> +2, CON 13 -> +1, WIS 10 -> 0
        assert_eq!(character("gnome", "wizard").armor_class, 12);
        assert_eq!(character("gnome", "barbarian").armor_class, 13);

        let mut monk = Character::new("Monk", "gnome", "monk", "hermit", &standard_scores()).unwrap();
        monk.ability_scores.insert(AbilityKey::Wisdom, Ability::new(16));
        monk.recompute();
        assert_eq!(monk.armor_class, 15);
    }

    #[test]
    fn test_armor_dex_caps_and_shield() {
        let mut scores = standard_scores();
        scores.insert(AbilityKey::Dexterity, 18);
        let mut c = Character::new("Tank", "gnome", "fighter", "soldier", &scores).unwrap();

        c.armor = Some(Armor::new("leather armor", 11, DexCap::Full));
        c.recompute();
        assert_eq!(c.armor_class, 15);

        c.armor = Some(Armor::new("half plate", 15, DexCap::Limited));
        c.recompute();
        assert_eq!(c.armor_class, 17);

        c.armor = Some(Armor::new("plate armor", 18, DexCap::None));
        c.shield = Some(Shield::new("shield"));
        c.recompute();
        assert_eq!(c.armor_class, 20);
    }

    #[test]
    fn test_armor_replaces_unarmored_defense() {
        let mut c = character("gnome", "barbarian");
        c.armor = Some(Armor::new("hide armor", 12, DexCap::Limited));
        c.recompute();
        assert_eq!(c.armor_class, 14);
    }

    #[test]
    fn test_initiative_and_passive_perception() {
        let mut c = character("high elf", "rogue");
        // DEX 16 -> +3
        assert_eq!(c.initiative, 3);
        assert_eq!(c.passive_perception, 10);

        c.set_skill_proficiencies([Skill::Perception]);
        c.recompute();
        assert_eq!(c.passive_perception, 12);
    }

    #[test]
    fn test_spell_stats() {
        let mut wizard = character("gnome", "wizard");
        // INT 14 -> +2
        assert_eq!(wizard.spell_casting_ability, Some(AbilityKey::Intelligence));
        assert_eq!(wizard.spell_save_dc, 12);
        assert_eq!(wizard.spell_attack_bonus, 4);

        wizard.level = 5;
        wizard.recompute();
        assert_eq!(wizard.spell_save_dc, 13);

        let fighter = character("gnome", "fighter");
        assert_eq!(fighter.spell_casting_ability, None);
        assert_eq!(fighter.spell_save_dc, 0);
        assert_eq!(fighter.spell_attack_bonus, 0);
    }

    #[test]
    fn test_slot_table_matches_progression_for_every_class_and_level() {
        for class in rules::all_classes() {
            for level in rules::MIN_LEVEL..=rules::MAX_LEVEL {
                let mut c = Character::new("Slots", "human", class.name, "sage", &standard_scores())
                    .unwrap();
                c.update_proficiency_bonus(level);
                c.calculate_max_spell_slots();

                let mut expected = BTreeMap::new();
                if let Some(progression) = class.slot_progression {
                    expected.extend(progression.slots_at(level));
                    if let Some(cantrips) = progression.cantrips_at(level) {
                        expected.insert(0, cantrips);
                    }
                    let max = progression.max_spell_level();
                    assert!(c.max_spell_slots.keys().all(|l| *l <= max));
                }

                assert_eq!(c.max_spell_slots, expected, "{} level {}", class.name, level);
                if !c.caster_kind.is_caster() {
                    assert!(c.max_spell_slots.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_two_handed_main_hand_clears_off_hand() {
        let mut c = character("human", "fighter");
        c.equip_weapon_slot(Weapon::new("dagger"), WeaponSlot::OffHand).unwrap();
        c.equip_weapon_slot(Weapon::new("greatsword").two_handed(), WeaponSlot::MainHand)
            .unwrap();
        assert!(c.off_hand.is_none());

        let err = c
            .equip_weapon_slot(Weapon::new("handaxe"), WeaponSlot::OffHand)
            .unwrap_err();
        assert_eq!(err, DomainError::MainHandTwoHanded("greatsword".to_string()));
        assert!(c.off_hand.is_none());
    }

    #[test]
    fn test_occupied_slot_is_rejected() {
        let mut c = character("human", "fighter");
        c.equip_weapon_slot(Weapon::new("longsword"), WeaponSlot::MainHand).unwrap();
        let err = c
            .equip_weapon_slot(Weapon::new("mace"), WeaponSlot::MainHand)
            .unwrap_err();
        assert_eq!(err, DomainError::SlotOccupied(WeaponSlot::MainHand));
        assert_eq!(c.main_hand.as_ref().map(|w| w.name.as_str()), Some("longsword"));
    }

    #[test]
    fn test_preparation_limit() {
        let mut scores = standard_scores();
        scores.insert(AbilityKey::Intelligence, 16);
        let mut wizard = Character::new("Mage", "human", "wizard", "sage", &scores).unwrap();
        wizard.update_proficiency_bonus(4);
        // INT 17 -> +3, 4 / 2 + 3
        assert_eq!(wizard.preparation_limit(), Some(5));

        let mut weak = Character::new("Weak", "gnome", "cleric", "acolyte", &standard_scores())
            .unwrap();
        weak.ability_scores.insert(AbilityKey::Wisdom, Ability::new(3));
        assert_eq!(weak.preparation_limit(), Some(1));

        assert_eq!(character("human", "fighter").preparation_limit(), None);
    }

    #[test]
    fn test_round_trip_through_json_preserves_derivations() {
        let mut c = character("high elf", "warlock");
        c.set_skill_proficiencies([Skill::Arcana, Skill::Perception]);
        c.level = 7;
        c.armor = Some(Armor::new("leather armor", 11, DexCap::Full));
        c.recompute();

        let json = serde_json::to_string_pretty(&c).unwrap();
        let mut loaded: Character = serde_json::from_str(&json).unwrap();
        loaded.recompute();
        assert_eq!(loaded, c);
    }

    #[test]
    fn test_recompute_restores_invariants_of_stale_records() {
        let mut c = character("human", "fighter");
        c.skill_proficiencies.remove(&Skill::Nature);
        c.skill_expertise.insert(Skill::Arcana, true);
        c.proficiency_bonus = 99;
        c.recompute();

        assert_eq!(c.skill_proficiencies.len(), 18);
        assert!(!c.has_expertise(Skill::Arcana));
        assert_eq!(c.proficiency_bonus, 2);
    }
}
