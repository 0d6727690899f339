use serde::Serialize;

use crate::domain::entities::Character;
use crate::domain::value_objects::{AbilityKey, CasterKind, Skill, Spell};

/// One line in the character list
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSummaryDto {
    pub name: String,
    pub level: u8,
    pub race: String,
    pub class: String,
}

impl From<&Character> for CharacterSummaryDto {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            level: character.level,
            race: character.race.clone(),
            class: character.class.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityRowDto {
    pub abbreviation: &'static str,
    pub score: i32,
    pub modifier: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillRowDto {
    pub name: &'static str,
    pub ability: &'static str,
    pub modifier: i32,
    pub proficient: bool,
    pub expertise: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipmentLineDto {
    pub slot: &'static str,
    pub name: String,
    /// Enriched details, empty when enrichment never ran
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotRowDto {
    pub level: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpellLineDto {
    pub name: String,
    pub level: u8,
    pub school: String,
    pub range: String,
}

impl From<&Spell> for SpellLineDto {
    fn from(spell: &Spell) -> Self {
        Self {
            name: spell.name.clone(),
            level: spell.level,
            school: spell.school.clone(),
            range: spell.range.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpellcastingDto {
    pub ability: &'static str,
    pub save_dc: i32,
    pub attack_bonus: i32,
    pub slots: Vec<SlotRowDto>,
    /// Known spells for learned casters, prepared spells otherwise
    pub spells: Vec<SpellLineDto>,
    pub spells_label: &'static str,
}

/// A full character sheet, ready to print or render
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheetDto {
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: String,
    pub level: u8,
    pub proficiency_bonus: i32,
    pub abilities: Vec<AbilityRowDto>,
    pub skills: Vec<SkillRowDto>,
    /// Lowercase proficient skill names, sorted; a skill with expertise is
    /// listed twice
    pub proficiencies: Vec<String>,
    pub max_hit_points: i32,
    pub current_hit_points: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub passive_perception: i32,
    pub equipment: Vec<EquipmentLineDto>,
    pub spellcasting: Option<SpellcastingDto>,
}

impl From<&Character> for CharacterSheetDto {
    fn from(character: &Character) -> Self {
        let abilities = AbilityKey::ALL
            .into_iter()
            .filter_map(|key| {
                character.ability_scores.get(&key).map(|ability| AbilityRowDto {
                    abbreviation: key.abbreviation(),
                    score: ability.score,
                    modifier: ability.modifier,
                })
            })
            .collect();

        let skills = Skill::ALL
            .into_iter()
            .map(|skill| SkillRowDto {
                name: skill.name(),
                ability: skill.ability().abbreviation(),
                modifier: character.skill_modifier(skill),
                proficient: character.is_proficient(skill),
                expertise: character.has_expertise(skill),
            })
            .collect();

        let mut proficiencies: Vec<String> = Vec::new();
        for skill in character.proficient_skills() {
            let name = skill.name().to_lowercase();
            if character.has_expertise(skill) {
                proficiencies.push(name.clone());
            }
            proficiencies.push(name);
        }
        proficiencies.sort();

        Self {
            name: character.name.clone(),
            race: character.race.to_lowercase(),
            class: character.class.to_lowercase(),
            background: character.background.to_lowercase(),
            level: character.level,
            proficiency_bonus: character.proficiency_bonus,
            abilities,
            skills,
            proficiencies,
            max_hit_points: character.max_hit_points,
            current_hit_points: character.current_hit_points,
            armor_class: character.armor_class,
            initiative: character.initiative,
            passive_perception: character.passive_perception,
            equipment: equipment_lines(character),
            spellcasting: spellcasting(character),
        }
    }
}

fn equipment_lines(character: &Character) -> Vec<EquipmentLineDto> {
    let mut lines = Vec::new();

    if let Some(weapon) = &character.main_hand {
        lines.push(EquipmentLineDto {
            slot: "Main hand",
            name: weapon.name.clone(),
            detail: join_details(&[&weapon.damage, &weapon.range]),
        });
    }
    if let Some(weapon) = &character.off_hand {
        lines.push(EquipmentLineDto {
            slot: "Off hand",
            name: weapon.name.clone(),
            detail: join_details(&[&weapon.damage, &weapon.range]),
        });
    }
    if let Some(armor) = &character.armor {
        lines.push(EquipmentLineDto {
            slot: "Armor",
            name: armor.name.clone(),
            detail: armor.category.clone(),
        });
    }
    if let Some(shield) = &character.shield {
        lines.push(EquipmentLineDto {
            slot: "Shield",
            name: shield.name.clone(),
            detail: String::new(),
        });
    }

    lines
}

fn join_details(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn spellcasting(character: &Character) -> Option<SpellcastingDto> {
    let ability = character.spell_casting_ability?;

    let slots: Vec<SlotRowDto> = character
        .max_spell_slots
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(level, count)| SlotRowDto {
            level: *level,
            count: *count,
        })
        .collect();
    if slots.is_empty() {
        return None;
    }

    let (spells_label, spells) = match character.caster_kind {
        CasterKind::Learned => ("Known spells", &character.known_spells),
        _ => ("Prepared spells", &character.prepared_spells),
    };

    let mut spells: Vec<SpellLineDto> = spells.values().map(SpellLineDto::from).collect();
    spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));

    Some(SpellcastingDto {
        ability: ability.full_name(),
        save_dc: character.spell_save_dc,
        attack_bonus: character.spell_attack_bonus,
        slots,
        spells,
        spells_label,
    })
}
