//! Plain-text rendering of character sheets

use std::fmt::Write;

use crate::application::dto::{CharacterSheetDto, CharacterSummaryDto};

pub fn format_list(characters: &[CharacterSummaryDto]) -> String {
    let mut out = String::from("--- Character List ---\n");
    for c in characters {
        let _ = writeln!(out, "{}: Lvl {} {} {}", c.name, c.level, c.race, c.class);
    }
    out
}

pub fn format_sheet(sheet: &CharacterSheetDto) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Name: {}", sheet.name);
    let _ = writeln!(out, "Class: {}", sheet.class);
    let _ = writeln!(out, "Race: {}", sheet.race);
    let _ = writeln!(out, "Background: {}", sheet.background);
    let _ = writeln!(out, "Level: {}", sheet.level);

    out.push_str("Ability scores:\n");
    for ability in &sheet.abilities {
        let _ = writeln!(out, "  {}: {} ({:+})", ability.abbreviation, ability.score, ability.modifier);
    }

    let _ = writeln!(out, "Proficiency bonus: {:+}", sheet.proficiency_bonus);
    let _ = writeln!(out, "Skill proficiencies: {}", sheet.proficiencies.join(", "));
    let _ = writeln!(out, "Hit points: {}/{}", sheet.current_hit_points, sheet.max_hit_points);

    if let Some(casting) = &sheet.spellcasting {
        out.push_str("Spell slots:\n");
        for slot in &casting.slots {
            let _ = writeln!(out, "  Level {}: {}", slot.level, slot.count);
        }
        let _ = writeln!(out, "Spellcasting ability: {}", casting.ability);
        let _ = writeln!(out, "Spell save DC: {}", casting.save_dc);
        let _ = writeln!(out, "Spell attack bonus: {:+}", casting.attack_bonus);
        if !casting.spells.is_empty() {
            let names: Vec<&str> = casting.spells.iter().map(|s| s.name.as_str()).collect();
            let _ = writeln!(out, "{}: {}", casting.spells_label, names.join(", "));
        }
    }

    for item in &sheet.equipment {
        let _ = writeln!(out, "{}: {}", item.slot, item.name);
    }

    let _ = writeln!(out, "Armor class: {}", sheet.armor_class);
    let _ = writeln!(out, "Initiative bonus: {}", sheet.initiative);
    let _ = write!(out, "Passive perception: {}", sheet.passive_perception);

    out
}
