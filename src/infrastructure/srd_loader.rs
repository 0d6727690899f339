//! Loads the SRD catalog from the equipment and spell CSV tables

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::catalog::{catalog_key, SrdCatalog};
use crate::domain::rules::{self, armor_stats};
use crate::domain::value_objects::{Armor, Shield, Spell, Weapon};

/// Read both tables into a fresh catalog
pub fn load_catalog(equipment_path: &Path, spells_path: &Path) -> Result<SrdCatalog> {
    let spells = File::open(spells_path)
        .with_context(|| format!("could not open spells file {}", spells_path.display()))?;
    let catalog = load_spells(SrdCatalog::new(), spells).context("error reading spells CSV")?;

    let equipment = File::open(equipment_path).with_context(|| {
        format!("could not open equipment file {}", equipment_path.display())
    })?;
    let catalog = load_equipment(catalog, equipment).context("error reading equipment CSV")?;

    tracing::info!(
        spells = catalog.spell_count(),
        weapons = catalog.weapons.len(),
        armors = catalog.armors.len(),
        shields = catalog.shields.len(),
        "SRD catalog loaded"
    );
    Ok(catalog)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Columns: Name, Level, Classes. Rows whose level is not an integer in
/// 0..=9 are skipped.
pub fn load_spells<R: Read>(mut catalog: SrdCatalog, reader: R) -> Result<SrdCatalog, csv::Error> {
    for record in csv_reader(reader).records() {
        let record = record?;
        let name = record.get(0).unwrap_or_default();
        let level_field = record.get(1).unwrap_or_default();
        let classes_field = record.get(2).unwrap_or_default();

        if name.is_empty() {
            continue;
        }

        let Some(level) = level_field
            .parse::<u8>()
            .ok()
            .filter(|level| *level <= rules::MAX_SPELL_LEVEL)
        else {
            tracing::warn!("Skipping spell '{}' with invalid level '{}'", name, level_field);
            continue;
        };

        let cleaned = classes_field.replace('"', "");
        let classes: Vec<&str> = cleaned
            .split(',')
            .map(str::trim)
            .filter(|class| !class.is_empty())
            .collect();

        catalog = catalog.with_spell(Spell::new(name, level, &classes));
    }
    Ok(catalog)
}

/// Columns: Name, Type, then anything. Only weapons, known body armors and
/// shields are kept; an "Armor" row named Shield is a shield.
pub fn load_equipment<R: Read>(
    mut catalog: SrdCatalog,
    reader: R,
) -> Result<SrdCatalog, csv::Error> {
    for record in csv_reader(reader).records() {
        let record = record?;
        let name = record.get(0).unwrap_or_default();
        let item_type = record.get(1).unwrap_or_default();
        let key = catalog_key(name);

        if key.is_empty() {
            continue;
        }

        catalog = match item_type {
            "Weapon" => catalog.with_weapon(Weapon::new(key)),
            "Armor" if name.eq_ignore_ascii_case("shield") => catalog.with_shield(Shield::new(key)),
            "Armor" => match armor_stats(name) {
                Some((base_ac, dex_cap)) => catalog.with_armor(Armor::new(key, base_ac, dex_cap)),
                None => {
                    tracing::debug!("Skipping unrecognised armor '{}'", name);
                    catalog
                }
            },
            "Shield" => catalog.with_shield(Shield::new(key)),
            _ => catalog,
        };
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DexCap;

    const SPELLS: &str = "\
Name,Level,Classes
Fire Bolt,0,\"Sorcerer, Wizard\"
Magic Missile,1,Wizard
Cure Wounds,1,\"Bard,Cleric,Druid,Paladin,Ranger\"
Mystery,three,Wizard
Overreach,10,Wizard
Underreach,-1,Wizard
Fireball, 3 ,\"Sorcerer, Wizard\"
";

    const EQUIPMENT: &str = "\
Name,Type,Cost,Weight
Longsword,Weapon,15 gp,3 lb.
Greatsword,Weapon,50 gp,6 lb.
Chain Mail,Armor,75 gp,55 lb.
Mithral Coat,Armor,500 gp,10 lb.
Shield,Armor,10 gp,6 lb.
Tower Shield,Shield,30 gp,15 lb.
Rope,Adventuring Gear,1 gp,10 lb.
";

    #[test]
    fn test_spells_are_normalised_and_bad_levels_skipped() {
        let catalog = load_spells(SrdCatalog::new(), SPELLS.as_bytes()).unwrap();

        assert_eq!(catalog.spell_count(), 4);
        assert!(catalog.find_spell("Mystery").is_none());
        assert!(catalog.find_spell("Overreach").is_none());
        assert!(catalog.find_spell("Underreach").is_none());

        let fire_bolt = catalog.find_spell("fire bolt").unwrap();
        assert_eq!(fire_bolt.name, "fire bolt");
        assert_eq!(fire_bolt.classes, vec!["Sorcerer", "Wizard"]);

        let cure = catalog.find_spell("Cure Wounds").unwrap();
        assert_eq!(cure.classes.len(), 5);
        assert!(cure.is_available_to("ranger"));

        assert_eq!(catalog.find_spell("fireball").map(|s| s.level), Some(3));
    }

    #[test]
    fn test_equipment_is_classified() {
        let catalog = load_equipment(SrdCatalog::new(), EQUIPMENT.as_bytes()).unwrap();

        assert_eq!(catalog.weapons.len(), 2);
        assert_eq!(catalog.weapon("LONGSWORD").unwrap().name, "longsword");

        let chain = catalog.armor("chain mail").unwrap();
        assert_eq!(chain.base_ac, 16);
        assert_eq!(chain.dex_cap, DexCap::None);
        assert!(catalog.armor("mithral coat").is_none());

        assert!(catalog.armor("shield").is_none());
        assert!(catalog.shield("shield").is_some());
        assert!(catalog.shield("tower shield").is_some());
        assert!(catalog.weapon("rope").is_none());
    }

    #[test]
    fn test_load_catalog_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let equipment = dir.path().join("equipment.csv");
        let spells = dir.path().join("spells.csv");
        std::fs::write(&equipment, EQUIPMENT).unwrap();
        std::fs::write(&spells, SPELLS).unwrap();

        let catalog = load_catalog(&equipment, &spells).unwrap();
        assert_eq!(catalog.spell_count(), 4);
        assert_eq!(catalog.shields.len(), 2);

        let err = load_catalog(&dir.path().join("missing.csv"), &spells).unwrap_err();
        assert!(err.to_string().contains("could not open equipment file"));
    }

    #[test]
    fn test_bundled_tables_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = load_catalog(
            &root.join("5e-SRD-Equipment.csv"),
            &root.join("5e-SRD-Spells.csv"),
        )
        .unwrap();

        assert!(catalog.weapon("greatsword").is_some());
        assert_eq!(catalog.armors.len(), 12);
        assert!(catalog.shield("shield").is_some());
        assert!(catalog.find_spell("magic missile").is_some());
    }
}
