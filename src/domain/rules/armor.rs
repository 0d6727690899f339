//! Armor class table for body armor

use crate::domain::value_objects::DexCap;

static ARMOR_TABLE: &[(&str, i32, DexCap)] = &[
    // Light
    ("padded armor", 11, DexCap::Full),
    ("leather armor", 11, DexCap::Full),
    ("studded leather armor", 12, DexCap::Full),
    // Medium
    ("hide armor", 12, DexCap::Limited),
    ("chain shirt", 13, DexCap::Limited),
    ("scale mail", 14, DexCap::Limited),
    ("breastplate", 14, DexCap::Limited),
    ("half plate", 15, DexCap::Limited),
    // Heavy
    ("ring mail", 14, DexCap::None),
    ("chain mail", 16, DexCap::None),
    ("splint armor", 17, DexCap::None),
    ("plate armor", 18, DexCap::None),
];

/// Base AC and dex cap for a named armor, if it is a known body armor
pub fn armor_stats(name: &str) -> Option<(i32, DexCap)> {
    let key = name.trim().to_lowercase();
    ARMOR_TABLE
        .iter()
        .find(|(armor, _, _)| *armor == key)
        .map(|(_, ac, cap)| (*ac, *cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_lookup() {
        assert_eq!(armor_stats("Chain Mail"), Some((16, DexCap::None)));
        assert_eq!(armor_stats("studded leather armor"), Some((12, DexCap::Full)));
        assert_eq!(armor_stats("Mithral Coat"), None);
    }
}
