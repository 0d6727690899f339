//! Spells and spellcasting styles

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Lowercase canonical name
    pub name: String,
    /// 0 for cantrips, up to 9
    pub level: u8,
    /// Classes that may cast this spell
    pub classes: Vec<String>,
    pub school: String,
    pub range: String,
}

impl Spell {
    pub fn new(name: &str, level: u8, classes: &[&str]) -> Self {
        Self {
            name: normalize_spell_name(name),
            level,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            school: String::new(),
            range: String::new(),
        }
    }

    /// Whether the class (any case) is on this spell's list
    pub fn is_available_to(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.trim().eq_ignore_ascii_case(class.trim()))
    }
}

pub fn normalize_spell_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// How a class gains access to its spells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasterKind {
    #[default]
    None,
    /// A fixed list of spells known (sorcerer, warlock, ...)
    Learned,
    /// A daily selection from the class list (wizard, cleric, ...)
    Prepared,
}

impl CasterKind {
    pub fn is_caster(&self) -> bool {
        !matches!(self, Self::None)
    }
}
