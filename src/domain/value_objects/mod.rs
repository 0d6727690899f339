//! Value objects - Immutable objects defined by their attributes

mod ability;
mod equipment;
mod skill;
mod spell;

pub use ability::{Ability, AbilityKey};
pub use equipment::{Armor, DexCap, Shield, Weapon, WeaponSlot};
pub use skill::Skill;
pub use spell::{normalize_spell_name, CasterKind, Spell};
