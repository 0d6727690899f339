//! Domain rule violations raised by the character aggregate

use super::value_objects::WeaponSlot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("must provide 6 ability scores, got {0}")]
    InvalidScoreCount(usize),
    #[error("{0} already occupied")]
    SlotOccupied(WeaponSlot),
    #[error("cannot equip to off hand: main hand weapon '{0}' is two-handed")]
    MainHandTwoHanded(String),
    #[error("invalid equipment slot '{0}'. Must be 'main hand' or 'off hand'")]
    InvalidSlot(String),
}
