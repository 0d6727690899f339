//! Spell slot progressions by character level

/// Which slot table a casting class follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotProgression {
    Full,
    Half,
    Pact,
}

/// Rows are character levels 1..=20, columns spell levels 1..=9
type SlotTable = [[u32; 9]; 20];

static FULL_CASTER_SLOTS: SlotTable = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

static HALF_CASTER_SLOTS: SlotTable = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
];

/// Pact magic: every slot is cast at the highest available level
static PACT_CASTER_SLOTS: SlotTable = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 2, 0, 0, 0, 0, 0, 0],
    [0, 0, 2, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
];

/// (minimum character level, cantrips known)
static FULL_CASTER_CANTRIPS: &[(u8, u32)] = &[(1, 3), (4, 4), (10, 5)];
static WARLOCK_CANTRIPS: &[(u8, u32)] = &[(1, 2), (4, 3), (10, 4)];

impl SlotProgression {
    fn table(&self) -> &'static SlotTable {
        match self {
            Self::Full => &FULL_CASTER_SLOTS,
            Self::Half => &HALF_CASTER_SLOTS,
            Self::Pact => &PACT_CASTER_SLOTS,
        }
    }

    /// Half casters get no cantrips from this table
    fn cantrips(&self) -> Option<&'static [(u8, u32)]> {
        match self {
            Self::Full => Some(FULL_CASTER_CANTRIPS),
            Self::Half => None,
            Self::Pact => Some(WARLOCK_CANTRIPS),
        }
    }

    /// Non-zero (spell level, slot count) pairs for a character level.
    /// Levels outside 1..=20 have no slots.
    pub fn slots_at(&self, character_level: u8) -> Vec<(u8, u32)> {
        let Some(row) = usize::from(character_level)
            .checked_sub(1)
            .and_then(|index| self.table().get(index))
        else {
            return Vec::new();
        };

        row.iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(index, count)| (index as u8 + 1, *count))
            .collect()
    }

    /// Cantrips known at a character level: the largest threshold not above it
    pub fn cantrips_at(&self, character_level: u8) -> Option<u32> {
        self.cantrips()?
            .iter()
            .filter(|(threshold, _)| *threshold <= character_level)
            .max_by_key(|(threshold, _)| *threshold)
            .map(|(_, count)| *count)
    }

    /// Highest spell level this progression ever reaches
    pub fn max_spell_level(&self) -> u8 {
        match self {
            Self::Full => 9,
            Self::Half | Self::Pact => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_caster_rows() {
        assert_eq!(SlotProgression::Full.slots_at(1), vec![(1, 2)]);
        assert_eq!(SlotProgression::Full.slots_at(4), vec![(1, 4), (2, 3)]);
        assert_eq!(SlotProgression::Full.slots_at(20).len(), 9);
    }

    #[test]
    fn test_half_caster_has_nothing_at_level_one() {
        assert!(SlotProgression::Half.slots_at(1).is_empty());
        assert_eq!(SlotProgression::Half.slots_at(5), vec![(1, 4), (2, 2)]);
    }

    #[test]
    fn test_pact_slots_move_up() {
        assert_eq!(SlotProgression::Pact.slots_at(3), vec![(2, 2)]);
        assert_eq!(SlotProgression::Pact.slots_at(11), vec![(5, 3)]);
    }

    #[test]
    fn test_out_of_range_levels() {
        assert!(SlotProgression::Full.slots_at(0).is_empty());
        assert!(SlotProgression::Full.slots_at(21).is_empty());
    }

    #[test]
    fn test_cantrip_thresholds() {
        assert_eq!(SlotProgression::Full.cantrips_at(1), Some(3));
        assert_eq!(SlotProgression::Full.cantrips_at(3), Some(3));
        assert_eq!(SlotProgression::Full.cantrips_at(4), Some(4));
        assert_eq!(SlotProgression::Full.cantrips_at(12), Some(5));
        assert_eq!(SlotProgression::Pact.cantrips_at(4), Some(3));
        assert_eq!(SlotProgression::Half.cantrips_at(20), None);
    }

    #[test]
    fn test_tables_never_exceed_their_max_level() {
        for progression in [SlotProgression::Full, SlotProgression::Half, SlotProgression::Pact] {
            for level in 1..=20 {
                for (spell_level, _) in progression.slots_at(level) {
                    assert!(spell_level <= progression.max_spell_level());
                }
            }
        }
    }
}
