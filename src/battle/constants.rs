//! Battle constants - all tunable values in one place

// Board
pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;

// Parties
pub const MAX_PARTY_SIZE: usize = 4;
pub const UNITS_PER_ROW: usize = 2;

// Damage
pub const MIN_DAMAGE: u32 = 1;
/// Share of a draining strike's damage returned to the caster, in percent
pub const DRAIN_HEAL_PERCENT: u32 = 50;

// Auto-play
pub const DEFAULT_MAX_AUTO_TURNS: u32 = 500;
pub const DEFAULT_AI_SEED: u64 = 42;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_splits_evenly() {
        assert_eq!(GRID_COLS % 2, 0);
        assert_eq!(GRID_COLS / 2, UNITS_PER_ROW);
    }

    #[test]
    fn test_party_fits_home_side() {
        assert!(MAX_PARTY_SIZE <= GRID_ROWS * UNITS_PER_ROW);
    }
}
