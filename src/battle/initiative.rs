//! Initiative scheduler
//!
//! The unit sequence is fixed at battle start. Each advance marks the active
//! unit as having acted, moves to the next living unit, and rolls the round
//! over when the sequence runs out.

use std::collections::BTreeSet;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::battle::buffs::effective_initiative;
use crate::battle::grid::Grid;
use crate::core::config::TurnOrderPolicy;
use crate::core::types::{Team, UnitId};

/// Turn rotation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    pub round: u32,
    pub unit_order: Vec<UnitId>,
    pub current_index: usize,
    pub acted_this_round: BTreeSet<UnitId>,
}

impl TurnOrder {
    /// Build round one from the living units on the grid
    pub fn new(grid: &Grid, policy: TurnOrderPolicy) -> Self {
        let unit_order = match policy {
            TurnOrderPolicy::TeamBlocks => [Team::Player, Team::Enemy]
                .into_iter()
                .flat_map(|team| grid.team_units(team))
                .map(|u| u.id.clone())
                .collect(),
            TurnOrderPolicy::Initiative => {
                let mut living: Vec<_> = grid.living_units().collect();
                // Stable sort keeps placement order among equals
                living.sort_by(|a, b| {
                    effective_initiative(b)
                        .cmp(&effective_initiative(a))
                        .then(a.team.cmp(&b.team))
                });
                living.into_iter().map(|u| u.id.clone()).collect()
            }
        };

        Self {
            round: 1,
            unit_order,
            current_index: 0,
            acted_this_round: BTreeSet::new(),
        }
    }

    /// Unit whose turn it is
    pub fn active_unit(&self) -> Option<&UnitId> {
        self.unit_order.get(self.current_index)
    }

    /// Move to the next living unit
    ///
    /// Returns `None` when no unit in the sequence is alive; the battle is
    /// over at that point and there is nobody to hand the turn to.
    pub fn advance(&self, grid: &Grid) -> Option<TurnOrder> {
        let alive: AHashSet<&UnitId> = grid.living_units().map(|u| &u.id).collect();
        let is_alive = |idx: usize| alive.contains(&self.unit_order[idx]);

        let mut acted = self.acted_this_round.clone();
        if let Some(active) = self.active_unit() {
            acted.insert(active.clone());
        }

        let len = self.unit_order.len();
        let mut round = self.round;
        let mut index = self.current_index + 1;
        while index < len && !is_alive(index) {
            index += 1;
        }

        if index >= len {
            index = 0;
            round += 1;
            acted.clear();
            while index < len && !is_alive(index) {
                index += 1;
            }
            if index >= len {
                return None;
            }
        }

        tracing::debug!(
            "Turn passes to {} (round {})",
            self.unit_order[index],
            round
        );

        Some(TurnOrder {
            round,
            unit_order: self.unit_order.clone(),
            current_index: index,
            acted_this_round: acted,
        })
    }

    pub fn has_acted(&self, id: &UnitId) -> bool {
        self.acted_this_round.contains(id)
    }
}

/// Set membership against the player-controlled roster
pub fn is_player_controlled(unit_id: &UnitId, controlled: &BTreeSet<UnitId>) -> bool {
    controlled.contains(unit_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::grid::{test_unit, Unit};
    use crate::core::types::GridPosition;

    fn grid_with(units: Vec<(Unit, GridPosition)>) -> Grid {
        units
            .into_iter()
            .fold(Grid::new(), |grid, (unit, pos)| grid.place_unit(unit, pos).unwrap())
    }

    fn four_units() -> Grid {
        let mut slow = test_unit("p-slow", Team::Player, 100, 10, 5);
        slow.initiative = 5;
        let mut quick = test_unit("e-quick", Team::Enemy, 100, 10, 5);
        quick.initiative = 14;
        let mut mid = test_unit("p-mid", Team::Player, 100, 10, 5);
        mid.initiative = 9;
        let mut tied = test_unit("e-tied", Team::Enemy, 100, 10, 5);
        tied.initiative = 9;
        grid_with(vec![
            (slow, GridPosition::new(0, 1)),
            (quick, GridPosition::new(0, 2)),
            (mid, GridPosition::new(1, 1)),
            (tied, GridPosition::new(1, 2)),
        ])
    }

    fn ids(order: &TurnOrder) -> Vec<&str> {
        order.unit_order.iter().map(UnitId::as_str).collect()
    }

    #[test]
    fn test_team_blocks_order() {
        let order = TurnOrder::new(&four_units(), TurnOrderPolicy::TeamBlocks);
        assert_eq!(ids(&order), vec!["p-slow", "p-mid", "e-quick", "e-tied"]);
        assert_eq!(order.round, 1);
        assert_eq!(order.current_index, 0);
        assert!(order.acted_this_round.is_empty());
    }

    #[test]
    fn test_initiative_order_breaks_ties_by_team() {
        let order = TurnOrder::new(&four_units(), TurnOrderPolicy::Initiative);
        assert_eq!(ids(&order), vec!["e-quick", "p-mid", "e-tied", "p-slow"]);
    }

    #[test]
    fn test_fallen_units_left_out_of_sequence() {
        let grid = four_units().update_unit(&UnitId::new("p-mid"), |u| u.health = 0);
        let order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);
        assert_eq!(ids(&order), vec!["p-slow", "e-quick", "e-tied"]);
    }

    #[test]
    fn test_advance_marks_acted_and_wraps() {
        let grid = four_units();
        let mut order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);

        for expected in 1..4 {
            order = order.advance(&grid).unwrap();
            assert_eq!(order.current_index, expected);
            assert_eq!(order.acted_this_round.len(), expected);
        }

        order = order.advance(&grid).unwrap();
        assert_eq!(order.current_index, 0);
        assert_eq!(order.round, 2);
        assert!(order.acted_this_round.is_empty());
    }

    #[test]
    fn test_advance_skips_fallen() {
        let grid = four_units();
        let order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);
        let grid = grid.update_unit(&UnitId::new("p-mid"), |u| u.health = 0);

        let next = order.advance(&grid).unwrap();
        assert_eq!(next.active_unit().unwrap().as_str(), "e-quick");
    }

    #[test]
    fn test_wrap_skips_fallen_leaders() {
        let grid = four_units();
        let mut order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);
        order.current_index = 3;
        let grid = grid.update_unit(&UnitId::new("p-slow"), |u| u.health = 0);

        let next = order.advance(&grid).unwrap();
        assert_eq!(next.round, 2);
        assert_eq!(next.active_unit().unwrap().as_str(), "p-mid");
    }

    #[test]
    fn test_everyone_fallen_terminates() {
        let grid = four_units();
        let order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);
        let ids: Vec<UnitId> = grid.all_units().map(|u| u.id.clone()).collect();
        let grid = ids.iter().fold(grid, |g, id| g.update_unit(id, |u| u.health = 0));

        assert!(order.advance(&grid).is_none());
    }

    #[test]
    fn test_player_control_membership() {
        let controlled: BTreeSet<UnitId> = [UnitId::new("p-slow")].into_iter().collect();
        assert!(is_player_controlled(&UnitId::new("p-slow"), &controlled));
        assert!(!is_player_controlled(&UnitId::new("e-quick"), &controlled));
    }
}
