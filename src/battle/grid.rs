//! Grid and unit store
//!
//! A fixed board of cells plus the map of every unit placed on it. Units are
//! held behind `Arc` so a cloned grid shares untouched units with the original;
//! mutation goes through `Arc::make_mut`, which copies only the unit touched.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::battle::buffs::Buff;
use crate::battle::constants::{GRID_COLS, GRID_ROWS};
use crate::core::error::{BattleError, Result};
use crate::core::types::{GridPosition, Team, UnitId};
use crate::skills::SkillId;

/// A combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub power: u32,
    pub magic: u32,
    pub defense: u32,
    pub initiative: u32,
    pub position: GridPosition,
    pub team: Team,
    pub skills: Vec<SkillId>,
    pub buffs: Vec<Buff>,
    /// Template this unit was created from
    pub template_id: Option<String>,
}

impl Unit {
    /// Incapacitated units stay in the store but never act or get targeted
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn missing_health(&self) -> u32 {
        self.max_health.saturating_sub(self.health)
    }

    /// Subtract health, never below zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Add health, capped at max. Returns the health actually restored.
    pub fn restore_health(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.missing_health());
        self.health += healed;
        healed
    }

    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }
}

/// One board cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub position: GridPosition,
    pub unit_id: Option<UnitId>,
    pub team: Team,
}

/// The board and the units on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Vec<GridCell>>,
    units: BTreeMap<UnitId, Arc<Unit>>,
    /// Placement order; the natural iteration order of the store
    roster: Vec<UnitId>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Empty board; left half of the columns belongs to the player team
    pub fn new() -> Self {
        let cells = (0..GRID_ROWS)
            .map(|row| {
                (0..GRID_COLS)
                    .map(|col| GridCell {
                        position: GridPosition::new(row, col),
                        unit_id: None,
                        team: Team::for_column(col),
                    })
                    .collect()
            })
            .collect();

        Self {
            cells,
            units: BTreeMap::new(),
            roster: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, position: GridPosition) -> Option<&GridCell> {
        self.cells.get(position.row)?.get(position.col)
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }

    /// Return a new grid with `unit` at `position`
    ///
    /// A unit already on the board is lifted from its previous cell first. The
    /// unit's own position is rewritten to match the cell.
    pub fn place_unit(&self, mut unit: Unit, position: GridPosition) -> Result<Grid> {
        let target = self
            .cell(position)
            .ok_or(BattleError::OutOfBounds(position))?;
        if let Some(occupant) = &target.unit_id {
            if *occupant != unit.id {
                return Err(BattleError::CellOccupied(position));
            }
        }

        let mut grid = self.clone();
        if let Some(previous) = grid.units.get(&unit.id).map(|u| u.position) {
            grid.cells[previous.row][previous.col].unit_id = None;
        } else {
            grid.roster.push(unit.id.clone());
        }

        grid.cells[position.row][position.col].unit_id = Some(unit.id.clone());
        unit.position = position;
        grid.units.insert(unit.id.clone(), Arc::new(unit));
        Ok(grid)
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.get(id).map(Arc::as_ref)
    }

    pub fn unit_at(&self, position: GridPosition) -> Option<&Unit> {
        let id = self.cell(position)?.unit_id.as_ref()?;
        self.unit(id)
    }

    /// Living units of a team, in placement order
    pub fn team_units(&self, team: Team) -> Vec<&Unit> {
        self.all_units()
            .filter(|u| u.team == team && u.is_alive())
            .collect()
    }

    /// Every stored unit regardless of health, in placement order
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.roster.iter().filter_map(|id| self.unit(id))
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.all_units().filter(|u| u.is_alive())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Return a new grid with one unit patched; unknown ids leave it unchanged
    ///
    /// Position changes must go through `place_unit` so cells stay in sync.
    /// The id and position are pinned; patches to either are discarded.
    pub fn update_unit(&self, id: &UnitId, patch: impl FnOnce(&mut Unit)) -> Grid {
        let mut grid = self.clone();
        grid.modify_unit(id, patch);
        grid
    }

    /// Patch a unit in place on this grid, copying it first if it is shared
    ///
    /// Returns false when the id is absent.
    pub(crate) fn modify_unit(&mut self, id: &UnitId, patch: impl FnOnce(&mut Unit)) -> bool {
        let Some(entry) = self.units.get_mut(id) else {
            return false;
        };
        let unit = Arc::make_mut(entry);
        let position = unit.position;
        patch(unit);
        unit.id = id.clone();
        unit.position = position;
        true
    }

    /// True when two grids hold the very same allocation for a unit
    pub fn shares_unit_with(&self, other: &Grid, id: &UnitId) -> bool {
        match (self.units.get(id), other.units.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_unit(id: &str, team: Team, max_health: u32, power: u32, defense: u32) -> Unit {
    Unit {
        id: UnitId::new(id),
        name: id.to_string(),
        health: max_health,
        max_health,
        power,
        magic: 0,
        defense,
        initiative: 10,
        position: GridPosition::default(),
        team,
        skills: crate::skills::DEFAULT_SKILLS.to_vec(),
        buffs: Vec::new(),
        template_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_dimensions_and_sides() {
        let grid = Grid::new();
        assert_eq!(grid.rows(), GRID_ROWS);
        assert_eq!(grid.cols(), GRID_COLS);
        assert!(grid.is_empty());
        for cell in grid.cells() {
            assert!(cell.unit_id.is_none());
            assert_eq!(cell.team, Team::for_column(cell.position.col));
        }
    }

    #[test]
    fn test_place_unit_sets_cell_and_position() {
        let grid = Grid::new();
        let unit = test_unit("a", Team::Player, 100, 10, 5);
        let placed = grid.place_unit(unit, GridPosition::new(1, 0)).unwrap();

        assert!(grid.is_empty(), "original grid untouched");
        let found = placed.unit_at(GridPosition::new(1, 0)).unwrap();
        assert_eq!(found.id, UnitId::new("a"));
        assert_eq!(found.position, GridPosition::new(1, 0));
    }

    #[test]
    fn test_replacing_clears_previous_cell() {
        let unit = test_unit("a", Team::Player, 100, 10, 5);
        let grid = Grid::new()
            .place_unit(unit.clone(), GridPosition::new(0, 0))
            .unwrap();
        let moved = grid.place_unit(unit, GridPosition::new(2, 1)).unwrap();

        assert!(moved.unit_at(GridPosition::new(0, 0)).is_none());
        assert!(moved.unit_at(GridPosition::new(2, 1)).is_some());
        assert_eq!(moved.len(), 1);
        let occupied = moved.cells().filter(|c| c.unit_id.is_some()).count();
        assert_eq!(occupied, 1);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let grid = Grid::new()
            .place_unit(test_unit("a", Team::Player, 100, 10, 5), GridPosition::new(0, 0))
            .unwrap();

        let clash = grid.place_unit(test_unit("b", Team::Player, 100, 10, 5), GridPosition::new(0, 0));
        assert!(matches!(clash, Err(BattleError::CellOccupied(_))));

        let outside = grid.place_unit(test_unit("b", Team::Player, 100, 10, 5), GridPosition::new(9, 0));
        assert!(matches!(outside, Err(BattleError::OutOfBounds(_))));
    }

    #[test]
    fn test_team_units_excludes_fallen() {
        let mut fallen = test_unit("b", Team::Enemy, 100, 10, 5);
        fallen.health = 0;
        let grid = Grid::new()
            .place_unit(test_unit("a", Team::Enemy, 100, 10, 5), GridPosition::new(0, 2))
            .unwrap()
            .place_unit(fallen, GridPosition::new(0, 3))
            .unwrap();

        assert_eq!(grid.team_units(Team::Enemy).len(), 1);
        assert_eq!(grid.all_units().count(), 2);
        assert!(grid.team_units(Team::Player).is_empty());
    }

    #[test]
    fn test_update_unit_is_copy_on_write() {
        let grid = Grid::new()
            .place_unit(test_unit("a", Team::Player, 100, 10, 5), GridPosition::new(0, 0))
            .unwrap()
            .place_unit(test_unit("b", Team::Enemy, 100, 10, 5), GridPosition::new(0, 2))
            .unwrap();

        let updated = grid.update_unit(&UnitId::new("a"), |u| u.health = 40);

        assert_eq!(grid.unit(&UnitId::new("a")).unwrap().health, 100);
        assert_eq!(updated.unit(&UnitId::new("a")).unwrap().health, 40);
        assert!(updated.shares_unit_with(&grid, &UnitId::new("b")));
        assert!(!updated.shares_unit_with(&grid, &UnitId::new("a")));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let grid = Grid::new()
            .place_unit(test_unit("a", Team::Player, 100, 10, 5), GridPosition::new(0, 0))
            .unwrap();
        let updated = grid.update_unit(&UnitId::new("ghost"), |u| u.health = 1);
        assert_eq!(updated, grid);
    }

    #[test]
    fn test_update_cannot_change_id_or_position() {
        let id = UnitId::new("a");
        let grid = Grid::new()
            .place_unit(test_unit("a", Team::Player, 100, 10, 5), GridPosition::new(0, 0))
            .unwrap();
        let updated = grid.update_unit(&id, |u| {
            u.id = UnitId::new("zz");
            u.position = GridPosition::new(3, 1);
            u.health = 40;
        });

        let unit = updated.unit(&id).unwrap();
        assert_eq!(unit.id, id);
        assert_eq!(unit.position, GridPosition::new(0, 0));
        assert_eq!(unit.health, 40);
        assert_eq!(updated.unit_at(GridPosition::new(0, 0)).unwrap().id, id);
        assert!(updated.unit(&UnitId::new("zz")).is_none());
    }

    #[test]
    fn test_health_helpers_clamp() {
        let mut unit = test_unit("a", Team::Player, 100, 10, 5);
        assert_eq!(unit.take_damage(130), 100);
        assert_eq!(unit.health, 0);
        assert!(!unit.is_alive());
        assert_eq!(unit.restore_health(500), 100);
        assert_eq!(unit.health, 100);
    }
}
