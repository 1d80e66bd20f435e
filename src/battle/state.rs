//! Battle state snapshot and action commands

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::battle::grid::{Grid, Unit};
use crate::battle::initiative::TurnOrder;
use crate::core::types::{GridPosition, Team, UnitId};
use crate::skills::SkillId;

/// Battle lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BattleStatus {
    #[default]
    InProgress,
    /// `winner` is `None` when both teams fell on the same action
    Over { winner: Option<Team> },
}

/// Rules fixed at battle setup that targeting consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleRules {
    pub melee_front_row_only: bool,
}

/// One unit's action: a skill plus its ordered targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub skill: SkillId,
    #[serde(default)]
    pub targets: Vec<UnitId>,
    /// Destination cell, only meaningful for movement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<GridPosition>,
}

impl ActionCommand {
    pub fn new(skill: SkillId, targets: Vec<UnitId>) -> Self {
        Self {
            skill,
            targets,
            destination: None,
        }
    }

    /// Pass the turn
    pub fn pass() -> Self {
        Self::new(SkillId::Wait, Vec::new())
    }

    pub fn move_to(destination: GridPosition) -> Self {
        Self {
            skill: SkillId::Move,
            targets: Vec::new(),
            destination: Some(destination),
        }
    }
}

/// Complete battle snapshot
///
/// Every transition produces a new value; a snapshot handed out is never
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub grid: Grid,
    pub turn_order: TurnOrder,
    pub player_controlled: BTreeSet<UnitId>,
    pub status: BattleStatus,
    pub rules: BattleRules,
    /// Append-only narrative
    pub log: Vec<String>,
}

impl BattleState {
    pub fn new(
        grid: Grid,
        turn_order: TurnOrder,
        player_controlled: BTreeSet<UnitId>,
        rules: BattleRules,
    ) -> Self {
        Self {
            grid,
            turn_order,
            player_controlled,
            status: BattleStatus::InProgress,
            rules,
            log: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, BattleStatus::Over { .. })
    }

    pub fn winner(&self) -> Option<Team> {
        match self.status {
            BattleStatus::Over { winner } => winner,
            BattleStatus::InProgress => None,
        }
    }

    pub fn active_unit_id(&self) -> Option<&UnitId> {
        self.turn_order.active_unit()
    }

    pub fn active_unit(&self) -> Option<&Unit> {
        self.grid.unit(self.active_unit_id()?)
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.grid.unit(id)
    }

    /// Is the unit about to act under player control?
    pub fn awaiting_player(&self) -> bool {
        !self.is_over()
            && self
                .active_unit_id()
                .is_some_and(|id| self.player_controlled.contains(id))
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.grid.team_units(team).len()
    }

    pub(crate) fn log_line(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}
