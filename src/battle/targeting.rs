//! Targeting resolver
//!
//! Computes legal candidates for a targeting requirement and checks proposed
//! target lists against a skill. Validation is a predicate: it reports, it
//! never errors.

use serde::{Deserialize, Serialize};

use crate::battle::grid::Unit;
use crate::battle::state::BattleState;
use crate::core::types::{GridPosition, UnitId};
use crate::skills::{RangeKind, Skill, TargetCategory, TargetRequirement};

/// Outcome of checking a proposed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetValidation {
    Valid,
    Invalid { reason: String },
}

impl TargetValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TargetValidation::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            TargetValidation::Valid => None,
            TargetValidation::Invalid { reason } => Some(reason),
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        TargetValidation::Invalid {
            reason: reason.into(),
        }
    }
}

/// Living units that satisfy a requirement, in placement order
pub fn get_valid_targets<'a>(
    state: &'a BattleState,
    caster_id: &UnitId,
    requirement: &TargetRequirement,
) -> Vec<&'a Unit> {
    let Some(caster) = state.grid.unit(caster_id) else {
        return Vec::new();
    };

    let living = state.grid.living_units();
    let candidates: Vec<&Unit> = match requirement.category {
        TargetCategory::Opposing | TargetCategory::OpposingUnrestricted => {
            living.filter(|u| u.team != caster.team).collect()
        }
        TargetCategory::SameTeam | TargetCategory::SameTeamUnrestricted => {
            living.filter(|u| u.team == caster.team).collect()
        }
        TargetCategory::Caster => living.filter(|u| u.id == caster.id).collect(),
        TargetCategory::None => Vec::new(),
    };

    let restrict = state.rules.melee_front_row_only
        && requirement.category == TargetCategory::Opposing
        && requirement.range == Some(RangeKind::Melee);
    if restrict {
        front_row(candidates)
    } else {
        candidates
    }
}

/// Keep only the units standing in their team's front-most occupied column
fn front_row(candidates: Vec<&Unit>) -> Vec<&Unit> {
    let rank = |u: &Unit| {
        u.team
            .home_columns()
            .iter()
            .position(|&col| col == u.position.col)
            .unwrap_or(usize::MAX)
    };

    let Some(front) = candidates.iter().map(|&u| rank(u)).min() else {
        return candidates;
    };
    candidates.into_iter().filter(|&u| rank(u) == front).collect()
}

/// Check a proposed target list against a skill's requirements
///
/// Requirements consume proposed ids in order: the first requirement takes
/// the first `count` ids, the next one the following ids, and so on.
pub fn validate_targets(
    skill: &Skill,
    proposed: &[UnitId],
    state: &BattleState,
    caster_id: &UnitId,
) -> TargetValidation {
    let expected = skill.expected_target_count();
    if proposed.len() != expected {
        return TargetValidation::invalid(format!(
            "Expected {} target(s), but got {}",
            expected,
            proposed.len()
        ));
    }

    let mut remaining = proposed.iter();
    for requirement in skill.targeting {
        let valid = get_valid_targets(state, caster_id, requirement);
        for target in remaining.by_ref().take(requirement.count) {
            if !valid.iter().any(|u| &u.id == target) {
                return TargetValidation::invalid(format!(
                    "Invalid target: {} is not a valid {} target",
                    target, requirement.category
                ));
            }
        }
    }

    TargetValidation::Valid
}

/// Empty cells on the caster's own side of the board
pub fn valid_destinations(state: &BattleState, caster_id: &UnitId) -> Vec<GridPosition> {
    let Some(caster) = state.grid.unit(caster_id) else {
        return Vec::new();
    };

    state
        .grid
        .cells()
        .filter(|cell| cell.team == caster.team && cell.unit_id.is_none())
        .map(|cell| cell.position)
        .collect()
}

/// Check a movement destination for the caster
pub fn validate_destination(
    state: &BattleState,
    caster_id: &UnitId,
    destination: Option<GridPosition>,
) -> TargetValidation {
    let Some(position) = destination else {
        return TargetValidation::invalid("Move requires a destination");
    };
    if !position.in_bounds() {
        return TargetValidation::invalid(format!("Destination {} is off the grid", position));
    }
    if valid_destinations(state, caster_id).contains(&position) {
        TargetValidation::Valid
    } else {
        TargetValidation::invalid(format!(
            "Destination {} is not an empty cell on your side",
            position
        ))
    }
}
