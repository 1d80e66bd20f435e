//! Stock decision policy

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::ActionStrategy;
use crate::battle::constants::DEFAULT_AI_SEED;
use crate::battle::grid::Unit;
use crate::battle::state::{ActionCommand, BattleState};
use crate::battle::targeting::get_valid_targets;
use crate::core::types::UnitId;
use crate::skills::{get_skills, Skill, TargetCategory};

/// Random skill choice with greedy target selection
///
/// Offense goes at the sturdiest opponent, support at the most wounded ally.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    rng: ChaCha8Rng,
}

impl DecisionPolicy {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_AI_SEED)
    }

    /// Create with a specific RNG seed for reproducible battles
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionStrategy for DecisionPolicy {
    fn choose_action(&mut self, state: &BattleState, unit_id: &UnitId) -> ActionCommand {
        let Some(unit) = state.unit(unit_id) else {
            return ActionCommand::pass();
        };

        let usable: Vec<&Skill> = get_skills(&unit.skills)
            .into_iter()
            .filter(|skill| !skill.is_trivial())
            .collect();
        let Some(skill) = usable.choose(&mut self.rng) else {
            return ActionCommand::pass();
        };

        match pick_targets(state, unit_id, skill) {
            Some(targets) => ActionCommand::new(skill.id, targets),
            None => {
                tracing::debug!("{} has no target for {}, passing", unit_id, skill.name);
                ActionCommand::pass()
            }
        }
    }
}

/// Fill every targeting requirement of `skill` for `caster_id`
///
/// Returns `None` if some requirement cannot be met. Ties go to the earliest
/// candidate in placement order.
pub fn pick_targets(state: &BattleState, caster_id: &UnitId, skill: &Skill) -> Option<Vec<UnitId>> {
    let mut chosen: Vec<UnitId> = Vec::with_capacity(skill.expected_target_count());

    for requirement in skill.targeting {
        for _ in 0..requirement.count {
            let candidates: Vec<&Unit> = get_valid_targets(state, caster_id, requirement)
                .into_iter()
                .filter(|u| !chosen.contains(&u.id))
                .collect();

            let pick = match requirement.category {
                TargetCategory::Opposing | TargetCategory::OpposingUnrestricted => candidates
                    .into_iter()
                    .reduce(|best, u| if u.health > best.health { u } else { best }),
                TargetCategory::SameTeam | TargetCategory::SameTeamUnrestricted => {
                    candidates.into_iter().min_by_key(|u| u.health)
                }
                TargetCategory::Caster => candidates.into_iter().next(),
                TargetCategory::None => continue,
            }?;
            chosen.push(pick.id.clone());
        }
    }

    Some(chosen)
}
