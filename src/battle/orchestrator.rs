//! Auto-play for non-player turns
//!
//! Drives the strategy and the resolution engine until a player-controlled
//! unit is up or the battle ends. The turn guard is the only way out besides
//! those two; the win check plus the scheduler skipping fallen units keep a
//! real battle well inside it.

use crate::battle::ai::ActionStrategy;
use crate::battle::resolution::execute_action;
use crate::battle::state::{ActionCommand, BattleState};
use crate::core::error::Result;

/// Let the strategy play every non-player turn, at most `max_turns` of them
pub fn run_until_player_turn<S>(
    state: &BattleState,
    strategy: &mut S,
    max_turns: u32,
) -> Result<BattleState>
where
    S: ActionStrategy + ?Sized,
{
    let mut current = state.clone();
    let mut turns = 0;

    while !current.is_over() && !current.awaiting_player() {
        if turns >= max_turns {
            tracing::warn!(
                "Auto-play stopped after {} turns without reaching a player turn",
                turns
            );
            break;
        }
        let Some(unit_id) = current.active_unit_id().cloned() else {
            break;
        };

        let command = strategy.choose_action(&current, &unit_id);
        current = match execute_action(&current, &command) {
            Ok(next) => next,
            Err(err) => {
                // A strategy mistake should not stall the battle
                tracing::warn!("{} tried {:?} and was rejected: {}", unit_id, command, err);
                execute_action(&current, &ActionCommand::pass())?
            }
        };
        turns += 1;
    }

    Ok(current)
}

/// Resolve the player's command, then auto-play until control returns
pub fn execute_with_auto_play<S>(
    state: &BattleState,
    command: &ActionCommand,
    strategy: &mut S,
    max_turns: u32,
) -> Result<BattleState>
where
    S: ActionStrategy + ?Sized,
{
    let next = execute_action(state, command)?;
    run_until_player_turn(&next, strategy, max_turns)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::battle::ai::DecisionPolicy;
    use crate::battle::grid::{test_unit, Grid};
    use crate::battle::initiative::TurnOrder;
    use crate::battle::state::BattleRules;
    use crate::core::config::TurnOrderPolicy;
    use crate::core::types::{GridPosition, Team, UnitId};
    use crate::skills::SkillId;

    fn state(controlled: &[&str]) -> BattleState {
        let grid = Grid::new()
            .place_unit(test_unit("hero", Team::Player, 100, 20, 5), GridPosition::new(0, 1))
            .unwrap()
            .place_unit(test_unit("orc", Team::Enemy, 100, 20, 5), GridPosition::new(0, 2))
            .unwrap()
            .place_unit(test_unit("goblin", Team::Enemy, 100, 20, 5), GridPosition::new(1, 2))
            .unwrap();
        let order = TurnOrder::new(&grid, TurnOrderPolicy::TeamBlocks);
        let controlled: BTreeSet<UnitId> = controlled.iter().map(|&id| UnitId::new(id)).collect();
        BattleState::new(grid, order, controlled, BattleRules::default())
    }

    /// Always tries to hit a unit that does not exist
    struct Confused;

    impl ActionStrategy for Confused {
        fn choose_action(&mut self, _: &BattleState, _: &UnitId) -> ActionCommand {
            ActionCommand::new(SkillId::Attack, vec![UnitId::new("nobody")])
        }
    }

    #[test]
    fn test_stops_at_player_turn() {
        let s0 = state(&["hero"]);
        let mut policy = DecisionPolicy::new();

        // Already the player's turn: nothing happens
        let same = run_until_player_turn(&s0, &mut policy, 100).unwrap();
        assert_eq!(same, s0);

        let attack = ActionCommand::new(SkillId::Attack, vec![UnitId::new("orc")]);
        let s1 = execute_with_auto_play(&s0, &attack, &mut policy, 100).unwrap();
        assert!(s1.is_over() || s1.awaiting_player());
        assert_eq!(s1.turn_order.round, 2);
    }

    #[test]
    fn test_ai_only_battle_finishes() {
        let s0 = state(&[]);
        let mut policy = DecisionPolicy::with_seed(3);
        let end = run_until_player_turn(&s0, &mut policy, 1_000).unwrap();
        assert!(end.is_over());
        assert!(end.log.last().unwrap().starts_with("Game Over!"));
    }

    #[test]
    fn test_turn_guard() {
        let s0 = state(&[]);
        let mut policy = DecisionPolicy::new();
        let end = run_until_player_turn(&s0, &mut policy, 2).unwrap();
        assert_eq!(end.turn_order.current_index, 2);
        assert_eq!(end.turn_order.round, 1);
    }

    #[test]
    fn test_rejected_command_becomes_pass() {
        let s0 = state(&["hero"]);
        let s1 = crate::battle::resolution::execute_action(&s0, &ActionCommand::pass()).unwrap();
        let s2 = run_until_player_turn(&s1, &mut Confused, 10).unwrap();
        assert!(s2.awaiting_player());
        assert_eq!(s2.log.iter().filter(|l| l.ends_with("waits.")).count(), 3);
    }

    #[test]
    fn test_works_through_trait_objects() {
        let s0 = state(&[]);
        let mut boxed: Box<dyn ActionStrategy> = Box::new(DecisionPolicy::new());
        let end = run_until_player_turn(&s0, boxed.as_mut(), 3).unwrap();
        assert_eq!(end.turn_order.round, 2);
    }
}
