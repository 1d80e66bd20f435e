use crate::battle::ai::{ActionStrategy, DecisionPolicy};
use crate::battle::orchestrator::{execute_with_auto_play, run_until_player_turn};
use crate::battle::state::{ActionCommand, BattleState};
use crate::battle::targeting::{validate_destination, validate_targets, TargetValidation};
use crate::core::config::BattleConfig;
use crate::core::types::{GridPosition, UnitId};
use crate::roster::setup::{create_game, GameSetup};
use crate::skills::{find_skill, get_skill, SkillEffect};

use super::error::{ServiceError, ServiceErrorCode};

/// One player's battle session
///
/// Holds the current battle and the strategy that plays the enemy side.
/// Starting a new game replaces the battle wholesale.
pub struct GameSession<S: ActionStrategy = DecisionPolicy> {
    config: BattleConfig,
    strategy: S,
    state: BattleState,
}

impl GameSession<DecisionPolicy> {
    /// Session with the stock decision policy seeded from the config
    pub fn new(config: BattleConfig) -> Result<Self, ServiceError> {
        let strategy = DecisionPolicy::with_seed(config.ai_seed);
        Self::with_strategy(config, strategy)
    }
}

impl<S: ActionStrategy> GameSession<S> {
    /// Session that starts on the default parties
    pub fn with_strategy(config: BattleConfig, mut strategy: S) -> Result<Self, ServiceError> {
        let state = start(&GameSetup::default(), &config, &mut strategy)?;
        Ok(Self {
            config,
            strategy,
            state,
        })
    }

    /// Current snapshot
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Throw the current battle away and start another
    ///
    /// `None` uses the default parties.
    pub fn new_game(&mut self, setup: Option<GameSetup>) -> Result<BattleState, ServiceError> {
        let setup = setup.unwrap_or_default();
        self.state = start(&setup, &self.config, &mut self.strategy)?;
        Ok(self.state.clone())
    }

    /// Validate and resolve a command for the active player unit
    ///
    /// Enemy turns that follow are played out before returning. A finished
    /// battle ignores commands and returns the final state.
    pub fn perform_action(&mut self, command: &ActionCommand) -> Result<BattleState, ServiceError> {
        if self.state.is_over() {
            return Ok(self.state.clone());
        }
        self.check_command(command)?;

        let next = execute_with_auto_play(
            &self.state,
            command,
            &mut self.strategy,
            self.config.max_auto_turns,
        )
        .map_err(ServiceError::action_failed)?;
        self.state = next;
        Ok(self.state.clone())
    }

    /// `perform_action` with the skill given by name
    pub fn perform_named_action(
        &mut self,
        skill: &str,
        targets: Vec<UnitId>,
        destination: Option<GridPosition>,
    ) -> Result<BattleState, ServiceError> {
        let skill = find_skill(skill).map_err(ServiceError::action_failed)?;
        let command = ActionCommand {
            skill: skill.id,
            targets,
            destination,
        };
        self.perform_action(&command)
    }

    fn check_command(&self, command: &ActionCommand) -> Result<(), ServiceError> {
        let state = &self.state;
        let Some(unit) = state.active_unit() else {
            return Err(ServiceError::new(
                ServiceErrorCode::ActionFailed,
                "No unit is ready to act",
            ));
        };
        if !state.awaiting_player() {
            return Err(ServiceError::new(
                ServiceErrorCode::ActionFailed,
                format!("{} is not under player control", unit.id),
            ));
        }

        let skill = get_skill(command.skill);
        if !unit.has_skill(skill.id) {
            return Err(ServiceError::invalid_skill(format!(
                "{} does not know {}",
                unit.name, skill.name
            )));
        }

        let validation = match skill.effect {
            SkillEffect::Reposition => validate_destination(state, &unit.id, command.destination),
            _ => validate_targets(skill, &command.targets, state, &unit.id),
        };
        match validation {
            TargetValidation::Valid => Ok(()),
            TargetValidation::Invalid { reason } => Err(ServiceError::invalid_targets(reason)),
        }
    }
}

/// Create a battle and play any enemy turns that come before the player's
fn start<S: ActionStrategy>(
    setup: &GameSetup,
    config: &BattleConfig,
    strategy: &mut S,
) -> Result<BattleState, ServiceError> {
    let state = create_game(setup, config).map_err(ServiceError::new_game_failed)?;
    run_until_player_turn(&state, strategy, config.max_auto_turns)
        .map_err(ServiceError::new_game_failed)
}
