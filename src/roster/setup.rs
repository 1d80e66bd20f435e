//! Battle setup from two parties

use std::collections::BTreeSet;

use crate::battle::grid::Grid;
use crate::battle::initiative::TurnOrder;
use crate::battle::state::{BattleRules, BattleState};
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::core::types::{Team, UnitId};
use crate::roster::party::{create_units_from_party, Party};
use crate::roster::templates::{CLERIC, SKELETON, WARRIOR};

/// The two sides of a new battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub player: Party,
    pub enemy: Party,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            player: default_player_party(),
            enemy: default_enemy_party(),
        }
    }
}

pub fn default_player_party() -> Party {
    Party::new("player-party", "Heroes", [&WARRIOR, &CLERIC])
}

pub fn default_enemy_party() -> Party {
    Party::new("enemy-party", "Enemies", [&SKELETON, &SKELETON])
}

/// Place both parties and open round one
///
/// Every player-team unit is player-controlled.
pub fn create_game(setup: &GameSetup, config: &BattleConfig) -> Result<BattleState> {
    config.validate()?;

    let player_units = create_units_from_party(&setup.player, Team::Player)?;
    let enemy_units = create_units_from_party(&setup.enemy, Team::Enemy)?;
    let (player_count, enemy_count) = (player_units.len(), enemy_units.len());

    let player_controlled: BTreeSet<UnitId> =
        player_units.iter().map(|u| u.id.clone()).collect();

    let mut grid = Grid::new();
    for unit in player_units.into_iter().chain(enemy_units) {
        let position = unit.position;
        grid = grid.place_unit(unit, position)?;
    }

    let turn_order = TurnOrder::new(&grid, config.turn_order);
    let rules = BattleRules {
        melee_front_row_only: config.melee_front_row_only,
    };
    let mut state = BattleState::new(grid, turn_order, player_controlled, rules);

    tracing::info!(
        "Battle created: {} ({}) vs {} ({}), turn order {:?}",
        setup.player.name,
        player_count,
        setup.enemy.name,
        enemy_count,
        config.turn_order
    );
    state.log_line(format!(
        "Battle begins! {} ({}) vs {} ({})!",
        setup.player.name, player_count, setup.enemy.name, enemy_count
    ));
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TurnOrderPolicy;
    use crate::core::error::BattleError;
    use crate::core::types::GridPosition;
    use crate::roster::templates::{ARCHER, ORC};

    #[test]
    fn test_default_game() {
        let state = create_game(&GameSetup::default(), &BattleConfig::default()).unwrap();

        assert_eq!(state.log, vec!["Battle begins! Heroes (2) vs Enemies (2)!"]);
        assert_eq!(state.grid.len(), 4);
        assert_eq!(state.active_unit_id().unwrap().as_str(), "player-warrior-0");
        assert!(state.awaiting_player());
        let controlled: Vec<&str> = state.player_controlled.iter().map(UnitId::as_str).collect();
        assert_eq!(controlled, vec!["player-cleric-1", "player-warrior-0"]);

        let skeleton = state.unit(&UnitId::new("enemy-skeleton-1")).unwrap();
        assert_eq!(skeleton.position, GridPosition::new(0, 3));
    }

    #[test]
    fn test_initiative_policy() {
        let config = BattleConfig {
            turn_order: TurnOrderPolicy::Initiative,
            ..BattleConfig::default()
        };
        let setup = GameSetup {
            player: Party::new("p", "Slowpokes", [&ORC]),
            enemy: Party::new("e", "Quick", [&ARCHER]),
        };
        let state = create_game(&setup, &config).unwrap();
        assert_eq!(state.active_unit_id().unwrap().as_str(), "enemy-archer-0");
        assert!(!state.awaiting_player());
    }

    #[test]
    fn test_rules_follow_config() {
        let config = BattleConfig {
            melee_front_row_only: true,
            ..BattleConfig::default()
        };
        let state = create_game(&GameSetup::default(), &config).unwrap();
        assert!(state.rules.melee_front_row_only);
    }

    #[test]
    fn test_bad_setup_rejected() {
        let setup = GameSetup {
            player: Party::new("p", "Nobody", Vec::new()),
            enemy: default_enemy_party(),
        };
        let err = create_game(&setup, &BattleConfig::default()).unwrap_err();
        assert!(matches!(err, BattleError::InvalidParty(_)));

        let setup = GameSetup {
            player: Party::positioned(
                "p",
                "Stacked",
                [(&ORC, GridPosition::new(0, 0)), (&ORC, GridPosition::new(0, 0))],
            ),
            enemy: default_enemy_party(),
        };
        let err = create_game(&setup, &BattleConfig::default()).unwrap_err();
        assert!(matches!(err, BattleError::CellOccupied(_)));
    }
}
