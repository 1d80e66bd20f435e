//! Battle configuration loaded from TOML
//!
//! Turn-order policy, targeting strictness and the auto-play guard are the
//! knobs that change how a battle plays out. Everything else is catalog data.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_AI_SEED, DEFAULT_MAX_AUTO_TURNS};
use crate::core::error::{BattleError, Result};

/// How the round's unit sequence is built at battle start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrderPolicy {
    /// Whole player team first, then the whole enemy team (placement order within each)
    #[default]
    TeamBlocks,
    /// Effective initiative, highest first; ties go to the player team, then placement order
    Initiative,
}

/// Configuration for a battle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Turn-order construction policy
    pub turn_order: TurnOrderPolicy,

    /// Restrict melee requirements to the opposing front row
    ///
    /// The front row is the opposing column nearest the centre line that
    /// still holds a living unit. Off by default.
    pub melee_front_row_only: bool,

    /// Maximum number of consecutive non-player turns the auto-play loop resolves
    ///
    /// Guards AI-vs-AI sessions where no player-controlled unit ever takes over.
    pub max_auto_turns: u32,

    /// Seed for the decision policy RNG
    pub ai_seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            turn_order: TurnOrderPolicy::default(),
            melee_front_row_only: false,
            max_auto_turns: DEFAULT_MAX_AUTO_TURNS,
            ai_seed: DEFAULT_AI_SEED,
        }
    }
}

impl BattleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_auto_turns == 0 {
            return Err(BattleError::InvalidConfig(
                "max_auto_turns must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BattleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.turn_order, TurnOrderPolicy::TeamBlocks);
        assert!(!config.melee_front_row_only);
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let config = BattleConfig::from_toml_str("turn_order = \"initiative\"").unwrap();
        assert_eq!(config.turn_order, TurnOrderPolicy::Initiative);
        assert_eq!(config.max_auto_turns, DEFAULT_MAX_AUTO_TURNS);
    }

    #[test]
    fn test_zero_auto_turns_rejected() {
        let result = BattleConfig::from_toml_str("max_auto_turns = 0");
        assert!(matches!(result, Err(BattleError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = BattleConfig::from_toml_str("turn_order = \"speed\"");
        assert!(matches!(result, Err(BattleError::Toml(_))));
    }

    #[test]
    fn test_load_shipped_config() {
        let config = BattleConfig::load("data/battle.toml").expect("Should load shipped config");
        assert_eq!(config, BattleConfig::default());
    }
}
