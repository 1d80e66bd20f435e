use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::BattleError;

/// Machine-readable failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceErrorCode {
    InvalidSkill,
    InvalidTargets,
    ActionFailed,
    NewGameFailed,
}

impl ServiceErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceErrorCode::InvalidSkill => "INVALID_SKILL",
            ServiceErrorCode::InvalidTargets => "INVALID_TARGETS",
            ServiceErrorCode::ActionFailed => "ACTION_FAILED",
            ServiceErrorCode::NewGameFailed => "NEW_GAME_FAILED",
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: ServiceErrorCode,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_skill(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InvalidSkill, message)
    }

    pub fn invalid_targets(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InvalidTargets, message)
    }

    /// Wrap an engine failure while resolving a command
    pub fn action_failed(err: BattleError) -> Self {
        let code = match err {
            BattleError::UnknownSkill(_) => ServiceErrorCode::InvalidSkill,
            _ => ServiceErrorCode::ActionFailed,
        };
        Self::new(code, err.to_string())
    }

    pub fn new_game_failed(err: BattleError) -> Self {
        Self::new(ServiceErrorCode::NewGameFailed, err.to_string())
    }
}

impl From<ServiceError> for BattleError {
    fn from(err: ServiceError) -> Self {
        BattleError::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_screaming() {
        let err = ServiceError::invalid_targets("Expected 1 target(s), but got 0");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"INVALID_TARGETS","message":"Expected 1 target(s), but got 0"}"#
        );
        assert_eq!(err.to_string(), "INVALID_TARGETS: Expected 1 target(s), but got 0");
    }

    #[test]
    fn test_unknown_skill_maps_to_invalid_skill() {
        let err = ServiceError::action_failed(BattleError::UnknownSkill("fireball".into()));
        assert_eq!(err.code, ServiceErrorCode::InvalidSkill);
        assert_eq!(err.message, "Unknown skill: fireball");
    }

    #[test]
    fn test_converts_into_battle_error() {
        let err: BattleError =
            ServiceError::new_game_failed(BattleError::InvalidConfig("max_auto_turns must be positive".into()))
                .into();
        assert!(matches!(&err, BattleError::Session(_)));
        assert_eq!(
            err.to_string(),
            "Session error: NEW_GAME_FAILED: Invalid config: max_auto_turns must be positive"
        );
    }
}
