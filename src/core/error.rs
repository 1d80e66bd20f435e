use thiserror::Error;

use crate::core::types::{GridPosition, UnitId};
use crate::skills::SkillId;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Target has already fallen: {0}")]
    TargetIncapacitated(UnitId),

    #[error("Skill {skill:?} is missing target #{index}")]
    MissingTarget { skill: SkillId, index: usize },

    #[error("Cell at {0} is already occupied")]
    CellOccupied(GridPosition),

    #[error("Position {0} is outside the grid")]
    OutOfBounds(GridPosition),

    #[error("{unit} cannot move to {position}")]
    InvalidDestination { unit: UnitId, position: GridPosition },

    #[error("Invalid party: {0}")]
    InvalidParty(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
