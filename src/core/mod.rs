pub mod config;
pub mod error;
pub mod types;

pub use config::{BattleConfig, TurnOrderPolicy};
pub use error::{BattleError, Result};
pub use types::{GridPosition, Team, UnitId};
