//! Battle system - turn-based skirmish on a 4x4 board
//!
//! Each side owns two columns. Units act one at a time in a fixed sequence,
//! every action is resolved into a fresh state snapshot, and the battle ends
//! when one side has nobody left standing.
//!
//! Flow of a turn:
//! - `targeting` tells a caller which commands are legal
//! - `resolution` applies one command and advances the turn
//! - `orchestrator` lets an `ActionStrategy` play the non-player turns

pub mod ai;
pub mod buffs;
pub mod constants;
pub mod grid;
pub mod initiative;
pub mod orchestrator;
pub mod resolution;
pub mod state;
pub mod targeting;

// Re-exports for convenient access
pub use ai::{pick_targets, ActionStrategy, DecisionPolicy};
pub use buffs::{
    apply_buff, apply_regen_healing, buff_magnitude, decrement_durations, effective_initiative,
    effective_power, has_buff, is_defending, remove_buff, Buff, BuffKind,
};
pub use constants::*;
pub use grid::{Grid, GridCell, Unit};
pub use initiative::{is_player_controlled, TurnOrder};
pub use orchestrator::{execute_with_auto_play, run_until_player_turn};
pub use resolution::{execute_action, strike_damage};
pub use state::{ActionCommand, BattleRules, BattleState, BattleStatus};
pub use targeting::{
    get_valid_targets, valid_destinations, validate_destination, validate_targets,
    TargetValidation,
};
