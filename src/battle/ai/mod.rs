//! Decision making for units nobody is steering
//!
//! Architecture: trait + default implementation
//! - `ActionStrategy` is the seam the auto-play loop drives, so callers can
//!   swap in scripted or smarter opponents
//! - `DecisionPolicy` is the stock heuristic: random skill, greedy targets

mod policy;

pub use policy::{pick_targets, DecisionPolicy};

use crate::battle::state::{ActionCommand, BattleState};
use crate::core::types::UnitId;

/// Chooses the next action for a unit
pub trait ActionStrategy {
    /// Pick a command for `unit_id`, which is the active unit of `state`
    ///
    /// Must always produce something: fall back to `ActionCommand::pass()`
    /// when nothing sensible is available.
    fn choose_action(&mut self, state: &BattleState, unit_id: &UnitId) -> ActionCommand;
}
