//! Grid Tactics - turn-based skirmish engine on a 4x4 board
//!
//! Two parties of up to four units face off, one half of the board each.
//! The engine is a pure state machine: every action turns one `BattleState`
//! snapshot into the next. The `service` module wraps it in a session that
//! validates player commands and plays the enemy side.

pub mod battle;
pub mod core;
pub mod roster;
pub mod service;
pub mod skills;
