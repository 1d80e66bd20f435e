//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{GRID_COLS, GRID_ROWS};

/// Unique identifier for units on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Team affiliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    /// Columns that make up this team's half of the board, front-most first
    ///
    /// The front column is the one nearest the centre line.
    pub fn home_columns(self) -> Vec<usize> {
        let half = GRID_COLS / 2;
        match self {
            Team::Player => (0..half).rev().collect(),
            Team::Enemy => (half..GRID_COLS).collect(),
        }
    }

    /// Which team owns a column
    pub fn for_column(col: usize) -> Team {
        if col < GRID_COLS / 2 {
            Team::Player
        } else {
            Team::Enemy
        }
    }

    /// Lowercase key, as used in unit ids
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Player => "player",
            Team::Enemy => "enemy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Player => "Player",
            Team::Enemy => "Enemy",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cell coordinate on the battle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_ROWS && self.col < GRID_COLS
    }

    /// Team whose half of the board this cell belongs to
    pub fn home_team(&self) -> Team {
        Team::for_column(self.col)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_columns_front_first() {
        assert_eq!(Team::Player.home_columns(), vec![1, 0]);
        assert_eq!(Team::Enemy.home_columns(), vec![2, 3]);
    }

    #[test]
    fn test_column_ownership() {
        assert_eq!(Team::for_column(0), Team::Player);
        assert_eq!(Team::for_column(1), Team::Player);
        assert_eq!(Team::for_column(2), Team::Enemy);
        assert_eq!(Team::for_column(3), Team::Enemy);
    }

    #[test]
    fn test_position_bounds() {
        assert!(GridPosition::new(3, 3).in_bounds());
        assert!(!GridPosition::new(4, 0).in_bounds());
        assert!(!GridPosition::new(0, 4).in_bounds());
    }

    #[test]
    fn test_unit_id_serializes_as_plain_string() {
        let id = UnitId::new("player-warrior-0");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"player-warrior-0\"");
    }
}
