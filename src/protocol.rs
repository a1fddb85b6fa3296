//! Command and snapshot types for the host line protocol

use serde::Serialize;

use crate::game::direction::Direction;
use crate::game::engine::GamePhase;
use crate::game::location::Location;

/// Commands delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Directional input for the snake
    Steer(Direction),
    /// Start a fresh game
    Reset,
}

impl Command {
    /// Parse a command from a text line; anything unrecognized is `None`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(dir) = Direction::from_str(s) {
            return Some(Command::Steer(dir));
        }

        if s.eq_ignore_ascii_case("reset") {
            return Some(Command::Reset);
        }

        None
    }
}

/// Read-only frame published after every tick and every reset
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Location>,
    /// Current food cell
    pub food: Location,
    /// Foods eaten this game
    pub score: u32,
    /// Best score across game instances
    pub best_score: u32,
    /// Lifecycle phase
    pub phase: GamePhase,
}

impl Snapshot {
    /// Serialize the frame to a JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
