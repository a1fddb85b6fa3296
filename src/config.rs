//! Game configuration constants

use std::time::Duration;

use crate::game::direction::Direction;

/// Grid side length in cells (the arena is GRID_SIZE x GRID_SIZE)
pub const GRID_SIZE: i32 = 20;

/// Simulation tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 175;

/// Snake length at the start of a game
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Heading at the start of a game
pub const INITIAL_HEADING: Direction = Direction::Right;

/// Command channel capacity
pub const COMMAND_CAPACITY: usize = 100;

/// Snapshot broadcast channel capacity
pub const BROADCAST_CAPACITY: usize = 100;

/// Uniform placement attempts before falling back to scanning free cells
pub const FOOD_SAMPLE_ATTEMPTS: usize = 128;

/// File the best score is persisted to
pub const HIGH_SCORE_FILE: &str = "snake_high_score";

// =============================================================================
// Event Logging
// =============================================================================

/// Enable game event logging
pub const ENABLE_EVENT_LOGGING: bool = true;

/// Log file path
pub const EVENT_LOG_FILE: &str = "game_events.log";

/// Parameters a single game instance runs under
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Grid side length in cells
    pub grid_size: i32,
    /// Time between simulation ticks
    pub tick_interval: Duration,
    /// Snake length after (re)start
    pub initial_snake_length: usize,
    /// Heading after (re)start
    pub initial_heading: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            initial_heading: INITIAL_HEADING,
        }
    }
}

impl GameConfig {
    /// A small 5x5 arena, handy for exercising wall and growth paths quickly
    pub fn small() -> Self {
        Self {
            grid_size: 5,
            ..Self::default()
        }
    }
}
