//! Game event logging for replay and analysis

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

use crate::config::{ENABLE_EVENT_LOGGING, EVENT_LOG_FILE};
use crate::game::direction::Direction;
use crate::game::location::Location;

/// Types of game events that can be logged
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// First directional input arrived
    GameStarted,
    /// Accepted heading change
    DirectionChange { direction: String },
    /// Snake ate the food
    FoodEaten { location: LocationData, score: u32 },
    /// The score surpassed the stored best
    NewBestScore { score: u32 },
    /// The game ended
    GameOver { cause: String, score: u32 },
    /// A fresh game replaced the previous one
    GameReset,
}

/// Location data for serialization
#[derive(Debug, Clone, Serialize)]
pub struct LocationData {
    pub x: i32,
    pub y: i32,
}

impl From<Location> for LocationData {
    fn from(loc: Location) -> Self {
        Self { x: loc.x, y: loc.y }
    }
}

/// Logged event with timestamp
#[derive(Debug, Serialize)]
struct LogEntry {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    /// The event data
    #[serde(flatten)]
    event: GameEvent,
}

/// Game event logger
pub struct EventLogger {
    /// File writer (None if logging disabled)
    writer: Option<Mutex<BufWriter<File>>>,
    /// Whether logging is enabled
    enabled: bool,
}

impl EventLogger {
    /// Create a new event logger
    pub fn new() -> Self {
        if !ENABLE_EVENT_LOGGING {
            info!("Event logging is disabled");
            return Self {
                writer: None,
                enabled: false,
            };
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(EVENT_LOG_FILE)
        {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", EVENT_LOG_FILE);
                Self {
                    writer: Some(Mutex::new(BufWriter::new(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to open event log file: {}", e);
                Self {
                    writer: None,
                    enabled: false,
                }
            }
        }
    }

    /// A logger that never writes, for tests and quiet hosts
    pub fn disabled() -> Self {
        Self {
            writer: None,
            enabled: false,
        }
    }

    /// Log a game event
    pub fn log(&self, event: GameEvent) {
        if !self.enabled {
            return;
        }

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = LogEntry { timestamp_ms, event };

        if let Some(ref writer) = self.writer {
            if let Ok(mut w) = writer.lock() {
                if let Ok(json) = serde_json::to_string(&entry) {
                    let _ = writeln!(w, "{}", json);
                    let _ = w.flush();
                }
            }
        }
    }

    /// Log the IDLE to RUNNING transition
    pub fn log_started(&self) {
        self.log(GameEvent::GameStarted);
    }

    /// Log an accepted heading change
    pub fn log_direction(&self, direction: Direction) {
        self.log(GameEvent::DirectionChange {
            direction: format!("{:?}", direction),
        });
    }

    /// Log food eaten
    pub fn log_food_eaten(&self, location: Location, score: u32) {
        self.log(GameEvent::FoodEaten {
            location: location.into(),
            score,
        });
    }

    /// Log a new best score
    pub fn log_best_score(&self, score: u32) {
        self.log(GameEvent::NewBestScore { score });
    }

    /// Log the end of a game
    pub fn log_game_over(&self, cause: &str, score: u32) {
        self.log(GameEvent::GameOver {
            cause: cause.to_string(),
            score,
        });
    }

    /// Log a reset
    pub fn log_reset(&self) {
        self.log(GameEvent::GameReset);
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}
