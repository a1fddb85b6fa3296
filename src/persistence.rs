//! Best-score persistence behind an injected capability
//!
//! The engine only ever sees the `ScoreStore` trait, so hosts decide where
//! the record lives. Store failures are absorbed: reads fall back to 0 and
//! failed writes are dropped with a warning.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, warn};

/// Synchronous key-value store for the best score
pub trait ScoreStore: Send + Sync {
    /// Read the persisted best score, 0 if absent or unreadable
    fn load(&self) -> u32;

    /// Persist a new best score
    fn save(&self, score: u32);
}

/// Best score kept in a plain text file
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring malformed best score in {}", self.path.display());
                0
            }),
            Err(e) => {
                debug!("No best score at {} ({})", self.path.display(), e);
                0
            }
        }
    }

    fn save(&self, score: u32) {
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            warn!("Failed to save best score to {}: {}", self.path.display(), e);
        }
    }
}

/// Best score kept in memory, for tests and ephemeral hosts
#[derive(Default)]
pub struct MemoryScoreStore {
    score: AtomicU32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing record
    pub fn with_score(score: u32) -> Self {
        Self {
            score: AtomicU32::new(score),
        }
    }

    /// Current stored value
    pub fn get(&self) -> u32 {
        self.score.load(Ordering::SeqCst)
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.get()
    }

    fn save(&self, score: u32) {
        self.score.store(score, Ordering::SeqCst);
    }
}
