//! Location struct for grid positions

use serde::{Deserialize, Serialize};
use std::hash::Hash;

use rand::Rng;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Create a new location
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in the given direction.
    /// The result may lie outside the arena; callers check `in_bounds`.
    pub fn step(&self, direction: Direction) -> Location {
        let (dx, dy) = direction.delta();
        Location::new(self.x + dx, self.y + dy)
    }

    /// Whether this cell lies inside a `grid_size` x `grid_size` arena
    pub fn in_bounds(&self, grid_size: i32) -> bool {
        self.x >= 0 && self.x < grid_size && self.y >= 0 && self.y < grid_size
    }

    /// Uniformly random cell inside the arena
    pub fn random_within(grid_size: i32, rng: &mut impl Rng) -> Self {
        Location::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size))
    }
}
