//! Snake body with movement and collision queries

use std::collections::VecDeque;

use super::direction::Direction;
use super::location::Location;

/// The snake body (head is front, tail is back)
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Location>,
}

impl Snake {
    /// Create a straight snake of `length` cells with the given head,
    /// extending away from the heading
    pub fn new(head: Location, heading: Direction, length: usize) -> Self {
        let (dx, dy) = heading.delta();
        let mut body = VecDeque::with_capacity(length);

        for i in 0..length.max(1) as i32 {
            body.push_back(Location::new(head.x - dx * i, head.y - dy * i));
        }

        Self { body }
    }

    /// Get the snake's head location
    pub fn head(&self) -> Location {
        *self.body.front().expect("Snake must have a head")
    }

    /// Get all body locations, head first
    pub fn cells(&self) -> &VecDeque<Location> {
        &self.body
    }

    /// Number of body segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether any segment occupies the given cell
    pub fn occupies(&self, cell: Location) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head into `cell` hits the body.
    ///
    /// On a non-growth move the tail vacates its cell in the same step, so
    /// the tail cell is excluded from the check; on a growth move the tail
    /// stays put and the full body counts.
    pub fn would_hit(&self, cell: Location, will_grow: bool) -> bool {
        let checked = if will_grow {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(checked).any(|c| *c == cell)
    }

    /// Move the head into `new_head`, keeping the tail when growing
    pub fn advance(&mut self, new_head: Location, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}
