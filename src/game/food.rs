//! Food placement - always lands on a cell the snake does not occupy

use rand::Rng;

use super::location::Location;
use super::snake::Snake;
use crate::config::FOOD_SAMPLE_ATTEMPTS;

/// Pick a cell for the next food item.
///
/// Rejection-samples uniformly over the arena, then falls back to choosing
/// from the remaining free cells so placement terminates even on a nearly
/// full board. Returns `None` only when the snake covers every cell.
pub fn spawn(grid_size: i32, snake: &Snake, rng: &mut impl Rng) -> Option<Location> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let cell = Location::random_within(grid_size, rng);
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Location> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Location::new(x, y)))
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}
