//! Simulation engine - owns the authoritative game state

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use super::direction::Direction;
use super::food;
use super::location::Location;
use super::snake::Snake;
use crate::config::GameConfig;
use crate::persistence::ScoreStore;
use crate::protocol::Snapshot;

/// Coarse lifecycle state of a game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Waiting for the first directional input
    Idle,
    /// Simulation advancing every tick
    Running,
    /// Terminal until an explicit reset
    Over,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Head left the arena
    Wall,
    /// Head hit a body segment
    SelfHit,
    /// Snake filled the whole arena, leaving no cell for food
    BoardFull,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::Wall => "wall",
            GameOverCause::SelfHit => "self_hit",
            GameOverCause::BoardFull => "board_full",
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Tick arrived while the game was not running; nothing changed
    Skipped,
    /// Plain one-cell translation
    Moved,
    /// Food consumed this tick
    Ate { score: u32, new_best: bool },
    /// The game ended this tick
    Died { cause: GameOverCause },
}

/// The authoritative game state and its single mutator.
///
/// All mutation goes through `submit_direction`, `tick` and `reset`; callers
/// observe the state through `snapshot`. The best score flows through the
/// injected `ScoreStore` so the engine stays free of ambient globals.
pub struct Engine {
    config: GameConfig,
    snake: Snake,
    heading: Direction,
    food: Location,
    score: u32,
    best_score: u32,
    phase: GamePhase,
    rng: StdRng,
    store: Arc<dyn ScoreStore>,
}

impl Engine {
    /// Create an engine in the IDLE phase with the canonical initial state
    pub fn new(config: GameConfig, store: Arc<dyn ScoreStore>) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Create an engine with a caller-provided RNG (deterministic tests)
    pub fn with_rng(config: GameConfig, store: Arc<dyn ScoreStore>, mut rng: StdRng) -> Self {
        let snake = Self::initial_snake(&config);
        let food = food::spawn(config.grid_size, &snake, &mut rng)
            .expect("arena must be larger than the initial snake");
        let best_score = store.load();

        Self {
            heading: config.initial_heading,
            config,
            snake,
            food,
            score: 0,
            best_score,
            phase: GamePhase::Idle,
            rng,
            store,
        }
    }

    fn initial_snake(config: &GameConfig) -> Snake {
        let center = Location::new(config.grid_size / 2, config.grid_size / 2);
        Snake::new(center, config.initial_heading, config.initial_snake_length)
    }

    /// Apply a directional command.
    ///
    /// The first input promotes IDLE to RUNNING; input while OVER is ignored;
    /// a request opposite to the current heading leaves the heading alone.
    /// Between ticks the last accepted request wins.
    pub fn submit_direction(&mut self, requested: Direction) {
        match self.phase {
            GamePhase::Over => {}
            GamePhase::Idle => {
                self.phase = GamePhase::Running;
                if !self.heading.is_opposite(&requested) {
                    self.heading = requested;
                }
            }
            GamePhase::Running => {
                if !self.heading.is_opposite(&requested) {
                    self.heading = requested;
                }
            }
        }
    }

    /// Advance the simulation one step
    pub fn tick(&mut self) -> TickEvent {
        if self.phase != GamePhase::Running {
            return TickEvent::Skipped;
        }

        let next_head = self.snake.head().step(self.heading);

        // A fatal move is never applied: the last valid position stays visible
        if !next_head.in_bounds(self.config.grid_size) {
            self.phase = GamePhase::Over;
            return TickEvent::Died {
                cause: GameOverCause::Wall,
            };
        }

        let will_grow = next_head == self.food;
        if self.snake.would_hit(next_head, will_grow) {
            self.phase = GamePhase::Over;
            return TickEvent::Died {
                cause: GameOverCause::SelfHit,
            };
        }

        self.snake.advance(next_head, will_grow);

        if !will_grow {
            return TickEvent::Moved;
        }

        self.score += 1;
        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
            self.store.save(self.best_score);
        }

        match food::spawn(self.config.grid_size, &self.snake, &mut self.rng) {
            Some(cell) => {
                self.food = cell;
                debug!("Food eaten (score {}), respawned at ({}, {})", self.score, cell.x, cell.y);
                TickEvent::Ate {
                    score: self.score,
                    new_best,
                }
            }
            None => {
                // Snake covers the arena: nothing left to eat
                info!("Arena filled at score {}", self.score);
                self.phase = GamePhase::Over;
                TickEvent::Died {
                    cause: GameOverCause::BoardFull,
                }
            }
        }
    }

    /// Start a fresh game: initial snake, heading and food, score zeroed,
    /// phase RUNNING. The best score is untouched.
    pub fn reset(&mut self) {
        self.snake = Self::initial_snake(&self.config);
        self.heading = self.config.initial_heading;
        self.score = 0;
        self.food = food::spawn(self.config.grid_size, &self.snake, &mut self.rng)
            .expect("arena must be larger than the initial snake");
        self.phase = GamePhase::Running;
    }

    /// Read-only frame for renderers and UI
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().iter().copied().collect(),
            food: self.food,
            score: self.score,
            best_score: self.best_score,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn head(&self) -> Location {
        self.snake.head()
    }

    pub fn food(&self) -> Location {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        self.config.tick_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryScoreStore;

    fn engine_with(config: GameConfig) -> Engine {
        Engine::with_rng(
            config,
            Arc::new(MemoryScoreStore::new()),
            StdRng::seed_from_u64(99),
        )
    }

    fn running_engine(config: GameConfig) -> Engine {
        let mut engine = engine_with(config);
        engine.submit_direction(Direction::Right);
        engine
    }

    #[test]
    fn test_starts_idle_with_initial_state() {
        let engine = engine_with(GameConfig::default());

        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(engine.snake.len(), 3);
        assert_eq!(engine.snake.head(), Location::new(10, 10));
        assert!(!engine.snake.occupies(engine.food));
    }

    #[test]
    fn test_first_input_starts_game() {
        let mut engine = engine_with(GameConfig::default());
        engine.submit_direction(Direction::Up);

        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.heading(), Direction::Up);
    }

    #[test]
    fn test_first_input_opposite_still_starts() {
        // Left is the reverse of the initial Right heading: the game starts
        // but the heading stays put
        let mut engine = engine_with(GameConfig::default());
        engine.submit_direction(Direction::Left);

        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.heading(), Direction::Right);
    }

    #[test]
    fn test_opposite_heading_rejected() {
        let mut engine = running_engine(GameConfig::default());

        engine.submit_direction(Direction::Left);
        assert_eq!(engine.heading(), Direction::Right);

        // 90-degree turns are fine, and the last accepted input wins
        engine.submit_direction(Direction::Down);
        engine.submit_direction(Direction::Right);
        assert_eq!(engine.heading(), Direction::Right);
    }

    #[test]
    fn test_tick_outside_running_is_skipped() {
        let mut engine = engine_with(GameConfig::default());
        assert_eq!(engine.tick(), TickEvent::Skipped);
        assert_eq!(engine.snake.len(), 3);
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(0, 0);

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickEvent::Moved);
            assert_eq!(engine.snake.len(), 3);
        }
        assert_eq!(engine.snake.head(), Location::new(15, 10));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(11, 10);

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::Ate {
                score: 1,
                new_best: true
            }
        );
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.phase(), GamePhase::Running);
        // Respawned food never lands on the post-growth body
        assert!(!engine.snake.occupies(engine.food));
    }

    #[test]
    fn test_growth_scenario_small_grid() {
        // 5x5 arena: snake [(2,2),(1,2),(0,2)] heading Right, food at (3,2)
        let mut engine = running_engine(GameConfig::small());
        engine.food = Location::new(3, 2);

        engine.tick();

        let cells: Vec<Location> = engine.snake.cells().iter().copied().collect();
        assert_eq!(
            cells,
            vec![Location::new(3, 2), Location::new(2, 2), Location::new(1, 2)]
        );
        assert_eq!(engine.score(), 1);
        assert!(!engine.snake.occupies(engine.food));
        assert!(engine.food.in_bounds(5));
    }

    #[test]
    fn test_wall_hit_ends_game_leaving_snake() {
        let mut engine = running_engine(GameConfig::small());
        engine.food = Location::new(0, 0);

        // Head walks (3,2), (4,2); the next prospective head is x = 5
        assert_eq!(engine.tick(), TickEvent::Moved);
        assert_eq!(engine.tick(), TickEvent::Moved);
        let before: Vec<Location> = engine.snake.cells().iter().copied().collect();

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::Died {
                cause: GameOverCause::Wall
            }
        );
        assert_eq!(engine.phase(), GamePhase::Over);
        let after: Vec<Location> = engine.snake.cells().iter().copied().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_self_hit_ends_game() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(0, 0);
        engine.snake = Snake::new(Location::new(5, 5), Direction::Right, 5);

        // Right, Down, Left, then Up aims at (5,5): a mid-body segment
        engine.tick();
        engine.submit_direction(Direction::Down);
        engine.tick();
        engine.submit_direction(Direction::Left);
        engine.tick();
        engine.submit_direction(Direction::Up);
        let before: Vec<Location> = engine.snake.cells().iter().copied().collect();

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::Died {
                cause: GameOverCause::SelfHit
            }
        );
        assert_eq!(engine.phase(), GamePhase::Over);
        let after: Vec<Location> = engine.snake.cells().iter().copied().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_legal() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(0, 0);
        engine.snake = Snake::new(Location::new(5, 5), Direction::Right, 4);

        // A length-4 snake turning through a 2x2 block chases its own tail:
        // after Right, Down, Left, the Up move enters the cell the tail
        // vacates this very tick
        engine.tick();
        engine.submit_direction(Direction::Down);
        engine.tick();
        engine.submit_direction(Direction::Left);
        engine.tick();
        engine.submit_direction(Direction::Up);
        assert_eq!(*engine.snake.cells().back().unwrap(), Location::new(5, 5));

        assert_eq!(engine.tick(), TickEvent::Moved);
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.snake.head(), Location::new(5, 5));
    }

    #[test]
    fn test_tail_cell_is_fatal_on_growth_tick() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(0, 0);
        engine.snake = Snake::new(Location::new(5, 5), Direction::Right, 4);

        engine.tick();
        engine.submit_direction(Direction::Down);
        engine.tick();
        engine.submit_direction(Direction::Left);
        engine.tick();
        engine.submit_direction(Direction::Up);

        // Same maneuver, but food sits on the tail cell: the tail stays put
        let tail = *engine.snake.cells().back().unwrap();
        engine.food = tail;

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::Died {
                cause: GameOverCause::SelfHit
            }
        );
        assert_eq!(engine.phase(), GamePhase::Over);
    }

    #[test]
    fn test_input_ignored_while_over() {
        let mut engine = running_engine(GameConfig::small());
        engine.food = Location::new(0, 0);
        while engine.phase() == GamePhase::Running {
            engine.tick();
        }

        engine.submit_direction(Direction::Up);
        assert_eq!(engine.phase(), GamePhase::Over);
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(engine.tick(), TickEvent::Skipped);
    }

    #[test]
    fn test_best_score_persists_through_store() {
        let store = Arc::new(MemoryScoreStore::new());
        let mut engine = Engine::with_rng(
            GameConfig::default(),
            store.clone(),
            StdRng::seed_from_u64(5),
        );
        engine.submit_direction(Direction::Right);

        engine.food = Location::new(11, 10);
        engine.tick();
        assert_eq!(engine.best_score(), 1);
        assert_eq!(store.get(), 1);

        engine.food = Location::new(12, 10);
        engine.tick();
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn test_best_score_only_saved_when_exceeded() {
        let store = Arc::new(MemoryScoreStore::with_score(10));
        let mut engine = Engine::with_rng(
            GameConfig::default(),
            store.clone(),
            StdRng::seed_from_u64(5),
        );
        engine.submit_direction(Direction::Right);

        engine.food = Location::new(11, 10);
        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::Ate {
                score: 1,
                new_best: false
            }
        );
        assert_eq!(engine.best_score(), 10);
        assert_eq!(store.get(), 10);
    }

    #[test]
    fn test_reset_restores_initial_state_keeping_best() {
        let mut engine = running_engine(GameConfig::default());
        engine.food = Location::new(11, 10);
        engine.tick();
        engine.food = Location::new(0, 0);
        engine.submit_direction(Direction::Up);
        while engine.phase() == GamePhase::Running {
            engine.tick();
        }

        engine.reset();

        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score(), 1);
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(engine.snake.len(), 3);
        assert_eq!(engine.snake.head(), Location::new(10, 10));
        assert!(!engine.snake.occupies(engine.food));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let engine = engine_with(GameConfig::default());
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.snake[0], Location::new(10, 10));
        assert_eq!(snapshot.snake[0], engine.head());
        assert_eq!(snapshot.food, engine.food());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, GamePhase::Idle);
    }
}
