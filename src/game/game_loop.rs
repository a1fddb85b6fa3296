//! Game loop - ticks the engine while a game is running and drains commands
//!
//! One spawned task owns the engine, so tick processing and command handling
//! are strictly interleaved, never concurrent. The tick interval exists only
//! while the phase is RUNNING: every path out of RUNNING drops it, and a
//! reset replaces the whole state before a fresh interval is armed.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use crate::broadcast::Broadcaster;
use crate::event_logger::EventLogger;
use crate::game::engine::{Engine, GamePhase, TickEvent};
use crate::protocol::Command;

/// Spawn the game loop task
pub fn spawn_game_loop(
    engine: Engine,
    commands: mpsc::Receiver<Command>,
    broadcaster: Arc<dyn Broadcaster>,
    events: Arc<EventLogger>,
) -> JoinHandle<()> {
    tokio::spawn(run(engine, commands, broadcaster, events))
}

async fn run(
    mut engine: Engine,
    mut commands: mpsc::Receiver<Command>,
    broadcaster: Arc<dyn Broadcaster>,
    events: Arc<EventLogger>,
) {
    // Publish the pre-game frame so observers can draw before the first input
    broadcaster.send(engine.snapshot()).await;

    loop {
        if engine.phase() == GamePhase::Running {
            let period = engine.tick_interval();
            let mut ticker = interval_at(Instant::now() + period, period);

            // The ticker never outlives this scope
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let event = engine.tick();
                        record_tick(&events, &engine, event);
                        broadcaster.send(engine.snapshot()).await;
                        if engine.phase() != GamePhase::Running {
                            break;
                        }
                    }
                    cmd = commands.recv() => {
                        match cmd {
                            Some(cmd) => {
                                let state_replaced =
                                    apply_command(&mut engine, cmd, &events, &broadcaster).await;
                                if state_replaced {
                                    break;
                                }
                            }
                            None => return,
                        }
                    }
                }
            }
        } else {
            // Nothing to tick: block on the next command
            match commands.recv().await {
                Some(cmd) => {
                    apply_command(&mut engine, cmd, &events, &broadcaster).await;
                }
                None => return,
            }
        }
    }
}

/// Apply one command to the engine. Returns true when the command replaced
/// the game state, which obliges the caller to arm a fresh ticker.
async fn apply_command(
    engine: &mut Engine,
    cmd: Command,
    events: &EventLogger,
    broadcaster: &Arc<dyn Broadcaster>,
) -> bool {
    match cmd {
        Command::Steer(direction) => {
            let phase_before = engine.phase();
            let heading_before = engine.heading();

            engine.submit_direction(direction);

            if phase_before == GamePhase::Idle && engine.phase() == GamePhase::Running {
                info!("Game started");
                events.log_started();
            }
            if engine.heading() != heading_before {
                debug!("Heading changed to {:?}", direction);
                events.log_direction(direction);
            }
            false
        }
        Command::Reset => {
            // Nothing to reset before the first game
            if engine.phase() == GamePhase::Idle {
                return false;
            }

            engine.reset();
            info!("Game reset (best score {})", engine.best_score());
            events.log_reset();
            broadcaster.send(engine.snapshot()).await;
            true
        }
    }
}

fn record_tick(events: &EventLogger, engine: &Engine, event: TickEvent) {
    match event {
        TickEvent::Skipped | TickEvent::Moved => {}
        TickEvent::Ate { score, new_best } => {
            events.log_food_eaten(engine.head(), score);
            if new_best {
                info!("New best score: {}", score);
                events.log_best_score(score);
            }
        }
        TickEvent::Died { cause } => {
            info!("Game over ({}) at score {}", cause.as_str(), engine.score());
            events.log_game_over(cause.as_str(), engine.score());
        }
    }
}
