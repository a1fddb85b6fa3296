//! Snake game engine host
//!
//! Runs the single-player simulation behind a line protocol: directional
//! commands and `reset` arrive on stdin, one JSON frame per tick leaves on
//! stdout. Rendering is an external concern; this host only publishes frames.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod broadcast;
mod config;
mod event_logger;
mod game;
mod persistence;
mod protocol;

use broadcast::{Broadcaster, InMemoryBroadcaster};
use config::{GameConfig, COMMAND_CAPACITY, HIGH_SCORE_FILE};
use event_logger::EventLogger;
use game::game_loop::spawn_game_loop;
use game::Engine;
use persistence::FileScoreStore;
use protocol::Command;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_core=debug".into()),
        )
        .init();

    let config = GameConfig::default();
    let store = Arc::new(FileScoreStore::new(HIGH_SCORE_FILE));
    let events = Arc::new(EventLogger::new());
    let engine = Engine::new(config.clone(), store);
    let broadcaster: Arc<dyn Broadcaster> = Arc::new(InMemoryBroadcaster::new());

    // Frames go to stdout as JSON lines
    let mut frames = broadcaster.subscribe();
    let print_task = tokio::spawn(async move {
        loop {
            match frames.recv().await {
                Ok(snapshot) => println!("{}", snapshot.to_json()),
                Err(RecvError::Lagged(n)) => {
                    warn!("Frame consumer lagged by {} frames", n);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
    let game_task = spawn_game_loop(engine, commands_rx, broadcaster.clone(), events);

    info!(
        "Snake engine running ({}x{} grid, tick every {}ms)",
        config.grid_size,
        config.grid_size,
        config.tick_interval.as_millis()
    );
    info!("Commands: up / down / left / right / reset");

    // Commands come from stdin, one per line; unknown input is ignored
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match Command::parse(&line) {
            Some(cmd) => {
                if commands_tx.send(cmd).await.is_err() {
                    break;
                }
            }
            None => debug!("Ignoring unrecognized input: {:?}", line.trim()),
        }
    }

    // Stdin closed: drop the command channel so the game loop drains and stops
    drop(commands_tx);
    let _ = game_task.await;
    drop(broadcaster);
    let _ = print_task.await;

    info!("Snake engine stopped");
}
