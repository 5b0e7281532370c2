//! Headless runner (default binary).
//!
//! Drives a session with a simple autoplay policy at a fixed simulated frame
//! rate and reports the outcome. It plays the part of the input and render
//! collaborators: it only sends commands and ticks, and only reads snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockfall::core::{GameConfig, GameState, SimpleRng};
use blockfall::types::GameAction;

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Run a headless falling-block session")]
struct Args {
    /// Seed for piece selection (overrides the config file)
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 20_000)]
    frames: u32,

    /// Simulated time per frame, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// JSON session config (board size, timing, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of a summary line
    #[arg(long)]
    json: bool,

    /// Commands played before autoplay takes over, e.g. `moveLeft,hardDrop`
    #[arg(long, value_delimiter = ',')]
    script: Vec<GameAction>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut game = GameState::with_config(config).context("invalid session config")?;
    tracing::info!(
        width = game.config().width,
        height = game.config().height,
        seed = game.config().seed,
        "session started"
    );

    for &action in &args.script {
        let changed = game.apply_action(action);
        tracing::debug!(action = action.as_str(), changed, "scripted command");
    }

    let frames = run(&mut game, &args);

    let snapshot = game.snapshot();
    if args.json {
        let out = serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?;
        println!("{out}");
    } else {
        println!(
            "frames={} score={} lines={} level={} pieces={} game_over={}",
            frames,
            snapshot.score,
            snapshot.lines,
            snapshot.level,
            snapshot.piece_id,
            snapshot.game_over
        );
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Play until game over or the frame limit. Returns frames played.
fn run(game: &mut GameState, args: &Args) -> u32 {
    let frame = Duration::from_millis(args.frame_ms);
    let mut policy = SimpleRng::new(game.config().seed ^ 0x9e37_79b9);

    for played in 0..args.frames {
        if game.game_over() {
            tracing::info!(frames = played, score = game.score(), "game over");
            return played;
        }

        if let Some(action) = autoplay(&mut policy) {
            game.apply_action(action);
        }
        game.tick(frame);

        if let Some(event) = game.take_last_event() {
            if event.lines_cleared > 0 {
                tracing::info!(
                    lines = event.lines_cleared,
                    points = event.points,
                    level = event.level,
                    "rows cleared"
                );
            }
        }
    }
    args.frames
}

/// Random command mix: mostly idle frames, some shifts and rotations.
fn autoplay(rng: &mut SimpleRng) -> Option<GameAction> {
    match rng.next_range(100) {
        0..=9 => Some(GameAction::MoveLeft),
        10..=19 => Some(GameAction::MoveRight),
        20..=27 => Some(GameAction::Rotate),
        28..=29 => Some(GameAction::SoftDrop),
        30 => Some(GameAction::HardDrop),
        _ => None,
    }
}
