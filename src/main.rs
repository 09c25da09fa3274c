//! Drop Merge headless driver
//!
//! Runs the engine without a window: drops balls along a scripted sweep of
//! the spawn strip, logs merges, and prints the final snapshot as JSON.

use anyhow::{Context, Result, bail};
use clap::Parser;
use glam::Vec2;

use drop_merge::consts::SIM_DT;
use drop_merge::sim::{FixedStepper, GameEvent, GameState, TickInput};
use drop_merge::{GameConfig, RulesetPreset};

#[derive(Parser, Debug)]
#[command(name = "drop-merge", about = "Run the merge engine headless")]
struct Args {
    /// RNG seed for next-ball labels
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Frames between scripted drops
    #[arg(long, default_value_t = 40)]
    drop_every: u32,
    /// Rules preset (classic, endless)
    #[arg(long, default_value = "classic")]
    preset: String,
    /// JSON config file (overrides the preset)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn load_config(args: &Args) -> Result<GameConfig> {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        return GameConfig::from_json_str(&json)
            .with_context(|| format!("loading config {}", path.display()));
    }
    match RulesetPreset::from_str(&args.preset) {
        Some(preset) => Ok(GameConfig::from_preset(preset)),
        None => bail!("unknown preset '{}'", args.preset),
    }
}

/// Sweep drop points back and forth across the container
fn scripted_drop(config: &GameConfig, index: u32) -> Vec2 {
    let left = config.playfield.left_wall() + 20.0;
    let right = config.playfield.right_wall() - 20.0;
    let t = ((index as f32) * 0.37).fract();
    let y = (config.rules.spawn_strip_top + config.rules.spawn_strip_bottom) * 0.5;
    Vec2::new(left + (right - left) * t, y)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!("Drop Merge (headless) starting with seed {}", args.seed);

    let mut state = GameState::new(config, args.seed)?;
    let mut stepper = FixedStepper::new();
    let mut drops = 0;

    for frame in 0..args.frames {
        let mut input = TickInput::default();
        if args.drop_every > 0 && frame % args.drop_every == 0 {
            input.spawn = Some(scripted_drop(&config, drops));
            drops += 1;
        }

        stepper.advance(&mut state, &input, SIM_DT);

        for event in &state.events {
            match event {
                GameEvent::Merged { size_label, .. } => log::info!(
                    "Frame {}: merged into label {} (score {})",
                    frame,
                    size_label,
                    state.score
                ),
                GameEvent::Cleared { .. } => {
                    log::info!("Frame {}: max-size pair cleared (score {})", frame, state.score)
                }
                GameEvent::GameOver { reason } => {
                    log::info!("Frame {}: game over ({:?})", frame, reason)
                }
                GameEvent::SpawnRejected { pos, reason } => {
                    log::debug!("Frame {}: drop at {:?} refused: {}", frame, pos, reason)
                }
                GameEvent::Spawned { .. } => {}
            }
        }

        if state.is_game_over() {
            break;
        }
    }

    let snapshot = state.snapshot();
    println!("{}", snapshot.to_json().context("serializing snapshot")?);
    log::info!(
        "Finished: {} balls, score {}, game over: {}",
        snapshot.balls.len(),
        snapshot.score,
        snapshot.game_over
    );
    Ok(())
}
