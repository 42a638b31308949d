#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Retro Bomber sessions.
//!
//! Without arguments it rolls fresh seeds, simulates a fixed number of
//! frames and prints the resulting arena plus a session transfer string, so
//! an interesting run can be replayed or handed to another machine.

mod scene_text;
mod seed_transfer;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use retro_bomber_core::{Direction, InputFrame};
use retro_bomber_rendering::{sound_cues, SoundCue};
use retro_bomber_world::{Outcome, GRID_COLUMNS, GRID_ROWS};

use seed_transfer::SessionSeedSnapshot;
use session::{Session, SessionSeeds};

/// Headless session runner for the Retro Bomber simulation.
#[derive(Debug, Parser)]
#[command(name = "retro-bomber")]
struct Args {
    /// Seed controlling map generation, spawns and enemy behavior.
    #[arg(long)]
    seed: Option<u64>,
    /// Encoded transfer string of a previously exported session.
    #[arg(long, conflicts_with = "seed")]
    session: Option<String>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Simulated duration of a single frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_millis: u64,
    /// Drive the player with a deterministic bot instead of idling.
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seeds = resolve_seeds(&args)?;

    let mut session = Session::new(seeds);
    let mut bot = args.demo.then(|| DemoBot::new(seeds.world));
    let dt = Duration::from_millis(args.frame_millis);
    let mut frames_run = 0;
    let mut cues = Vec::new();
    for _ in 0..args.frames {
        let input = bot
            .as_mut()
            .map_or_else(InputFrame::default, DemoBot::next_input);
        let events = session.frame(dt, input);
        cues.extend(sound_cues(&events));
        frames_run += 1;
        if session.outcome() == Outcome::GameOver {
            break;
        }
    }

    let presentation = session
        .presentation()
        .context("failed to build the scene presentation")?;
    println!("{}", presentation.window_title);
    println!("{}", scene_text::render(&presentation.scene));
    println!("frames {frames_run}  outcome {:?}", session.outcome());
    println!(
        "explosions {}  shots {}  lives lost {}",
        count_cue(&cues, SoundCue::Explosion),
        count_cue(&cues, SoundCue::Shot),
        count_cue(&cues, SoundCue::LifeLost),
    );

    let snapshot = SessionSeedSnapshot {
        columns: GRID_COLUMNS,
        rows: GRID_ROWS,
        world_seed: seeds.world,
        ai_seed: seeds.ai,
    };
    println!("session {}", snapshot.encode());
    Ok(())
}

fn count_cue(cues: &[SoundCue], cue: SoundCue) -> usize {
    cues.iter().filter(|&&candidate| candidate == cue).count()
}

/// Deterministic player stand-in for headless demo runs.
///
/// Holds a randomly drawn direction for a couple dozen frames before
/// redrawing, and occasionally requests a bomb. Restarts are never
/// requested, so a demo run stops at its first game over.
struct DemoBot {
    rng: ChaCha20Rng,
    held: Option<Direction>,
    hold_frames: u32,
}

impl DemoBot {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            held: None,
            hold_frames: 0,
        }
    }

    fn next_input(&mut self) -> InputFrame {
        if self.hold_frames == 0 {
            self.held = match self.rng.gen_range(0..5) {
                0 => Some(Direction::North),
                1 => Some(Direction::East),
                2 => Some(Direction::South),
                3 => Some(Direction::West),
                _ => None,
            };
            self.hold_frames = self.rng.gen_range(10..40);
        } else {
            self.hold_frames -= 1;
        }

        InputFrame {
            direction: self.held,
            place_bomb: self.rng.gen_ratio(1, 48),
            restart: false,
        }
    }
}

fn resolve_seeds(args: &Args) -> Result<SessionSeeds> {
    if let Some(encoded) = &args.session {
        let snapshot = SessionSeedSnapshot::decode(encoded)
            .context("failed to decode the session transfer string")?;
        anyhow::ensure!(
            snapshot.columns == GRID_COLUMNS && snapshot.rows == GRID_ROWS,
            "session was captured against a {}x{} grid, expected {GRID_COLUMNS}x{GRID_ROWS}",
            snapshot.columns,
            snapshot.rows,
        );
        return Ok(SessionSeeds {
            world: snapshot.world_seed,
            ai: snapshot.ai_seed,
        });
    }
    if let Some(seed) = args.seed {
        return Ok(SessionSeeds::derived_from(seed));
    }
    Ok(SessionSeeds::derived_from(
        ChaCha20Rng::from_entropy().next_u64(),
    ))
}
