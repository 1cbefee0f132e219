//! Alpha Breakout headless runner
//!
//! Usage: `alpha-breakout [seed] [duration] [tuning.json]`
//!
//! Generates the demo level for `seed`, plays it for up to `duration` time
//! units with a paddle that chases the lowest ball, and prints the final
//! snapshot as JSON. `RUST_LOG` controls log verbosity.

use std::fs;

use anyhow::{Context, Result};

use alpha_breakout::Tuning;
use alpha_breakout::consts::DRIVER_SLICE;
use alpha_breakout::demo::generate_level;
use alpha_breakout::sim::BreakoutState;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_DURATION: i32 = 120_000;

/// Direction that moves the paddle under the lowest (closest to falling) ball
fn chase_direction(state: &BreakoutState) -> i32 {
    let Some(lowest) = state.balls().into_iter().max_by_key(|b| b.center().y()) else {
        return 0;
    };
    let offset = lowest.center().x() - state.paddle().center().x();
    // Dead zone so the paddle doesn't jitter
    match offset {
        o if o < -DRIVER_SLICE * 10 => -1,
        o if o > DRIVER_SLICE * 10 => 1,
        _ => 0,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed `{s}`"))?,
        None => DEFAULT_SEED,
    };
    let duration: i32 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid duration `{s}`"))?,
        None => DEFAULT_DURATION,
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read tuning file {path}"))?;
            Tuning::from_json(&json)
                .with_context(|| format!("failed to load tuning from {path}"))?
        }
        None => Tuning::default(),
    };

    log::info!("Alpha Breakout (headless) starting: seed {seed}, duration {duration}");
    let mut state = generate_level(seed, &tuning).context("failed to build demo level")?;

    let mut elapsed = 0;
    while elapsed < duration && !state.is_won() && !state.is_dead() {
        let slice = DRIVER_SLICE.min(duration - elapsed);
        let direction = chase_direction(&state);
        match direction {
            -1 => state.move_paddle_left(slice),
            1 => state.move_paddle_right(slice),
            _ => {}
        }
        state.tick(direction, slice);
        elapsed += slice;

        if elapsed % 10_000 == 0 {
            log::info!(
                "t={elapsed}: {} balls, {} alphas, {} blocks left",
                state.balls().len(),
                state.alphas().len(),
                state.blocks().len()
            );
        }
    }

    let outcome = if state.is_won() {
        "won"
    } else if state.is_dead() {
        "dead"
    } else {
        "out of time"
    };
    log::info!("Finished after {elapsed} time units: {outcome}");

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}
