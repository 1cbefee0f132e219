//! Seeded demo level generation
//!
//! Same seed, same level: all randomness comes from a `Pcg32` seeded with
//! the caller's seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_STURDY_HEALTH, PADDLE_HALF_SIZE};
use crate::error::LevelError;
use crate::geometry::{Point, Rect, Vector};
use crate::sim::{Ball, BallId, Block, BlockKind, BreakoutState, Paddle};
use crate::tuning::Tuning;

/// Field size of a demo level
pub const DEMO_FIELD: Point = Point::new(50000, 30000);

const BLOCK_SIZE: Vector = Vector::new(4000, 1000);
const BLOCK_GAP: i32 = 500;
const GRID_TOP: i32 = 2000;
const BALL_DIAMETER: i32 = 700;

/// Roll a block type, weighted toward normal blocks
fn roll_kind(rng: &mut Pcg32) -> BlockKind {
    match rng.random_range(0..100) {
        0..60 => BlockKind::Normal,
        60..85 => BlockKind::Sturdy {
            health: rng.random_range(1..=MAX_STURDY_HEALTH),
        },
        85..93 => BlockKind::Powerup,
        _ => BlockKind::Replicator,
    }
}

/// Build the demo level for `seed`. Fails if `tuning` does not validate.
pub fn generate_level(seed: u64, tuning: &Tuning) -> Result<BreakoutState, LevelError> {
    let mut rng = Pcg32::seed_from_u64(seed);

    let pitch_x = BLOCK_SIZE.dx() + BLOCK_GAP;
    let columns = (DEMO_FIELD.x() - BLOCK_GAP) / pitch_x;
    let left = (DEMO_FIELD.x() - columns * pitch_x + BLOCK_GAP) / 2;
    let rows = rng.random_range(3..=6);

    let mut blocks = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            // Leave a few holes so no two levels look alike
            if rng.random_bool(0.1) {
                continue;
            }
            let top_left = Point::new(
                left + column * pitch_x,
                GRID_TOP + row * (BLOCK_SIZE.dy() + BLOCK_GAP),
            );
            blocks.push(Block {
                kind: roll_kind(&mut rng),
                rect: Rect::spanning(top_left, top_left + BLOCK_SIZE),
            });
        }
    }

    let paddle_center = Point::new(
        DEMO_FIELD.x() / 2,
        DEMO_FIELD.y() - 2 * PADDLE_HALF_SIZE.dy(),
    );
    let paddle = Paddle::normal(paddle_center);

    let mut dx = rng.random_range(-10..=10);
    if dx == 0 {
        dx = 5;
    }
    let ball = Ball::normal(
        BallId(1),
        paddle_center - Vector::new(0, 3000),
        BALL_DIAMETER,
        Vector::new(dx, -10),
    );

    log::info!(
        "Generated demo level {seed}: {} blocks in {rows} rows, ball velocity ({dx}, -10)",
        blocks.len()
    );

    let state = BreakoutState::new(vec![ball], blocks, DEMO_FIELD, paddle)?;
    Ok(state.with_tuning(tuning.clone())?)
}
