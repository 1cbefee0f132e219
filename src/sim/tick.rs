//! Fixed-order simulation tick
//!
//! A tick longer than the tuning's cutoff is split into cutoff-sized
//! sub-ticks plus a remainder. Each sub-tick runs these phases in order:
//!
//! 1. supercharge decay
//! 2. move balls
//! 3. move alphas
//! 4. side walls (alpha bounces steer linked balls through the magnet law)
//! 5. bottom removal
//! 6. blocks
//! 7. paddle vs balls
//! 8. paddle vs alphas
//!
//! Every phase iterates entities in creation order. Entities spawned by a
//! phase are only seen by later phases.

use super::collision::{self, Side, Walls};
use super::state::BreakoutState;
use crate::consts::{DRIVER_SLICE, SPAWN_VELOCITY_OFFSET};
use crate::sim::{BallKind, BlockEffect};

/// Advance the arena by `elapsed` time units with the paddle pushing in
/// `direction` (-1, 0 or 1).
pub fn tick(state: &mut BreakoutState, direction: i32, elapsed: i32) {
    debug_assert!(elapsed > 0, "elapsed time must be positive");
    debug_assert!((-1..=1).contains(&direction), "direction must be -1, 0 or 1");

    let cutoff = state.tuning.tick_cutoff;
    let mut remaining = elapsed;
    while remaining > cutoff {
        step(state, direction, cutoff);
        remaining -= cutoff;
    }
    if remaining > 0 {
        step(state, direction, remaining);
    }
}

/// Drive the arena for `total` time units in fixed driver slices plus a
/// remainder, with the paddle idle.
pub fn advance_by(state: &mut BreakoutState, total: i32) {
    for _ in 0..total / DRIVER_SLICE {
        tick(state, 0, DRIVER_SLICE);
    }
    let rest = total % DRIVER_SLICE;
    if rest > 0 {
        tick(state, 0, rest);
    }
}

impl BreakoutState {
    /// See [`tick`]
    pub fn tick(&mut self, direction: i32, elapsed: i32) {
        tick(self, direction, elapsed);
    }

    /// See [`advance_by`]
    pub fn advance_by(&mut self, total: i32) {
        advance_by(self, total);
    }
}

/// One bounded sub-tick
fn step(state: &mut BreakoutState, direction: i32, dt: i32) {
    decay_supercharge(state, dt);
    move_bodies(state, dt);
    bounce_side_walls(state);
    remove_fallen(state);
    hit_blocks(state);
    paddle_hits_balls(state, direction);
    paddle_hits_alphas(state, direction);
}

fn decay_supercharge(state: &mut BreakoutState, dt: i32) {
    let max_time = state.tuning.max_supercharge_time;
    for ball in state.graph.balls_mut() {
        if ball.decay_supercharge(dt, max_time) {
            log::debug!("Ball {:?} supercharge expired", ball.id());
        }
    }
}

fn move_bodies(state: &mut BreakoutState, dt: i32) {
    let bottom_right = state.bottom_right;
    for ball in state.graph.balls_mut() {
        ball.motion_mut().advance(bottom_right, dt);
    }
    for alpha in state.graph.alphas_mut() {
        alpha.motion_mut().advance(bottom_right, dt);
    }
    log::trace!(
        "Moved {} balls and {} alphas by {dt}",
        state.graph.ball_count(),
        state.graph.alpha_count()
    );
}

fn bounce_side_walls(state: &mut BreakoutState) {
    let walls = Walls::around(state.bottom_right);

    for ball in state.graph.balls_mut() {
        if let Some(side) = walls.side_wall_hit(ball.body(), ball.velocity()) {
            ball.motion_mut().bounce(side);
        }
    }

    let damping = state.tuning.magnet_damping;
    for alpha_id in state.graph.alpha_ids() {
        let Some(alpha) = state.graph.alpha_mut(alpha_id) else {
            continue;
        };
        let Some(side) = walls.side_wall_hit(alpha.body(), alpha.velocity()) else {
            continue;
        };
        alpha.motion_mut().bounce(side);
        let anchor = alpha.center();
        let peers: Vec<_> = alpha.balls().iter().copied().collect();
        log::trace!("Alpha {alpha_id:?} bounced off {side:?}, steering {} balls", peers.len());

        for ball_id in peers {
            if let Some(ball) = state.graph.ball_mut(ball_id) {
                let law = state.magnet;
                let velocity = law(anchor, ball.center(), ball.charge(), ball.velocity(), damping);
                ball.motion_mut().velocity = velocity;
            }
        }
    }
}

fn remove_fallen(state: &mut BreakoutState) {
    let walls = Walls::around(state.bottom_right);

    let fallen_balls: Vec<_> = state
        .graph
        .balls()
        .filter(|b| walls.crossed_bottom(b.body(), b.velocity()))
        .map(|b| b.id())
        .collect();
    for id in fallen_balls {
        state.graph.remove_ball(id);
        log::debug!("Ball {id:?} fell out of the field");
    }

    let fallen_alphas: Vec<_> = state
        .graph
        .alphas()
        .filter(|a| walls.crossed_bottom(a.body(), a.velocity()))
        .map(|a| a.id())
        .collect();
    for id in fallen_alphas {
        state.graph.remove_alpha(id);
        log::debug!("Alpha {id:?} fell out of the field");
    }
}

fn hit_blocks(state: &mut BreakoutState) {
    for ball_id in state.graph.ball_ids() {
        let mut remaining = Vec::with_capacity(state.blocks.len());

        for block in std::mem::take(&mut state.blocks) {
            let Some(ball) = state.graph.ball_mut(ball_id) else {
                remaining.push(block);
                continue;
            };
            let Some(side) = collision::hit_side(ball.body(), ball.velocity(), &block.rect) else {
                remaining.push(block);
                continue;
            };

            if !ball.passes_through(block.destroyed_on_collision()) {
                ball.motion_mut().bounce(side);
            }
            match block.effect() {
                BlockEffect::None => {}
                BlockEffect::SuperchargeBall => {
                    ball.supercharge();
                    log::debug!("Ball {ball_id:?} supercharged");
                }
                BlockEffect::UpgradePaddle => {
                    state.paddle = state.paddle.upgraded(state.tuning.replicator_grant());
                    log::debug!("Paddle upgraded to {:?}", state.paddle.kind());
                }
            }

            match block.after_hit() {
                Some(damaged) => remaining.push(damaged),
                None => {
                    log::debug!("Block {:?} at {:?} destroyed", block.kind, block.rect.top_left())
                }
            }
        }

        state.blocks = remaining;
    }
}

fn paddle_hits_balls(state: &mut BreakoutState, direction: i32) {
    let paddle_rect = state.paddle.rect();
    let boost = state.tuning.paddle_boost(direction);

    for ball_id in state.graph.ball_ids() {
        let Some(ball) = state.graph.ball_mut(ball_id) else {
            continue;
        };
        let Some(side) = collision::hit_side(ball.body(), ball.velocity(), &paddle_rect) else {
            continue;
        };

        ball.motion_mut().bounce(side);
        if side == Side::Top {
            ball.motion_mut().accelerate(boost);
        }
        let (kind, motion) = (ball.kind(), *ball.motion());

        for offset in state.paddle.replica_offsets() {
            let replica = state.graph.add_ball(kind, motion.offset_velocity(*offset));
            log::debug!("Paddle replicated ball {ball_id:?} as {replica:?}");
        }
        state.paddle = state.paddle.after_ball_hit();

        let alpha = state.graph.add_alpha(motion.offset_velocity(SPAWN_VELOCITY_OFFSET));
        state.graph.link(ball_id, alpha);
        log::debug!("Ball {ball_id:?} hit the paddle ({side:?}), spawned alpha {alpha:?}");
    }
}

fn paddle_hits_alphas(state: &mut BreakoutState, direction: i32) {
    let paddle_rect = state.paddle.rect();
    let boost = state.tuning.paddle_boost(direction);

    for alpha_id in state.graph.alpha_ids() {
        let Some(alpha) = state.graph.alpha_mut(alpha_id) else {
            continue;
        };
        let Some(side) = collision::hit_side(alpha.body(), alpha.velocity(), &paddle_rect) else {
            continue;
        };

        alpha.motion_mut().bounce(side);
        if side == Side::Top {
            alpha.motion_mut().accelerate(boost);
        }
        let motion = alpha.motion().offset_velocity(SPAWN_VELOCITY_OFFSET);

        let ball = state.graph.add_ball(BallKind::Normal, motion);
        state.graph.link(ball, alpha_id);
        log::debug!("Alpha {alpha_id:?} hit the paddle ({side:?}), spawned ball {ball:?}");
    }
}
