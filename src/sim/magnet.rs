//! Magnet law: how an alpha's wall bounce steers its linked balls
//!
//! The law is a plain function so an arena can swap it out
//! (see [`BreakoutState::with_magnet_law`](super::BreakoutState::with_magnet_law)).

use crate::geometry::{Point, Vector};

/// `(alpha_center, ball_center, charge, velocity, damping) -> new velocity`
pub type MagnetLaw = fn(Point, Point, i32, Vector, i32) -> Vector;

/// Default law: pull the ball toward the alpha (push it away for a negative
/// charge).
///
/// The added velocity points along the ball→alpha offset, with length
/// `|charge| * |velocity| / damping`. All intermediate math is `i64` and
/// truncates toward zero. A ball sitting on the alpha, or a zero damping,
/// leaves the velocity unchanged.
pub fn magnet_speed(
    alpha_center: Point,
    ball_center: Point,
    charge: i32,
    velocity: Vector,
    damping: i32,
) -> Vector {
    let offset = alpha_center - ball_center;
    if offset == Vector::ZERO || charge == 0 || damping == 0 {
        return velocity;
    }
    let speed = velocity.square_length().isqrt();
    let distance = offset.square_length().isqrt().max(1);
    let pull = offset.wide() * (i64::from(charge) * speed) / (distance * i64::from(damping));
    velocity + Vector::from_wide(pull)
}
