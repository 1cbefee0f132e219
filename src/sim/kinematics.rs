//! Clamped motion shared by balls and alphas
//!
//! An alpha moves and bounces exactly like a ball, so both carry a
//! `Kinematics` value and the tick pipeline drives alphas through the same
//! routines as balls.

use serde::{Deserialize, Serialize};

use super::collision::{self, Side};
use crate::geometry::{Circle, Point, Vector};

/// Position, size and velocity of a circular body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kinematics {
    pub body: Circle,
    pub velocity: Vector,
}

impl Kinematics {
    pub fn new(center: Point, diameter: i32, velocity: Vector) -> Self {
        Self {
            body: Circle::new(center, diameter),
            velocity,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.body.center
    }

    #[inline]
    pub fn diameter(&self) -> i32 {
        self.body.diameter
    }

    /// Move by velocity * elapsed, pinning the body fully inside the field
    pub fn advance(&mut self, bottom_right: Point, elapsed: i32) {
        let r = self.body.radius();
        let mut next = self.body.center + self.velocity.scaled(elapsed);

        if next.x() - r < 0 {
            next = next.with_x(r);
        }
        if next.x() + r > bottom_right.x() {
            next = next.with_x(bottom_right.x() - r);
        }
        if next.y() + r > bottom_right.y() {
            next = next.with_y(bottom_right.y() - r);
        }
        if next.y() - r < 0 {
            next = next.with_y(r);
        }
        self.body.center = next;
    }

    /// Reflect off the given side of whatever was hit
    pub fn bounce(&mut self, side: Side) {
        self.velocity = collision::reflect(self.velocity, side);
    }

    pub fn accelerate(&mut self, added: Vector) {
        self.velocity = self.velocity + added;
    }

    /// Copy of this motion with an extra velocity
    pub fn offset_velocity(&self, added: Vector) -> Self {
        Self {
            body: self.body,
            velocity: self.velocity + added,
        }
    }
}
