//! Alpha Breakout - a Breakout arena with radioactive alpha particles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (link graph, physics, collisions, arena state)
//! - `geometry`: Integer points, vectors, rectangles and circles
//! - `tuning`: Data-driven game balance
//! - `demo`: Seeded demo level generation

pub mod demo;
pub mod error;
pub mod geometry;
pub mod sim;
pub mod tuning;

pub use error::{ArenaError, LevelError, TuningError};
pub use geometry::{Circle, Point, Rect, Vector};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use crate::geometry::Vector;

    /// Paddle half-extents: the paddle spans center ± this vector
    pub const PADDLE_HALF_SIZE: Vector = Vector::new(1500, 250);

    /// Velocity offsets given to balls cloned by a replicating paddle
    pub const REPLICA_VELOCITY_OFFSETS: [Vector; 3] =
        [Vector::new(2, -2), Vector::new(2, 2), Vector::new(-2, 2)];

    /// Velocity offset of an alpha (or ball) spawned by a paddle hit
    pub const SPAWN_VELOCITY_OFFSET: Vector = Vector::new(-2, -2);

    /// Slice length used by the external driver (`advance_by`)
    pub const DRIVER_SLICE: i32 = 20;

    /// Highest health a sturdy block can have
    pub const MAX_STURDY_HEALTH: u8 = 3;

    /// Highest replication count a paddle can carry
    pub const MAX_REPLICATIONS: u8 = 3;
}
