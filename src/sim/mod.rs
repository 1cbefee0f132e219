//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer geometry only
//! - Bounded sub-ticks in a fixed phase order
//! - Stable iteration order (by entity ID, which is creation order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod collision;
pub mod kinematics;
pub mod links;
pub mod magnet;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Alpha, AlphaId, Ball, BallId, BallKind};
pub use block::{Block, BlockEffect, BlockKind};
pub use collision::{Side, Walls, collides, hit_side, reflect, touches_side};
pub use kinematics::Kinematics;
pub use links::LinkGraph;
pub use magnet::{MagnetLaw, magnet_speed};
pub use paddle::{Paddle, PaddleKind};
pub use state::{BreakoutState, Snapshot};
pub use tick::{advance_by, tick};
