//! Balls and alpha particles
//!
//! Both are nodes of the link graph. They only ever refer to each other by
//! id; the [`LinkGraph`](super::LinkGraph) keeps the two peer sets mirrored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::kinematics::Kinematics;
use crate::geometry::{Circle, Point, Vector};

/// Handle of a ball inside one arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// Handle of an alpha particle inside one arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlphaId(pub u32);

/// Ball variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallKind {
    #[default]
    Normal,
    /// Passes through blocks that a hit destroys; `elapsed` counts up to the
    /// tuning's max supercharge time
    Supercharged { elapsed: i32 },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    id: BallId,
    kind: BallKind,
    motion: Kinematics,
    /// Derived from the link topology, never zero
    charge: i32,
    alphas: BTreeSet<AlphaId>,
}

impl Ball {
    pub fn normal(id: BallId, center: Point, diameter: i32, velocity: Vector) -> Self {
        Self::with_kind(id, BallKind::Normal, Kinematics::new(center, diameter, velocity))
    }

    pub fn supercharged(
        id: BallId,
        center: Point,
        diameter: i32,
        velocity: Vector,
        elapsed: i32,
    ) -> Self {
        Self::with_kind(
            id,
            BallKind::Supercharged { elapsed },
            Kinematics::new(center, diameter, velocity),
        )
    }

    pub(crate) fn with_kind(id: BallId, kind: BallKind, motion: Kinematics) -> Self {
        Self {
            id,
            kind,
            motion,
            charge: 1,
            alphas: BTreeSet::new(),
        }
    }

    /// Declare alpha peers on this ball only.
    ///
    /// Used to describe a graph handed to an arena constructor; the
    /// constructor rejects declarations that are not mirrored on the alphas.
    pub fn linked_to(mut self, alphas: impl IntoIterator<Item = AlphaId>) -> Self {
        self.alphas.extend(alphas);
        self
    }

    pub fn id(&self) -> BallId {
        self.id
    }

    pub fn kind(&self) -> BallKind {
        self.kind
    }

    pub fn motion(&self) -> &Kinematics {
        &self.motion
    }

    pub fn body(&self) -> &Circle {
        &self.motion.body
    }

    pub fn center(&self) -> Point {
        self.motion.center()
    }

    pub fn diameter(&self) -> i32 {
        self.motion.diameter()
    }

    pub fn velocity(&self) -> Vector {
        self.motion.velocity
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn alphas(&self) -> &BTreeSet<AlphaId> {
        &self.alphas
    }

    pub fn is_supercharged(&self) -> bool {
        matches!(self.kind, BallKind::Supercharged { .. })
    }

    /// Time spent supercharged, `None` for a normal ball
    pub fn supercharge_time(&self) -> Option<i32> {
        match self.kind {
            BallKind::Normal => None,
            BallKind::Supercharged { elapsed } => Some(elapsed),
        }
    }

    /// Whether a hit on a block with the given fate leaves the velocity alone
    pub fn passes_through(&self, block_destroyed: bool) -> bool {
        self.is_supercharged() && block_destroyed
    }

    /// Advance the supercharge counter. Returns true when the ball reverted
    /// to a normal ball.
    pub(crate) fn decay_supercharge(&mut self, dt: i32, max_time: i32) -> bool {
        match self.kind {
            BallKind::Normal => false,
            BallKind::Supercharged { elapsed } if elapsed + dt >= max_time => {
                self.kind = BallKind::Normal;
                true
            }
            BallKind::Supercharged { elapsed } => {
                self.kind = BallKind::Supercharged {
                    elapsed: elapsed + dt,
                };
                false
            }
        }
    }

    /// Turn into a freshly supercharged ball, keeping motion and links
    pub(crate) fn supercharge(&mut self) {
        self.kind = BallKind::Supercharged { elapsed: 0 };
    }

    pub(crate) fn motion_mut(&mut self) -> &mut Kinematics {
        &mut self.motion
    }

    pub(crate) fn set_charge(&mut self, charge: i32) {
        debug_assert_ne!(charge, 0);
        self.charge = charge;
    }

    pub(crate) fn alphas_mut(&mut self) -> &mut BTreeSet<AlphaId> {
        &mut self.alphas
    }

    pub(crate) fn with_id(mut self, id: BallId) -> Self {
        self.id = id;
        self.alphas.clear();
        self.charge = 1;
        self
    }
}

/// An alpha particle entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alpha {
    id: AlphaId,
    motion: Kinematics,
    balls: BTreeSet<BallId>,
}

impl Alpha {
    pub fn new(id: AlphaId, center: Point, diameter: i32, velocity: Vector) -> Self {
        Self::from_motion(id, Kinematics::new(center, diameter, velocity))
    }

    pub(crate) fn from_motion(id: AlphaId, motion: Kinematics) -> Self {
        Self {
            id,
            motion,
            balls: BTreeSet::new(),
        }
    }

    /// Declare ball peers on this alpha only (see [`Ball::linked_to`])
    pub fn linked_to(mut self, balls: impl IntoIterator<Item = BallId>) -> Self {
        self.balls.extend(balls);
        self
    }

    pub fn id(&self) -> AlphaId {
        self.id
    }

    pub fn motion(&self) -> &Kinematics {
        &self.motion
    }

    pub fn body(&self) -> &Circle {
        &self.motion.body
    }

    pub fn center(&self) -> Point {
        self.motion.center()
    }

    pub fn diameter(&self) -> i32 {
        self.motion.diameter()
    }

    pub fn velocity(&self) -> Vector {
        self.motion.velocity
    }

    pub fn balls(&self) -> &BTreeSet<BallId> {
        &self.balls
    }

    pub(crate) fn motion_mut(&mut self) -> &mut Kinematics {
        &mut self.motion
    }

    pub(crate) fn balls_mut(&mut self) -> &mut BTreeSet<BallId> {
        &mut self.balls
    }

    pub(crate) fn with_id(mut self, id: AlphaId) -> Self {
        self.id = id;
        self.balls.clear();
        self
    }
}
