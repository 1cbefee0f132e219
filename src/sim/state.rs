//! Arena state: construction, validation and queries
//!
//! `BreakoutState` owns every entity. Construction validates the supplied
//! entities and fails fast; queries hand out copies so callers can never
//! reach live entities.

use serde::{Deserialize, Serialize};

use super::ball::{Alpha, Ball};
use super::block::Block;
use super::links::LinkGraph;
use super::magnet::{self, MagnetLaw};
use super::paddle::Paddle;
use crate::consts::MAX_REPLICATIONS;
use crate::error::{ArenaError, TuningError};
use crate::geometry::{Point, Rect};
use crate::tuning::Tuning;

/// Complete, serializable picture of an arena at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub balls: Vec<Ball>,
    pub alphas: Vec<Alpha>,
    pub blocks: Vec<Block>,
    pub paddle: Paddle,
    pub bottom_right: Point,
    pub won: bool,
    pub dead: bool,
}

/// The Breakout arena
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub(super) graph: LinkGraph,
    pub(super) blocks: Vec<Block>,
    pub(super) bottom_right: Point,
    pub(super) paddle: Paddle,
    pub(super) tuning: Tuning,
    pub(super) magnet: MagnetLaw,
}

impl BreakoutState {
    /// Build an arena without alphas. Balls must not declare alpha links.
    pub fn new(
        balls: Vec<Ball>,
        blocks: Vec<Block>,
        bottom_right: Point,
        paddle: Paddle,
    ) -> Result<Self, ArenaError> {
        if let Some(ball) = balls.iter().find(|b| !b.alphas().is_empty()) {
            return Err(ArenaError::UnexpectedLinks(ball.id()));
        }
        Self::with_alphas(balls, Vec::new(), blocks, bottom_right, paddle)
    }

    /// Build an arena from balls and alphas whose declared links must
    /// already form a symmetric graph.
    pub fn with_alphas(
        balls: Vec<Ball>,
        alphas: Vec<Alpha>,
        blocks: Vec<Block>,
        bottom_right: Point,
        paddle: Paddle,
    ) -> Result<Self, ArenaError> {
        let field = Rect::field(bottom_right).ok_or(ArenaError::InvalidField {
            x: bottom_right.x(),
            y: bottom_right.y(),
        })?;

        if !field.contains_rect(&paddle.rect()) {
            return Err(ArenaError::PaddleOutOfField);
        }
        if paddle.replications() > MAX_REPLICATIONS {
            return Err(ArenaError::InvalidReplications {
                count: paddle.replications(),
                max: MAX_REPLICATIONS,
            });
        }

        for (index, block) in blocks.iter().enumerate() {
            if let Some(reason) = block.defect() {
                return Err(ArenaError::InvalidBlock { index, reason });
            }
            if !field.contains_rect(&block.rect) {
                return Err(ArenaError::BlockOutOfField { index });
            }
        }
        if let Some(ball) = balls.iter().find(|b| !field.contains_circle(b.body())) {
            return Err(ArenaError::BallOutOfField(ball.id()));
        }
        if let Some(alpha) = alphas.iter().find(|a| !field.contains_circle(a.body())) {
            return Err(ArenaError::AlphaOutOfField(alpha.id()));
        }

        let graph = LinkGraph::from_declared(balls, alphas)?;

        log::info!(
            "Arena {}x{}: {} balls, {} alphas, {} blocks",
            bottom_right.x(),
            bottom_right.y(),
            graph.ball_count(),
            graph.alpha_count(),
            blocks.len()
        );

        Ok(Self {
            graph,
            blocks,
            bottom_right,
            paddle,
            tuning: Tuning::default(),
            magnet: magnet::magnet_speed,
        })
    }

    /// Replace the balance values. Rejects tuning that fails
    /// [`Tuning::validate`].
    pub fn with_tuning(mut self, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        self.tuning = tuning;
        Ok(self)
    }

    /// Replace the law applied to linked balls when an alpha hits a wall
    pub fn with_magnet_law(mut self, law: MagnetLaw) -> Self {
        self.magnet = law;
        self
    }

    /// Copies of all balls, renumbered from 1 in creation order.
    ///
    /// Ids match the ones used by [`alphas`](Self::alphas) for the same
    /// state, so the link topology can be read across both lists.
    pub fn balls(&self) -> Vec<Ball> {
        self.graph.isomorphic_copy().balls().cloned().collect()
    }

    /// Copies of all alphas (see [`balls`](Self::balls) for id numbering)
    pub fn alphas(&self) -> Vec<Alpha> {
        self.graph.isomorphic_copy().alphas().cloned().collect()
    }

    /// Independent copy of the whole link graph
    pub fn links(&self) -> LinkGraph {
        self.graph.isomorphic_copy()
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    pub fn paddle(&self) -> Paddle {
        self.paddle
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn max_supercharge_time(&self) -> i32 {
        self.tuning.max_supercharge_time
    }

    /// No blocks left and at least one ball still in play
    pub fn is_won(&self) -> bool {
        self.blocks.is_empty() && self.graph.ball_count() > 0
    }

    pub fn is_dead(&self) -> bool {
        self.graph.ball_count() == 0
    }

    pub fn snapshot(&self) -> Snapshot {
        let copy = self.graph.isomorphic_copy();
        Snapshot {
            balls: copy.balls().cloned().collect(),
            alphas: copy.alphas().cloned().collect(),
            blocks: self.blocks(),
            paddle: self.paddle,
            bottom_right: self.bottom_right,
            won: self.is_won(),
            dead: self.is_dead(),
        }
    }

    pub fn move_paddle_left(&mut self, elapsed: i32) {
        debug_assert!(elapsed > 0, "elapsed time must be positive");
        self.paddle = self.paddle.moved_left(self.tuning.paddle_speed * elapsed);
    }

    pub fn move_paddle_right(&mut self, elapsed: i32) {
        debug_assert!(elapsed > 0, "elapsed time must be positive");
        self.paddle = self
            .paddle
            .moved_right(self.bottom_right, self.tuning.paddle_speed * elapsed);
    }
}
