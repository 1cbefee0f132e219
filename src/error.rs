//! Validation errors raised while building an arena or loading tuning

use thiserror::Error;

use crate::sim::{AlphaId, BallId};

/// Errors raised when validating the entities an arena is built from.
#[derive(Debug, Error, PartialEq)]
pub enum ArenaError {
    #[error("field bottom-right ({x}, {y}) lies above or left of the origin")]
    InvalidField { x: i32, y: i32 },
    #[error("paddle does not fit inside the field")]
    PaddleOutOfField,
    #[error("paddle carries {count} replications, at most {max} allowed")]
    InvalidReplications { count: u8, max: u8 },
    #[error("ball {0:?} is not fully inside the field")]
    BallOutOfField(BallId),
    #[error("alpha {0:?} is not fully inside the field")]
    AlphaOutOfField(AlphaId),
    #[error("block {index} is not inside the field")]
    BlockOutOfField { index: usize },
    #[error("block {index} is malformed: {reason}")]
    InvalidBlock { index: usize, reason: &'static str },
    #[error("ball {0:?} appears more than once")]
    DuplicateBall(BallId),
    #[error("alpha {0:?} appears more than once")]
    DuplicateAlpha(AlphaId),
    #[error("ball {ball:?} links to alpha {alpha:?}, which is not part of the arena")]
    UnknownAlpha { ball: BallId, alpha: AlphaId },
    #[error("alpha {alpha:?} links to ball {ball:?}, which is not part of the arena")]
    UnknownBall { alpha: AlphaId, ball: BallId },
    #[error("ball {ball:?} links to alpha {alpha:?}, but the alpha does not link back")]
    AlphaNotLinkedBack { ball: BallId, alpha: AlphaId },
    #[error("alpha {alpha:?} links to ball {ball:?}, but the ball does not link back")]
    BallNotLinkedBack { alpha: AlphaId, ball: BallId },
    #[error("ball {0:?} declares alpha links but the arena has no alphas")]
    UnexpectedLinks(BallId),
}

/// Errors raised when loading or validating a [`Tuning`](crate::Tuning).
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` must be positive")]
    NonPositive { field: &'static str },
}

/// Errors raised while building a level: bad entities or bad tuning.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}
