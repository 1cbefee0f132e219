//! The player's paddle

use serde::{Deserialize, Serialize};

use crate::consts::{PADDLE_HALF_SIZE, REPLICA_VELOCITY_OFFSETS};
use crate::geometry::{Point, Rect, Vector};

/// Paddle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleKind {
    #[default]
    Normal,
    /// Clones every ball that hits it, `remaining` more times
    Replicating { remaining: u8 },
}

/// The player's paddle (a value; every change yields a new paddle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    center: Point,
    kind: PaddleKind,
}

impl Paddle {
    pub fn normal(center: Point) -> Self {
        Self {
            center,
            kind: PaddleKind::Normal,
        }
    }

    /// A replicating paddle; zero replications is a normal paddle
    pub fn replicating(center: Point, remaining: u8) -> Self {
        let kind = if remaining == 0 {
            PaddleKind::Normal
        } else {
            PaddleKind::Replicating { remaining }
        };
        Self { center, kind }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn kind(&self) -> PaddleKind {
        self.kind
    }

    pub fn top_left(&self) -> Point {
        self.center - PADDLE_HALF_SIZE
    }

    pub fn bottom_right(&self) -> Point {
        self.center + PADDLE_HALF_SIZE
    }

    pub fn rect(&self) -> Rect {
        Rect::spanning(self.top_left(), self.bottom_right())
    }

    /// Number of clones the next ball hit spawns
    pub fn replications(&self) -> u8 {
        match self.kind {
            PaddleKind::Normal => 0,
            PaddleKind::Replicating { remaining } => remaining,
        }
    }

    /// Velocity offsets of the clones the next ball hit spawns
    pub fn replica_offsets(&self) -> &'static [Vector] {
        let n = usize::from(self.replications()).min(REPLICA_VELOCITY_OFFSETS.len());
        &REPLICA_VELOCITY_OFFSETS[..n]
    }

    /// The paddle after a ball bounced off it
    pub fn after_ball_hit(&self) -> Paddle {
        match self.kind {
            PaddleKind::Normal => *self,
            PaddleKind::Replicating { remaining } => {
                Paddle::replicating(self.center, remaining.saturating_sub(1))
            }
        }
    }

    /// The paddle after a replicator block was destroyed
    pub fn upgraded(&self, charges: u8) -> Paddle {
        Paddle::replicating(self.center, charges.max(self.replications()))
    }

    /// Move left by `distance`, keeping the paddle inside the field
    pub fn moved_left(&self, distance: i32) -> Paddle {
        let x = (self.center.x() - distance).max(PADDLE_HALF_SIZE.dx());
        Paddle {
            center: self.center.with_x(x),
            kind: self.kind,
        }
    }

    /// Move right by `distance`, keeping the paddle inside the field
    pub fn moved_right(&self, bottom_right: Point, distance: i32) -> Paddle {
        let x = (self.center.x() + distance).min(bottom_right.x() - PADDLE_HALF_SIZE.dx());
        Paddle {
            center: self.center.with_x(x),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        let paddle = Paddle::normal(Point::new(30000, 30000));
        assert_eq!(paddle.top_left(), Point::new(28500, 29750));
        assert_eq!(paddle.bottom_right(), Point::new(31500, 30250));
        assert_eq!(paddle.rect().width(), 3000);
    }

    #[test]
    fn test_replication_countdown() {
        let paddle = Paddle::replicating(Point::new(5000, 5000), 3);
        assert_eq!(paddle.replica_offsets().len(), 3);
        let paddle = paddle.after_ball_hit();
        assert_eq!(paddle.kind(), PaddleKind::Replicating { remaining: 2 });
        assert_eq!(paddle.replica_offsets(), &REPLICA_VELOCITY_OFFSETS[..2]);
        let paddle = paddle.after_ball_hit().after_ball_hit();
        assert_eq!(paddle.kind(), PaddleKind::Normal);
        assert_eq!(paddle.after_ball_hit(), paddle);
        assert!(paddle.replica_offsets().is_empty());
    }

    #[test]
    fn test_upgrade_refills() {
        let paddle = Paddle::normal(Point::new(5000, 5000)).upgraded(3);
        assert_eq!(paddle.replications(), 3);
        let paddle = paddle.after_ball_hit().upgraded(3);
        assert_eq!(paddle.replications(), 3);
        assert_eq!(Paddle::replicating(Point::new(0, 0), 0).kind(), PaddleKind::Normal);
    }

    #[test]
    fn test_moves_are_clamped() {
        let br = Point::new(10000, 10000);
        let paddle = Paddle::replicating(Point::new(5000, 9000), 2);
        let right = paddle.moved_right(br, 20 * 10);
        assert_eq!(right.center(), Point::new(5200, 9000));
        assert_eq!(right.kind(), paddle.kind());
        assert_eq!(paddle.moved_right(br, 100_000).center(), Point::new(8500, 9000));
        assert_eq!(paddle.moved_left(100_000).center(), Point::new(1500, 9000));
        assert_eq!(paddle.moved_left(20).center(), Point::new(4980, 9000));
    }
}
