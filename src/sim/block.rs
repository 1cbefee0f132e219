//! Destructible blocks
//!
//! Blocks are immutable values: a hit either destroys a block or yields a
//! replacement (a sturdy block with one less health).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_STURDY_HEALTH;
use crate::geometry::Rect;

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Normal,
    /// Survives `health - 1` hits
    Sturdy { health: u8 },
    /// Supercharges the ball that hits it
    Powerup,
    /// Turns the paddle into a replicating paddle
    Replicator,
}

/// Side effect of hitting a block, applied by the tick pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEffect {
    None,
    SuperchargeBall,
    UpgradePaddle,
}

/// A block entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub rect: Rect,
}

impl Block {
    pub fn normal(rect: Rect) -> Self {
        Self {
            kind: BlockKind::Normal,
            rect,
        }
    }

    pub fn sturdy(rect: Rect, health: u8) -> Self {
        Self {
            kind: BlockKind::Sturdy { health },
            rect,
        }
    }

    pub fn powerup(rect: Rect) -> Self {
        Self {
            kind: BlockKind::Powerup,
            rect,
        }
    }

    pub fn replicator(rect: Rect) -> Self {
        Self {
            kind: BlockKind::Replicator,
            rect,
        }
    }

    /// Remaining health, `None` for blocks without health
    pub fn health(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Sturdy { health } => Some(health),
            _ => None,
        }
    }

    /// True if the next hit removes this block
    pub fn destroyed_on_collision(&self) -> bool {
        match self.kind {
            BlockKind::Sturdy { health } => health <= 1,
            BlockKind::Normal | BlockKind::Powerup | BlockKind::Replicator => true,
        }
    }

    pub fn effect(&self) -> BlockEffect {
        match self.kind {
            BlockKind::Powerup => BlockEffect::SuperchargeBall,
            BlockKind::Replicator => BlockEffect::UpgradePaddle,
            BlockKind::Normal | BlockKind::Sturdy { .. } => BlockEffect::None,
        }
    }

    /// What is left of this block after a hit
    pub fn after_hit(&self) -> Option<Block> {
        match self.kind {
            BlockKind::Sturdy { health } if health > 1 => {
                Some(Block::sturdy(self.rect, health - 1))
            }
            _ => None,
        }
    }

    /// Malformation reason, if any
    pub(crate) fn defect(&self) -> Option<&'static str> {
        if !self.rect.top_left().is_up_and_left_from(self.rect.bottom_right()) {
            return Some("rectangle corners are inverted");
        }
        match self.kind {
            BlockKind::Sturdy { health } if health == 0 || health > MAX_STURDY_HEALTH => {
                Some("sturdy health must be between 1 and 3")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn rect() -> Rect {
        Rect::new(Point::new(2000, 500), Point::new(5000, 2500)).unwrap()
    }

    #[test]
    fn test_sturdy_block_loses_one_health_per_hit() {
        let block = Block::sturdy(rect(), 3);
        assert!(!block.destroyed_on_collision());
        let block = block.after_hit().unwrap();
        assert_eq!(block.health(), Some(2));
        let block = block.after_hit().unwrap();
        assert_eq!(block.health(), Some(1));
        assert!(block.destroyed_on_collision());
        assert_eq!(block.after_hit(), None);
    }

    #[test]
    fn test_single_hit_blocks() {
        for block in [Block::normal(rect()), Block::powerup(rect()), Block::replicator(rect())] {
            assert!(block.destroyed_on_collision());
            assert_eq!(block.after_hit(), None);
            assert_eq!(block.health(), None);
        }
    }

    #[test]
    fn test_effects() {
        assert_eq!(Block::normal(rect()).effect(), BlockEffect::None);
        assert_eq!(Block::sturdy(rect(), 2).effect(), BlockEffect::None);
        assert_eq!(Block::powerup(rect()).effect(), BlockEffect::SuperchargeBall);
        assert_eq!(Block::replicator(rect()).effect(), BlockEffect::UpgradePaddle);
    }

    #[test]
    fn test_health_bounds() {
        assert!(Block::sturdy(rect(), 0).defect().is_some());
        assert!(Block::sturdy(rect(), 4).defect().is_some());
        assert!(Block::sturdy(rect(), 3).defect().is_none());
        assert!(Block::normal(rect()).defect().is_none());
    }

    #[test]
    fn test_inverted_rect_from_json_is_a_defect() {
        let json = r#"{"kind":"Powerup","rect":{"top_left":[10,10],"bottom_right":[0,0]}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.defect(), Some("rectangle corners are inverted"));
    }
}
