//! Ball ↔ alpha link graph
//!
//! Balls and alphas live in id-keyed maps and refer to each other only by
//! id. Every mutation of an edge goes through [`LinkGraph::link`] or
//! [`LinkGraph::unlink`], which update both peer sets together and then
//! recompute the charge of every ball whose charge may have changed.
//!
//! Ids are allocated in increasing order, so map order is creation order.
//! The tick pipeline relies on this for deterministic iteration.

use std::collections::{BTreeMap, BTreeSet};

use super::ball::{Alpha, AlphaId, Ball, BallId, BallKind};
use super::kinematics::Kinematics;
use crate::error::ArenaError;

/// Owner of every ball and alpha in an arena, and of the links between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGraph {
    balls: BTreeMap<BallId, Ball>,
    alphas: BTreeMap<AlphaId, Alpha>,
    next_ball: u32,
    next_alpha: u32,
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkGraph {
    pub fn new() -> Self {
        Self {
            balls: BTreeMap::new(),
            alphas: BTreeMap::new(),
            next_ball: 1,
            next_alpha: 1,
        }
    }

    /// Build a graph from externally described balls and alphas.
    ///
    /// The description must already be symmetric, free of duplicate ids and
    /// free of links to entities that are not part of it. Every entity gets
    /// a fresh id; edges are rebuilt through [`link`](Self::link).
    pub fn from_declared(balls: Vec<Ball>, alphas: Vec<Alpha>) -> Result<Self, ArenaError> {
        let mut ball_ids = BTreeSet::new();
        for ball in &balls {
            if !ball_ids.insert(ball.id()) {
                return Err(ArenaError::DuplicateBall(ball.id()));
            }
        }
        let mut alpha_index = BTreeMap::new();
        for alpha in &alphas {
            if alpha_index.insert(alpha.id(), alpha).is_some() {
                return Err(ArenaError::DuplicateAlpha(alpha.id()));
            }
        }
        let ball_index: BTreeMap<BallId, &Ball> = balls.iter().map(|b| (b.id(), b)).collect();

        for ball in &balls {
            for alpha_id in ball.alphas() {
                let alpha = alpha_index.get(alpha_id).ok_or(ArenaError::UnknownAlpha {
                    ball: ball.id(),
                    alpha: *alpha_id,
                })?;
                if !alpha.balls().contains(&ball.id()) {
                    return Err(ArenaError::AlphaNotLinkedBack {
                        ball: ball.id(),
                        alpha: *alpha_id,
                    });
                }
            }
        }
        for alpha in &alphas {
            for ball_id in alpha.balls() {
                let ball = ball_index.get(ball_id).ok_or(ArenaError::UnknownBall {
                    alpha: alpha.id(),
                    ball: *ball_id,
                })?;
                if !ball.alphas().contains(&alpha.id()) {
                    return Err(ArenaError::BallNotLinkedBack {
                        alpha: alpha.id(),
                        ball: *ball_id,
                    });
                }
            }
        }

        Ok(Self::rebuild(balls.iter(), alphas.iter()))
    }

    /// Fresh graph with the same topology as the given entities, renumbered
    /// from 1 in iteration order. Links to entities outside the given sets
    /// are dropped.
    fn rebuild<'a>(
        balls: impl Iterator<Item = &'a Ball>,
        alphas: impl Iterator<Item = &'a Alpha>,
    ) -> Self {
        let mut graph = Self::new();
        let mut ball_map = BTreeMap::new();
        let mut alpha_map = BTreeMap::new();
        let mut edges = Vec::new();

        for ball in balls {
            let id = graph.allocate_ball();
            ball_map.insert(ball.id(), id);
            edges.extend(ball.alphas().iter().map(|a| (ball.id(), *a)));
            graph.balls.insert(id, ball.clone().with_id(id));
        }
        for alpha in alphas {
            let id = graph.allocate_alpha();
            alpha_map.insert(alpha.id(), id);
            graph.alphas.insert(id, alpha.clone().with_id(id));
        }
        for (old_ball, old_alpha) in edges {
            if let (Some(&b), Some(&a)) = (ball_map.get(&old_ball), alpha_map.get(&old_alpha)) {
                graph.link(b, a);
            }
        }
        graph
    }

    /// Deep copy: fresh ids for every entity, identical topology
    pub fn isomorphic_copy(&self) -> LinkGraph {
        Self::rebuild(self.balls.values(), self.alphas.values())
    }

    fn allocate_ball(&mut self) -> BallId {
        let id = BallId(self.next_ball);
        self.next_ball += 1;
        id
    }

    fn allocate_alpha(&mut self) -> AlphaId {
        let id = AlphaId(self.next_alpha);
        self.next_alpha += 1;
        id
    }

    /// Add an unlinked ball
    pub fn add_ball(&mut self, kind: BallKind, motion: Kinematics) -> BallId {
        let id = self.allocate_ball();
        self.balls.insert(id, Ball::with_kind(id, kind, motion));
        id
    }

    /// Add an unlinked alpha
    pub fn add_alpha(&mut self, motion: Kinematics) -> AlphaId {
        let id = self.allocate_alpha();
        self.alphas.insert(id, Alpha::from_motion(id, motion));
        id
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(&id)
    }

    pub fn alpha(&self, id: AlphaId) -> Option<&Alpha> {
        self.alphas.get(&id)
    }

    /// Balls in creation order
    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.values()
    }

    /// Alphas in creation order
    pub fn alphas(&self) -> impl Iterator<Item = &Alpha> {
        self.alphas.values()
    }

    pub fn ball_ids(&self) -> Vec<BallId> {
        self.balls.keys().copied().collect()
    }

    pub fn alpha_ids(&self) -> Vec<AlphaId> {
        self.alphas.keys().copied().collect()
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn alpha_count(&self) -> usize {
        self.alphas.len()
    }

    pub(crate) fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.get_mut(&id)
    }

    pub(crate) fn alpha_mut(&mut self, id: AlphaId) -> Option<&mut Alpha> {
        self.alphas.get_mut(&id)
    }

    pub(crate) fn balls_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.values_mut()
    }

    pub(crate) fn alphas_mut(&mut self) -> impl Iterator<Item = &mut Alpha> {
        self.alphas.values_mut()
    }

    /// Link a ball and an alpha. Idempotent.
    ///
    /// Returns false (and changes nothing) if either id is unknown.
    pub fn link(&mut self, ball: BallId, alpha: AlphaId) -> bool {
        if !self.balls.contains_key(&ball) || !self.alphas.contains_key(&alpha) {
            return false;
        }
        if let Some(b) = self.balls.get_mut(&ball) {
            b.alphas_mut().insert(alpha);
        }
        if let Some(a) = self.alphas.get_mut(&alpha) {
            a.balls_mut().insert(ball);
        }
        self.recharge_peers_of(alpha);
        true
    }

    /// Remove the link between a ball and an alpha. Idempotent.
    ///
    /// Returns false (and changes nothing) if either id is unknown.
    pub fn unlink(&mut self, ball: BallId, alpha: AlphaId) -> bool {
        if !self.balls.contains_key(&ball) || !self.alphas.contains_key(&alpha) {
            return false;
        }
        if let Some(b) = self.balls.get_mut(&ball) {
            b.alphas_mut().remove(&alpha);
        }
        if let Some(a) = self.alphas.get_mut(&alpha) {
            a.balls_mut().remove(&ball);
        }
        self.recharge_peers_of(alpha);
        self.recharge(ball);
        true
    }

    /// Charge of a ball as implied by the current peer sets.
    ///
    /// Magnitude: the largest ball count among the ball's alphas (at least
    /// 1). Sign: negative iff the ball is linked to an odd number of alphas.
    pub fn charge(&self, ball: BallId) -> Option<i32> {
        let ball = self.balls.get(&ball)?;
        let magnitude = ball
            .alphas()
            .iter()
            .filter_map(|a| self.alphas.get(a))
            .map(|a| i32::try_from(a.balls().len()).unwrap_or(i32::MAX))
            .fold(1, i32::max);
        Some(if ball.alphas().len() % 2 == 1 {
            -magnitude
        } else {
            magnitude
        })
    }

    fn recharge(&mut self, ball: BallId) {
        if let Some(charge) = self.charge(ball) {
            if let Some(b) = self.balls.get_mut(&ball) {
                b.set_charge(charge);
            }
        }
    }

    fn recharge_peers_of(&mut self, alpha: AlphaId) {
        let peers: Vec<BallId> = self
            .alphas
            .get(&alpha)
            .map(|a| a.balls().iter().copied().collect())
            .unwrap_or_default();
        for ball in peers {
            self.recharge(ball);
        }
    }

    /// Unlink a ball from all its alphas, then remove it
    pub fn remove_ball(&mut self, id: BallId) -> Option<Ball> {
        let peers: Vec<AlphaId> = self.balls.get(&id)?.alphas().iter().copied().collect();
        for alpha in peers {
            self.unlink(id, alpha);
        }
        self.balls.remove(&id)
    }

    /// Unlink an alpha from all its balls, then remove it
    pub fn remove_alpha(&mut self, id: AlphaId) -> Option<Alpha> {
        let peers: Vec<BallId> = self.alphas.get(&id)?.balls().iter().copied().collect();
        for ball in peers {
            self.unlink(ball, id);
        }
        self.alphas.remove(&id)
    }

    /// New ball with the same variant and motion, linked to the same alphas
    pub fn clone_ball_sharing_peers(&mut self, id: BallId) -> Option<BallId> {
        let source = self.balls.get(&id)?;
        let (kind, motion) = (source.kind(), *source.motion());
        let peers: Vec<AlphaId> = source.alphas().iter().copied().collect();
        let copy = self.add_ball(kind, motion);
        for alpha in peers {
            self.link(copy, alpha);
        }
        Some(copy)
    }

    /// New alpha with the same motion, linked to the same balls
    pub fn clone_alpha_sharing_peers(&mut self, id: AlphaId) -> Option<AlphaId> {
        let source = self.alphas.get(&id)?;
        let motion = *source.motion();
        let peers: Vec<BallId> = source.balls().iter().copied().collect();
        let copy = self.add_alpha(motion);
        for ball in peers {
            self.link(ball, copy);
        }
        Some(copy)
    }

    /// Check link symmetry and stored charges against the peer sets
    pub fn is_consistent(&self) -> bool {
        let balls_ok = self.balls.values().all(|b| {
            b.alphas().iter().all(|a| {
                self.alphas
                    .get(a)
                    .is_some_and(|alpha| alpha.balls().contains(&b.id()))
            }) && self.charge(b.id()) == Some(b.charge())
                && b.charge() != 0
        });
        let alphas_ok = self.alphas.values().all(|a| {
            a.balls().iter().all(|b| {
                self.balls
                    .get(b)
                    .is_some_and(|ball| ball.alphas().contains(&a.id()))
            })
        });
        balls_ok && alphas_ok
    }
}
