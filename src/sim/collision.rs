//! Collision detection and response for circles against rectangles
//!
//! Each side of a rectangle is tested on its own: the body's extent must
//! overlap the side, its center must be within one radius of the side's
//! segment, and it must be moving into (or along) the side. The last check
//! keeps a body that already bounced from registering the same side again.

use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Point, Rect, Vector};

/// A side of an axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Left,
    Top,
    Right,
}

impl Side {
    /// Sides in the order a collision is resolved
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Left, Side::Top, Side::Right];

    /// Unit normal pointing away from the rectangle
    pub fn outward_normal(self) -> Vector {
        match self {
            Side::Bottom => Vector::DOWN,
            Side::Left => Vector::LEFT,
            Side::Top => Vector::UP,
            Side::Right => Vector::RIGHT,
        }
    }

    /// Endpoints of this side's segment on `rect`
    fn segment(self, rect: &Rect) -> (Point, Point) {
        match self {
            Side::Bottom => (rect.bottom_left(), rect.bottom_right()),
            Side::Left => (rect.top_left(), rect.bottom_left()),
            Side::Top => (rect.top_left(), rect.top_right()),
            Side::Right => (rect.top_right(), rect.bottom_right()),
        }
    }
}

/// Check whether a moving circle collides with one side of a rectangle
pub fn touches_side(body: &Circle, velocity: Vector, rect: &Rect, side: Side) -> bool {
    let c = body.center;
    let r = body.radius();
    let tl = rect.top_left();
    let br = rect.bottom_right();

    let (left, right) = (c.x() - r, c.x() + r);
    let (top, bottom) = (c.y() - r, c.y() + r);

    let overlaps = match side {
        Side::Bottom => right >= tl.x() && left <= br.x() && c.y() >= br.y() && top <= br.y(),
        Side::Left => c.x() <= tl.x() && right >= tl.x() && top <= br.y() && bottom >= tl.y(),
        Side::Top => right >= tl.x() && left <= br.x() && c.y() <= tl.y() && bottom >= tl.y(),
        Side::Right => bottom >= tl.y() && top <= br.y() && c.x() >= br.x() && left <= br.x(),
    };
    if !overlaps {
        return false;
    }

    let (a, b) = side.segment(rect);
    let radius_sq = i64::from(r) * i64::from(r);
    if segment_distance_sq(c, a, b) > radius_sq {
        return false;
    }

    moving_into(velocity, side)
}

/// First side (in resolution order) the body collides with, if any
pub fn hit_side(body: &Circle, velocity: Vector, rect: &Rect) -> Option<Side> {
    Side::ALL
        .into_iter()
        .find(|&side| touches_side(body, velocity, rect, side))
}

/// True if the body collides with any side of `rect`
pub fn collides(body: &Circle, velocity: Vector, rect: &Rect) -> bool {
    hit_side(body, velocity, rect).is_some()
}

/// Reflect velocity off a side: mirror it over the side's normal
#[inline]
pub fn reflect(velocity: Vector, side: Side) -> Vector {
    velocity.mirror_over(side.outward_normal())
}

/// The negated velocity must not point into the surface
#[inline]
fn moving_into(velocity: Vector, side: Side) -> bool {
    (-velocity).dot(side.outward_normal()) >= 0
}

/// Squared distance from `p` to the axis-aligned segment `a`-`b`
fn segment_distance_sq(p: Point, a: Point, b: Point) -> i64 {
    let cx = p.x().clamp(a.x().min(b.x()), a.x().max(b.x()));
    let cy = p.y().clamp(a.y().min(b.y()), a.y().max(b.y()));
    (p - Point::new(cx, cy)).square_length()
}

/// The four one-unit-thick walls just outside a field
#[derive(Debug, Clone, Copy)]
pub struct Walls {
    pub left: Rect,
    pub top: Rect,
    pub right: Rect,
    pub bottom: Rect,
}

impl Walls {
    pub fn around(bottom_right: Point) -> Self {
        let (w, h) = (bottom_right.x(), bottom_right.y());
        Self {
            left: Rect::spanning(Point::new(-1, 0), Point::new(0, h)),
            top: Rect::spanning(Point::new(0, -1), Point::new(w, 0)),
            right: Rect::spanning(Point::new(w, 0), Point::new(w + 1, h)),
            bottom: Rect::spanning(Point::new(0, h), Point::new(w, h + 1)),
        }
    }

    /// Side wall (left, top, right, in that order) the body bounces off
    pub fn side_wall_hit(&self, body: &Circle, velocity: Vector) -> Option<Side> {
        if touches_side(body, velocity, &self.left, Side::Right) {
            Some(Side::Right)
        } else if touches_side(body, velocity, &self.top, Side::Bottom) {
            Some(Side::Bottom)
        } else if touches_side(body, velocity, &self.right, Side::Left) {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// True if the body has reached the bottom edge and is not moving up
    pub fn crossed_bottom(&self, body: &Circle, velocity: Vector) -> bool {
        touches_side(body, velocity, &self.bottom, Side::Top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Rect {
        Rect::new(Point::new(1000, 1000), Point::new(2000, 1500)).unwrap()
    }

    #[test]
    fn test_ball_falling_onto_top_side() {
        let ball = Circle::new(Point::new(1500, 700), 700);
        let down = Vector::new(0, 5);
        assert!(touches_side(&ball, down, &block(), Side::Top));
        assert_eq!(hit_side(&ball, down, &block()), Some(Side::Top));
    }

    #[test]
    fn test_moving_away_is_not_a_hit() {
        let ball = Circle::new(Point::new(1500, 700), 700);
        let up = Vector::new(0, -5);
        assert!(!collides(&ball, up, &block()));
    }

    #[test]
    fn test_grazing_motion_still_counts() {
        // Moving parallel to the side: (-v)·n == 0
        let ball = Circle::new(Point::new(1500, 700), 700);
        assert!(touches_side(&ball, Vector::new(5, 0), &block(), Side::Top));
    }

    #[test]
    fn test_out_of_reach_is_a_miss() {
        let ball = Circle::new(Point::new(1500, 600), 700);
        assert!(!collides(&ball, Vector::new(0, 5), &block()));
    }

    #[test]
    fn test_corner_distance_is_clipped_to_segment() {
        // Extents overlap both the top and left sides, but the center is
        // further than one radius from the top-left corner.
        let ball = Circle::new(Point::new(700, 700), 700);
        assert!(!collides(&ball, Vector::new(5, 5), &block()));
        // Close enough to the corner
        let ball = Circle::new(Point::new(800, 800), 700);
        assert_eq!(hit_side(&ball, Vector::new(5, 5), &block()), Some(Side::Left));
    }

    #[test]
    fn test_each_side_is_detected() {
        let r = block();
        let cases = [
            (Point::new(1500, 1800), Vector::new(0, -5), Side::Bottom),
            (Point::new(700, 1200), Vector::new(5, 0), Side::Left),
            (Point::new(1500, 700), Vector::new(0, 5), Side::Top),
            (Point::new(2300, 1200), Vector::new(-5, 0), Side::Right),
        ];
        for (center, velocity, side) in cases {
            let ball = Circle::new(center, 700);
            assert_eq!(hit_side(&ball, velocity, &r), Some(side), "{side:?}");
        }
    }

    #[test]
    fn test_reflect_velocity() {
        assert_eq!(reflect(Vector::new(3, 5), Side::Top), Vector::new(3, -5));
        assert_eq!(reflect(Vector::new(3, -5), Side::Bottom), Vector::new(3, 5));
        assert_eq!(reflect(Vector::new(3, 5), Side::Left), Vector::new(-3, 5));
        assert_eq!(reflect(Vector::new(-3, 5), Side::Right), Vector::new(3, 5));
    }

    #[test]
    fn test_side_walls() {
        let walls = Walls::around(Point::new(15000, 15000));
        let left = Circle::new(Point::new(250, 1000), 500);
        assert_eq!(walls.side_wall_hit(&left, Vector::new(-100, 5)), Some(Side::Right));
        let top = Circle::new(Point::new(5000, 250), 500);
        assert_eq!(walls.side_wall_hit(&top, Vector::new(5, -100)), Some(Side::Bottom));
        let right = Circle::new(Point::new(14750, 7000), 500);
        assert_eq!(walls.side_wall_hit(&right, Vector::new(100, 5)), Some(Side::Left));
        let middle = Circle::new(Point::new(7000, 7000), 500);
        assert_eq!(walls.side_wall_hit(&middle, Vector::new(100, 5)), None);
    }

    #[test]
    fn test_bottom_crossing() {
        let walls = Walls::around(Point::new(15000, 15000));
        let low = Circle::new(Point::new(7000, 14650), 700);
        assert!(walls.crossed_bottom(&low, Vector::new(0, 5)));
        assert!(!walls.crossed_bottom(&low, Vector::new(0, -5)));
        let high = Circle::new(Point::new(7000, 14000), 700);
        assert!(!walls.crossed_bottom(&high, Vector::new(0, 5)));
    }
}
