//! Integer geometry for the arena
//!
//! All coordinates are integers. Products (dot products, squared lengths,
//! squared distances) are widened to `i64` so large fields never overflow.

use std::ops::{Add, Neg, Sub};

use glam::{I64Vec2, IVec2};
use serde::{Deserialize, Serialize};

/// A location on the field (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point(IVec2);

impl Point {
    pub const ORIGIN: Point = Point(IVec2::ZERO);

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0.y
    }

    /// True if `other` is neither above nor to the left of this point
    pub fn is_up_and_left_from(&self, other: Point) -> bool {
        self.x() <= other.x() && self.y() <= other.y()
    }

    pub fn with_x(self, x: i32) -> Self {
        Self::new(x, self.y())
    }

    pub fn with_y(self, y: i32) -> Self {
        Self::new(self.x(), y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

/// A displacement or velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector(IVec2);

impl Vector {
    pub const ZERO: Vector = Vector(IVec2::ZERO);
    pub const UP: Vector = Vector::new(0, -1);
    pub const DOWN: Vector = Vector::new(0, 1);
    pub const LEFT: Vector = Vector::new(-1, 0);
    pub const RIGHT: Vector = Vector::new(1, 0);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self(IVec2::new(dx, dy))
    }

    #[inline]
    pub fn dx(&self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn dy(&self) -> i32 {
        self.0.y
    }

    pub fn scaled(self, factor: i32) -> Self {
        Self(self.0 * factor)
    }

    #[inline]
    pub fn dot(self, other: Vector) -> i64 {
        self.wide().dot(other.wide())
    }

    #[inline]
    pub fn square_length(self) -> i64 {
        self.wide().length_squared()
    }

    /// Mirror this vector over the line with normal `n`: v - 2(v·n)/(n·n) n
    ///
    /// Exact for the axis-aligned unit normals used by collision response.
    pub fn mirror_over(self, n: Vector) -> Self {
        let nn = n.square_length();
        if nn == 0 {
            return self;
        }
        let k = 2 * self.dot(n) / nn;
        let mirrored = self.wide() - n.wide() * k;
        Self(mirrored.as_ivec2())
    }

    pub(crate) fn wide(self) -> I64Vec2 {
        self.0.as_i64vec2()
    }

    pub(crate) fn from_wide(v: I64Vec2) -> Self {
        Self(v.as_ivec2())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

/// Axis-aligned rectangle; `bottom_right` is never above or left of `top_left`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    top_left: Point,
    bottom_right: Point,
}

impl Rect {
    /// Returns `None` when `bottom_right` lies above or left of `top_left`
    pub fn new(top_left: Point, bottom_right: Point) -> Option<Self> {
        top_left.is_up_and_left_from(bottom_right).then_some(Self {
            top_left,
            bottom_right,
        })
    }

    /// Rectangle with `a` and `b` as opposite corners, in any order
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x().min(b.x()), a.y().min(b.y())),
            bottom_right: Point::new(a.x().max(b.x()), a.y().max(b.y())),
        }
    }

    /// Rectangle spanning from the origin to `bottom_right`
    pub fn field(bottom_right: Point) -> Option<Self> {
        Self::new(Point::ORIGIN, bottom_right)
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x(), self.top_left.y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x(), self.bottom_right.y())
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.x() - self.top_left.x()
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y() - self.top_left.y()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.top_left.is_up_and_left_from(p) && p.is_up_and_left_from(self.bottom_right)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.top_left) && self.contains(other.bottom_right)
    }

    /// True if the whole circle lies inside this rectangle
    pub fn contains_circle(&self, c: &Circle) -> bool {
        let r = c.radius();
        c.center.x() - r >= self.top_left.x()
            && c.center.x() + r <= self.bottom_right.x()
            && c.center.y() - r >= self.top_left.y()
            && c.center.y() + r <= self.bottom_right.y()
    }
}

/// A circular body: center plus non-negative diameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub diameter: i32,
}

impl Circle {
    pub fn new(center: Point, diameter: i32) -> Self {
        Self {
            center,
            diameter: diameter.abs(),
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.diameter / 2
    }
}
