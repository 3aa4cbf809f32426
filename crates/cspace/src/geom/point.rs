//! Points, segments and the orientation predicate.

use std::fmt;

use nalgebra::Vector2;

use super::cfg::{PARAM_EPS, REL_EPS};
use crate::error::CspaceError;

/// Position in the workspace plane (y-up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point(pub Vector2<f64>);

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }
    #[inline]
    pub fn distance_with(&self, other: &Point) -> f64 {
        (self.0 - other.0).norm()
    }
    #[inline]
    pub fn is_to_left_from(&self, s: &Segment) -> bool {
        s.side_of(*self) == Side::Left
    }
    #[inline]
    pub fn is_to_right_from(&self, s: &Segment) -> bool {
        s.side_of(*self) == Side::Right
    }
    /// On the closed segment `s`.
    #[inline]
    pub fn is_inside(&self, s: &Segment) -> bool {
        s.contains(*self)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self(v)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// Side of a point relative to a directed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Collinear,
}

impl Side {
    #[inline]
    fn opposes(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Left, Side::Right) | (Side::Right, Side::Left)
        )
    }
}

/// Orientation of `c` relative to the directed line `a → b`.
///
/// Collinear when `|cross(b-a, c-a)| <= REL_EPS * |b-a| * |c-a|`; coincident
/// points are always collinear.
pub fn orientation(a: Point, b: Point, c: Point) -> Side {
    let ab = b.0 - a.0;
    let ac = c.0 - a.0;
    let det = ab.x * ac.y - ab.y * ac.x;
    let scale = ab.norm() * ac.norm();
    if det.abs() <= REL_EPS * scale {
        Side::Collinear
    } else if det > 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Directed segment `src → tgt`. Walls and doors are segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub src: Point,
    pub tgt: Point,
}

impl Segment {
    #[inline]
    pub fn new(src: Point, tgt: Point) -> Self {
        Self { src, tgt }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.src.distance_with(&self.tgt)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        Point((self.src.0 + self.tgt.0) * 0.5)
    }

    #[inline]
    pub fn side_of(&self, p: Point) -> Side {
        orientation(self.src, self.tgt, p)
    }

    /// `p` lies on the closed segment.
    pub fn contains(&self, p: Point) -> bool {
        if self.side_of(p) != Side::Collinear {
            return false;
        }
        let d = self.tgt.0 - self.src.0;
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return p == self.src;
        }
        let t = (p.0 - self.src.0).dot(&d) / len2;
        (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t)
    }

    /// Interiors cross at a single point. Shared endpoints, touching and
    /// collinear overlaps do not count.
    pub fn intersects_properly_with(&self, other: &Segment) -> bool {
        let o1 = self.side_of(other.src);
        let o2 = self.side_of(other.tgt);
        let o3 = other.side_of(self.src);
        let o4 = other.side_of(self.tgt);
        o1.opposes(o2) && o3.opposes(o4)
    }

    /// Closed intersection test: proper crossings plus touching and overlap.
    pub fn intersects_with(&self, other: &Segment) -> bool {
        if self.intersects_properly_with(other) {
            return true;
        }
        self.contains(other.src)
            || self.contains(other.tgt)
            || other.contains(self.src)
            || other.contains(self.tgt)
    }

    /// Crossing point of two properly intersecting segments.
    pub fn intersection_with(&self, other: &Segment) -> Result<Point, CspaceError> {
        if !self.intersects_properly_with(other) {
            return Err(CspaceError::NoIntersection);
        }
        let r = self.tgt.0 - self.src.0;
        let s = other.tgt.0 - other.src.0;
        let denom = cross(r, s);
        if denom == 0.0 {
            return Err(CspaceError::NoIntersection);
        }
        let t = cross(other.src.0 - self.src.0, s) / denom;
        Ok(Point(self.src.0 + r * t))
    }

    /// Euclidean distance from `p` to the closed segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        let d = self.tgt.0 - self.src.0;
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return p.distance_with(&self.src);
        }
        let t = ((p.0 - self.src.0).dot(&d) / len2).clamp(0.0, 1.0);
        (self.src.0 + d * t - p.0).norm()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.tgt)
    }
}
