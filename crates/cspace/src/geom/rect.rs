//! Axis-aligned rectangles: map bounds, grid cells and quad-tree quadrants.

use super::point::{Point, Segment};
use super::polygon::Polygon;

/// Closed axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle of half-width `half_w` and half-height `half_h` around `center`.
    #[inline]
    pub fn from_center(center: Point, half_w: f64, half_h: f64) -> Self {
        Self {
            min: Point::new(center.x() - half_w, center.y() - half_h),
            max: Point::new(center.x() + half_w, center.y() + half_h),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x() - self.min.x()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y() - self.min.y()
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point((self.min.0 + self.max.0) * 0.5)
    }

    pub fn expand_to_include(&mut self, p: Point) {
        self.min = Point::new(self.min.x().min(p.x()), self.min.y().min(p.y()));
        self.max = Point::new(self.max.x().max(p.x()), self.max.y().max(p.y()));
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x() >= self.min.x() && p.x() <= self.max.x() && p.y() >= self.min.y() && p.y() <= self.max.y()
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x(), self.min.y()),
            self.max,
            Point::new(self.min.x(), self.max.y()),
        ]
    }

    pub fn edges(&self) -> [Segment; 4] {
        let c = self.corners();
        [
            Segment::new(c[0], c[1]),
            Segment::new(c[1], c[2]),
            Segment::new(c[2], c[3]),
            Segment::new(c[3], c[0]),
        ]
    }

    /// Closed test: an endpoint inside, or the segment touches an edge.
    pub fn intersects_segment(&self, s: &Segment) -> bool {
        self.contains_point(s.src)
            || self.contains_point(s.tgt)
            || self.edges().iter().any(|e| e.intersects_with(s))
    }

    /// Closed test: boundaries touch, or one region holds the other.
    pub fn intersects_polygon(&self, poly: &Polygon) -> bool {
        if poly.edges().any(|e| self.intersects_segment(&e)) {
            return true;
        }
        poly.len() >= 3 && poly.contains(self.center(), true).unwrap_or(false)
    }

    /// Closed overlap (sharing a corner counts).
    #[inline]
    pub fn touches(&self, other: &Rect) -> bool {
        self.min.x() <= other.max.x()
            && other.min.x() <= self.max.x()
            && self.min.y() <= other.max.y()
            && other.min.y() <= self.max.y()
    }

    /// Interiors are disjoint and the boundaries share a segment of positive length.
    ///
    /// Exact comparisons: quad-tree boundaries are copied from ancestor cells, never recomputed.
    pub fn shares_edge_with(&self, other: &Rect) -> bool {
        let overlap_x = self.max.x().min(other.max.x()) - self.min.x().max(other.min.x());
        let overlap_y = self.max.y().min(other.max.y()) - self.min.y().max(other.min.y());
        let x_adjacent = self.max.x() == other.min.x() || other.max.x() == self.min.x();
        let y_adjacent = self.max.y() == other.min.y() || other.max.y() == self.min.y();
        (x_adjacent && overlap_y > 0.0) || (y_adjacent && overlap_x > 0.0)
    }

    /// Quadrant `i`: bit 0 selects east, bit 1 selects north (0 = SW, 1 = SE, 2 = NW, 3 = NE).
    pub fn quadrant(&self, i: usize) -> Rect {
        let c = self.center();
        let (x0, x1) = if i & 1 == 0 {
            (self.min.x(), c.x())
        } else {
            (c.x(), self.max.x())
        };
        let (y0, y1) = if i & 2 == 0 {
            (self.min.y(), c.y())
        } else {
            (c.y(), self.max.y())
        };
        Rect::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Index of the quadrant holding `p` (ties go east/north).
    #[inline]
    pub fn quadrant_of(&self, p: Point) -> usize {
        let c = self.center();
        usize::from(p.x() >= c.x()) | (usize::from(p.y() >= c.y()) << 1)
    }
}
