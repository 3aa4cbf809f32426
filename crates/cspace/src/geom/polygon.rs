//! Closed polygons (obstacles and buffered safety regions).

use std::fmt;

use super::point::{Point, Segment};
use super::rect::Rect;
use crate::error::CspaceError;

/// Vertex winding derived from the signed (shoelace) area in a y-up frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    /// Zero signed area (fewer than 3 vertices or all collinear).
    Collinear,
}

/// Ordered, explicitly closed vertex sequence: the last vertex connects back to the first.
///
/// Invariants:
/// - Vertices keep insertion order.
/// - A 2-vertex polygon is a degenerate wall stand-in; it has one edge and no interior.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    #[inline]
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn add_vertex(&mut self, p: Point) {
        self.vertices.push(p);
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges in vertex order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ => n,
        };
        (0..count).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace signed area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let sum: f64 = self
            .edges()
            .map(|e| e.src.x() * e.tgt.y() - e.src.y() * e.tgt.x())
            .sum();
        sum / 2.0
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn orientation(&self) -> Orientation {
        let a = self.signed_area();
        if a > 0.0 {
            Orientation::CounterClockwise
        } else if a < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.orientation() == Orientation::Clockwise
    }

    /// Crossing-parity containment.
    ///
    /// A point on the boundary returns exactly `borders`. Fewer than 3 vertices
    /// have no interior and fail with `GeometryDegenerate`.
    pub fn contains(&self, p: Point, borders: bool) -> Result<bool, CspaceError> {
        if self.vertices.len() < 3 {
            return Err(CspaceError::GeometryDegenerate {
                vertices: self.vertices.len(),
            });
        }
        if self.edges().any(|e| e.contains(p)) {
            return Ok(borders);
        }
        let mut inside = false;
        for e in self.edges() {
            let (a, b) = (e.src, e.tgt);
            if (a.y() > p.y()) != (b.y() > p.y()) {
                let x_cross = a.x() + (p.y() - a.y()) * (b.x() - a.x()) / (b.y() - a.y());
                if p.x() < x_cross {
                    inside = !inside;
                }
            }
        }
        Ok(inside)
    }

    /// Some edge crosses `segment` properly.
    pub fn intersects_properly_with_segment(&self, segment: &Segment) -> bool {
        self.edges().any(|e| segment.intersects_properly_with(&e))
    }

    /// Some pair of edges crosses properly.
    pub fn intersects_properly_with(&self, other: &Polygon) -> bool {
        self.edges().any(|e| other.intersects_properly_with_segment(&e))
    }

    /// All proper crossing points between the two boundaries.
    pub fn intersections_with(&self, other: &Polygon) -> Vec<Point> {
        let mut points = Vec::new();
        for e1 in self.edges() {
            for e2 in other.edges() {
                if let Ok(p) = e1.intersection_with(&e2) {
                    points.push(p);
                }
            }
        }
        points
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let (first, rest) = self.vertices.split_first()?;
        let mut r = Rect::new(*first, *first);
        for p in rest {
            r.expand_to_include(*p);
        }
        Some(r)
    }
}

impl From<Segment> for Polygon {
    fn from(s: Segment) -> Self {
        Self::from_vertices(vec![s.src, s.tgt])
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_vertices(iter.into_iter().collect())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.vertices {
            write!(f, "{v};")?;
        }
        Ok(())
    }
}
