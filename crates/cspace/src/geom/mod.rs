//! 2D geometry kernel for polygonal maps.
//!
//! Purpose
//! - Points, segments, closed polygons and axis-aligned rectangles with the
//!   predicates every configuration-space builder relies on: orientation,
//!   containment, proper and closed intersection.
//!
//! Precision policy
//! - Coordinates are `f64`. Orientation decisions compare the cross product
//!   against a tolerance relative to the lengths of the two difference vectors
//!   (`cfg::REL_EPS`), so a decision never changes under translation or uniform
//!   scaling of the inputs.
//!
//! Code cross-refs: `Point`, `Segment`, `Polygon`, `Rect`, `convex_hull`

pub mod cfg;
mod hull;
mod point;
mod polygon;
mod rect;

pub use hull::convex_hull;
pub use point::{orientation, Point, Segment, Side};
pub use polygon::{Orientation, Polygon};
pub use rect::Rect;
