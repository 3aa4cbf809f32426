//! Obstacle buffering: outward offset of walls and obstacles by the robot radius.
//!
//! Purpose
//! - Produce, once per (entity, radius), a polygon covering every point within
//!   `radius` of the entity, and hand out the same shared instance afterwards.
//!
//! Approximation
//! - The disk is replaced by a regular `k`-gon circumscribed around it
//!   (`R = radius / cos(π/k)`, vertex angles `(2j+1)·π/k`) and swept over every
//!   entity vertex; the extended polygon is the convex hull of the swept points.
//! - Never smaller than the true disk buffer. Over-approximation is at most
//!   `radius·(1/cos(π/k) − 1)` at the tessellation corners, plus the concavities
//!   of non-convex obstacles which the hull fills.
//!
//! Code cross-refs: `geom::convex_hull`, `Workspace::extended`

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

use crate::geom::{convex_hull, Point, Polygon, Segment};
use crate::map::{EntityId, GeometricMap};

/// Buffer tessellation configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferCfg {
    /// Sides of the polygon standing in for the robot disk (values below 4 use 4).
    pub arc_segments: usize,
}

impl Default for BufferCfg {
    fn default() -> Self {
        Self { arc_segments: 16 }
    }
}

impl BufferCfg {
    #[inline]
    fn sides(&self) -> usize {
        self.arc_segments.max(4)
    }
}

/// Extended polygon of an obstacle.
pub fn build_extended_obstacle(obstacle: &Polygon, radius: f64, cfg: BufferCfg) -> Polygon {
    sweep(obstacle.vertices(), radius, cfg)
}

/// Extended polygon of a wall (a capsule approximated from outside).
pub fn build_extended_wall(wall: &Segment, radius: f64, cfg: BufferCfg) -> Polygon {
    sweep(&[wall.src, wall.tgt], radius, cfg)
}

fn sweep(vertices: &[Point], radius: f64, cfg: BufferCfg) -> Polygon {
    let k = cfg.sides();
    let step = PI / k as f64;
    let r = radius / step.cos();
    let offsets: Vec<(f64, f64)> = (0..k)
        .map(|j| {
            let th = (2 * j + 1) as f64 * step;
            (r * th.cos(), r * th.sin())
        })
        .collect();
    let mut swept = Vec::with_capacity(vertices.len() * k);
    for v in vertices {
        for (dx, dy) in &offsets {
            swept.push(Point::new(v.x() + dx, v.y() + dy));
        }
    }
    Polygon::from_vertices(convex_hull(&swept))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BufferKey {
    entity: EntityId,
    radius_bits: u64,
}

/// Memoized extended polygons for one map.
///
/// Invariants:
/// - A key maps to the same `Rc` instance until `clear`.
/// - The owner clears the cache whenever the indexed map changes.
#[derive(Debug, Default)]
pub struct ObstacleBuffer {
    cfg: BufferCfg,
    cache: RefCell<HashMap<BufferKey, Rc<Polygon>>>,
}

impl ObstacleBuffer {
    pub fn new(cfg: BufferCfg) -> Self {
        Self {
            cfg,
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn cfg(&self) -> BufferCfg {
        self.cfg
    }

    /// Cached extended polygon; `None` when `entity` is not in `map`.
    pub(crate) fn get_extended(
        &self,
        map: &GeometricMap,
        entity: EntityId,
        radius: f64,
    ) -> Option<Rc<Polygon>> {
        let key = BufferKey {
            entity,
            radius_bits: radius.to_bits(),
        };
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Some(Rc::clone(hit));
        }
        let poly = match entity {
            EntityId::Wall(i) => build_extended_wall(map.walls().get(i)?, radius, self.cfg),
            EntityId::Obstacle(i) => {
                build_extended_obstacle(map.obstacles().get(i)?, radius, self.cfg)
            }
        };
        tracing::trace!(?entity, radius, vertices = poly.len(), "buffer miss");
        let poly = Rc::new(poly);
        self.cache.borrow_mut().insert(key, Rc::clone(&poly));
        Some(poly)
    }

    pub fn clear(&mut self) {
        self.cache.get_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
