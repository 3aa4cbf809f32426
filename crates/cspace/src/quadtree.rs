//! Point-region quad-tree over an axis-aligned rectangle.
//!
//! Purpose
//! - Spatial index used by the quad-tree decomposition: each leaf holds at most
//!   one point; inserting into an occupied leaf splits it into four quadrants.
//!
//! Notes
//! - Cells live in an arena addressed by `QuadId`; `ROOT` is the whole domain.
//! - Quadrant order follows `Rect::quadrant`: 0 = SW, 1 = SE, 2 = NW, 3 = NE.
//! - Removing a point never merges cells.
//! - Child rectangles copy their boundaries from the parent, so adjacent cells
//!   share bit-identical edge coordinates and neighbour tests compare exactly.

use crate::geom::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadId(pub usize);

pub const ROOT: QuadId = QuadId(0);

/// Splits stop here; a leaf at this depth refuses a second point.
pub const MAX_DEPTH: usize = 40;

#[derive(Clone, Debug)]
struct QuadCell {
    rect: Rect,
    depth: usize,
    point: Option<Point>,
    children: Option<[QuadId; 4]>,
}

#[derive(Clone, Debug)]
pub struct QuadTree {
    cells: Vec<QuadCell>,
    len: usize,
}

impl QuadTree {
    pub fn new(domain: Rect) -> Self {
        Self {
            cells: vec![QuadCell {
                rect: domain,
                depth: 0,
                point: None,
                children: None,
            }],
            len: 0,
        }
    }

    /// Stores `p` and returns its leaf.
    ///
    /// `None` when `p` lies outside the domain or would need a split past `MAX_DEPTH`.
    /// Inserting a point already present returns its leaf unchanged.
    pub fn insert(&mut self, p: Point) -> Option<QuadId> {
        if !self.cells[ROOT.0].rect.contains_point(p) {
            return None;
        }
        let mut id = self.locate(p)?;
        loop {
            let (stored, depth) = (self.cells[id.0].point, self.cells[id.0].depth);
            match stored {
                None => {
                    self.cells[id.0].point = Some(p);
                    self.len += 1;
                    return Some(id);
                }
                Some(q) if q == p => return Some(id),
                Some(q) => {
                    if depth >= MAX_DEPTH {
                        return None;
                    }
                    let children = self.split(id);
                    let rect = self.cells[id.0].rect;
                    self.cells[id.0].point = None;
                    self.cells[children[rect.quadrant_of(q)].0].point = Some(q);
                    id = children[rect.quadrant_of(p)];
                }
            }
        }
    }

    /// Removes `p` if stored; the leaf stays in place.
    pub fn remove(&mut self, p: Point) -> bool {
        let Some(id) = self.locate(p) else {
            return false;
        };
        let cell = &mut self.cells[id.0];
        if cell.point == Some(p) {
            cell.point = None;
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Leaf whose rectangle holds `p` (ties on a split line go east/north).
    pub fn locate(&self, p: Point) -> Option<QuadId> {
        if !self.cells[ROOT.0].rect.contains_point(p) {
            return None;
        }
        let mut id = ROOT;
        while let Some(children) = self.cells[id.0].children {
            id = children[self.cells[id.0].rect.quadrant_of(p)];
        }
        Some(id)
    }

    fn split(&mut self, id: QuadId) -> [QuadId; 4] {
        let rect = self.cells[id.0].rect;
        let depth = self.cells[id.0].depth + 1;
        let base = self.cells.len();
        let children = [QuadId(base), QuadId(base + 1), QuadId(base + 2), QuadId(base + 3)];
        for i in 0..4 {
            self.cells.push(QuadCell {
                rect: rect.quadrant(i),
                depth,
                point: None,
                children: None,
            });
        }
        self.cells[id.0].children = Some(children);
        children
    }

    #[inline]
    pub fn is_leaf(&self, id: QuadId) -> bool {
        self.cells[id.0].children.is_none()
    }

    #[inline]
    pub fn depth(&self, id: QuadId) -> usize {
        self.cells[id.0].depth
    }

    #[inline]
    pub fn rect(&self, id: QuadId) -> Rect {
        self.cells[id.0].rect
    }

    #[inline]
    pub fn point(&self, id: QuadId) -> Option<Point> {
        self.cells[id.0].point
    }

    #[inline]
    pub fn children(&self, id: QuadId) -> Option<[QuadId; 4]> {
        self.cells[id.0].children
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of cells ever created (ids are `0..cell_count()`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Visits leaves depth-first in quadrant order.
    pub fn for_each_leaf<F: FnMut(QuadId)>(&self, mut f: F) {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            match self.cells[id.0].children {
                Some(ch) => stack.extend(ch.iter().rev()),
                None => f(id),
            }
        }
    }

    pub fn leaves(&self) -> Vec<QuadId> {
        let mut out = Vec::new();
        self.for_each_leaf(|id| out.push(id));
        out
    }

    /// Leaves sharing an edge segment with leaf `id` whose depth is at most its own.
    ///
    /// Corner-only contacts are excluded. Empty for an inner cell.
    pub fn neighbors(&self, id: QuadId) -> Vec<QuadId> {
        if !self.is_leaf(id) {
            return Vec::new();
        }
        let target = self.cells[id.0].rect;
        let depth = self.cells[id.0].depth;
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(c) = stack.pop() {
            let cell = &self.cells[c.0];
            if c == id || !cell.rect.touches(&target) {
                continue;
            }
            match cell.children {
                Some(ch) => stack.extend(ch.iter().rev()),
                None => {
                    if cell.depth <= depth && cell.rect.shares_edge_with(&target) {
                        out.push(c);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// [0,4]² with the root split and its SW quadrant split again.
    fn two_level_tree() -> QuadTree {
        let mut t = QuadTree::new(Rect::new(p(0.0, 0.0), p(4.0, 4.0)));
        t.insert(p(0.5, 0.5)).unwrap();
        t.insert(p(3.0, 3.0)).unwrap();
        t.insert(p(1.5, 1.5)).unwrap();
        t
    }

    fn sorted(mut v: Vec<QuadId>) -> Vec<QuadId> {
        v.sort();
        v
    }

    #[test]
    fn insert_splits_occupied_leaves() {
        let t = two_level_tree();
        assert_eq!(t.len(), 3);
        assert!(!t.is_leaf(ROOT));
        assert_eq!(t.leaves().len(), 7);
        let sw_sw = t.locate(p(0.5, 0.5)).unwrap();
        assert_eq!(t.depth(sw_sw), 2);
        assert_eq!(t.point(sw_sw), Some(p(0.5, 0.5)));
        assert_eq!(t.rect(sw_sw), Rect::new(p(0.0, 0.0), p(1.0, 1.0)));
        let ne = t.locate(p(3.0, 3.0)).unwrap();
        assert_eq!(t.depth(ne), 1);
        assert_eq!(t.point(ne), Some(p(3.0, 3.0)));
        assert!(t.children(ne).is_none());
    }

    #[test]
    fn insert_rejects_outside_and_keeps_duplicates_single() {
        let mut t = two_level_tree();
        assert!(t.insert(p(5.0, 1.0)).is_none());
        let id = t.locate(p(3.0, 3.0)).unwrap();
        assert_eq!(t.insert(p(3.0, 3.0)), Some(id));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn remove_keeps_structure() {
        let mut t = two_level_tree();
        assert!(t.remove(p(1.5, 1.5)));
        assert!(!t.remove(p(1.5, 1.5)));
        assert!(!t.remove(p(9.0, 9.0)));
        assert_eq!(t.len(), 2);
        assert_eq!(t.leaves().len(), 7);
    }

    #[test]
    fn leaves_come_in_quadrant_order() {
        let t = two_level_tree();
        let centers: Vec<Point> = t.leaves().into_iter().map(|l| t.rect(l).center()).collect();
        assert_eq!(
            centers,
            vec![
                p(0.5, 0.5),
                p(1.5, 0.5),
                p(0.5, 1.5),
                p(1.5, 1.5),
                p(3.0, 1.0),
                p(1.0, 3.0),
                p(3.0, 3.0),
            ]
        );
    }

    #[test]
    fn neighbors_match_hand_drawn_tree() {
        let t = two_level_tree();
        let at = |x: f64, y: f64| t.locate(p(x, y)).unwrap();
        let (se, nw, ne) = (at(3.0, 1.0), at(1.0, 3.0), at(3.0, 3.0));
        let (sw_sw, sw_se, sw_nw, sw_ne) = (at(0.5, 0.5), at(1.5, 0.5), at(0.5, 1.5), at(1.5, 1.5));

        // Smaller cells across the west edge are skipped.
        assert_eq!(t.neighbors(se), vec![ne]);
        assert_eq!(sorted(t.neighbors(sw_se)), sorted(vec![sw_sw, sw_ne, se]));
        // NE touches SW.NE only at a corner.
        assert_eq!(sorted(t.neighbors(sw_ne)), sorted(vec![sw_nw, sw_se, se, nw]));
        assert_eq!(sorted(t.neighbors(ne)), sorted(vec![nw, se]));
        assert!(t.neighbors(ROOT).is_empty());
    }
}
