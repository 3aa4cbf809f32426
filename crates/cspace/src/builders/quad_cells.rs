use super::{check_fits, check_positive, is_busy, ConfigSpaceBuilder};
use crate::error::CspaceError;
use crate::geom::{Point, Rect, Segment};
use crate::graph::{EnvNode, EnvironmentGraph, NodeId};
use crate::quadtree::QuadTree;
use crate::workspace::Workspace;

/// Adaptive cells: a busy cell is split into quadrants while the quadrants are
/// still at least `2·radius` wide and high.
///
/// Each leaf becomes a node at its center with `level_length_rel = 2^depth`,
/// available when no raw wall or obstacle meets the leaf. Available leaves are
/// joined to available edge-sharing leaves of the same or larger size unless
/// the joining segment crosses a raw wall.
#[derive(Clone, Copy, Debug)]
pub struct QuadTreeDecomposition {
    pub radius: f64,
}

impl QuadTreeDecomposition {
    fn subdivide(&self, ws: &Workspace, bounds: Rect) -> QuadTree {
        let d = 2.0 * self.radius;
        let map = ws.map();
        let mut tree = QuadTree::new(bounds);
        // (center, width, height); parents are handled before their quadrants.
        let mut pending: Vec<(Point, f64, f64)> = vec![(bounds.center(), bounds.width(), bounds.height())];
        while let Some((p, w, h)) = pending.pop() {
            if w < d || h < d {
                continue;
            }
            tree.insert(p);
            let (w2, h2) = (w / 2.0, h / 2.0);
            if w2 < d || h2 < d || !is_busy(map, &Rect::from_center(p, w2, h2)) {
                continue;
            }
            tree.remove(p);
            let (dx, dy) = (w2 / 2.0, h2 / 2.0);
            for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
                pending.push((Point::new(p.x() + sx * dx, p.y() + sy * dy), w2, h2));
            }
        }
        tree
    }
}

impl ConfigSpaceBuilder for QuadTreeDecomposition {
    fn name(&self) -> &'static str {
        "Building quad tree"
    }

    fn build(&self, ws: &Workspace) -> Result<EnvironmentGraph, CspaceError> {
        check_positive("radius", self.radius)?;
        let bounds = check_fits(ws, "diameter", 2.0 * self.radius)?;
        let tree = self.subdivide(ws, bounds);
        let map = ws.map();

        let mut graph = EnvironmentGraph::new();
        let mut node_of: Vec<Option<NodeId>> = vec![None; tree.cell_count()];
        let leaves = tree.leaves();
        for &leaf in &leaves {
            let Some(p) = tree.point(leaf) else {
                continue;
            };
            let id = graph.insert_node_with(EnvNode {
                position: p,
                available: !is_busy(map, &tree.rect(leaf)),
                level_length_rel: 2f64.powi(tree.depth(leaf) as i32),
            });
            node_of[leaf.0] = Some(id);
        }

        let available = |graph: &EnvironmentGraph, n: Option<NodeId>| {
            n.filter(|id| graph.node(*id).is_some_and(|node| node.available))
        };
        for &leaf in &leaves {
            let Some(u) = available(&graph, node_of[leaf.0]) else {
                continue;
            };
            for nb in tree.neighbors(leaf) {
                let Some(v) = available(&graph, node_of[nb.0]) else {
                    continue;
                };
                if graph.search_arc(u, v).is_some() {
                    continue;
                }
                let (Some(a), Some(b)) = (graph.node(u), graph.node(v)) else {
                    continue;
                };
                if map.segment_crosses_wall(&Segment::new(a.position, b.position)) {
                    continue;
                }
                graph.insert_arc(u, v);
            }
        }

        tracing::debug!(
            builder = self.name(),
            leaves = leaves.len(),
            nodes = graph.num_nodes(),
            available = graph.available_nodes(),
            arcs = graph.num_arcs(),
            "graph built"
        );
        Ok(graph)
    }
}
