use super::grid::build_grid;
use super::{check_fits, check_positive, mark_unavailable, ConfigSpaceBuilder};
use crate::error::CspaceError;
use crate::geom::Rect;
use crate::graph::{EnvironmentGraph, NodeId};
use crate::workspace::Workspace;

/// Grid of cells with side `2·radius`; a cell touching any raw wall or obstacle is unavailable.
#[derive(Clone, Copy, Debug)]
pub struct SquareCells {
    pub radius: f64,
}

impl ConfigSpaceBuilder for SquareCells {
    fn name(&self) -> &'static str {
        "Building square cells"
    }

    fn build(&self, ws: &Workspace) -> Result<EnvironmentGraph, CspaceError> {
        check_positive("radius", self.radius)?;
        let diameter = 2.0 * self.radius;
        let bounds = check_fits(ws, "diameter", diameter)?;
        let (mut graph, lattice) = build_grid(bounds, diameter)?;
        let map = ws.map();
        let r = self.radius;

        let cell_of = |graph: &EnvironmentGraph, n: NodeId| {
            graph
                .node(n)
                .filter(|node| node.available)
                .map(|node| Rect::from_center(node.position, r, r))
        };
        let mut busy = Vec::new();
        for wall in map.walls() {
            let mut bb = Rect::new(wall.src, wall.src);
            bb.expand_to_include(wall.tgt);
            for n in lattice.nodes_near(&bb, 1) {
                if cell_of(&graph, n).is_some_and(|cell| cell.intersects_segment(wall)) {
                    busy.push(n);
                }
            }
        }
        for obstacle in map.obstacles() {
            let Some(bb) = obstacle.bounding_rect() else {
                continue;
            };
            for n in lattice.nodes_near(&bb, 1) {
                if cell_of(&graph, n).is_some_and(|cell| cell.intersects_polygon(obstacle)) {
                    busy.push(n);
                }
            }
        }
        for n in busy {
            mark_unavailable(&mut graph, n);
        }

        tracing::debug!(
            builder = self.name(),
            nodes = graph.num_nodes(),
            available = graph.available_nodes(),
            arcs = graph.num_arcs(),
            "graph built"
        );
        Ok(graph)
    }
}
