use std::collections::BTreeSet;

use super::grid::build_grid;
use super::{check_fits, check_positive, inside, mark_unavailable, ConfigSpaceBuilder};
use crate::error::CspaceError;
use crate::geom::Segment;
use crate::graph::{ArcId, EnvironmentGraph};
use crate::workspace::Workspace;

/// Regular grid of spacing `step` over the map bounds, pruned against the
/// radius-buffered walls and obstacles.
///
/// - A node inside a buffered polygon (boundary included) is unavailable and keeps no arcs.
/// - An arc properly crossing a buffered polygon is removed.
#[derive(Clone, Copy, Debug)]
pub struct Discretization {
    pub step: f64,
    pub radius: f64,
}

impl ConfigSpaceBuilder for Discretization {
    fn name(&self) -> &'static str {
        "Discretization"
    }

    fn build(&self, ws: &Workspace) -> Result<EnvironmentGraph, CspaceError> {
        check_positive("step", self.step)?;
        check_positive("radius", self.radius)?;
        let bounds = check_fits(ws, "step", self.step)?;
        let (mut graph, lattice) = build_grid(bounds, self.step)?;

        for poly in ws.extended_all(self.radius) {
            let Some(bb) = poly.bounding_rect() else {
                continue;
            };
            let covered: Vec<_> = lattice
                .nodes_near(&bb, 0)
                .filter(|n| {
                    graph
                        .node(*n)
                        .is_some_and(|node| node.available && inside(&poly, node.position, true))
                })
                .collect();
            for n in covered {
                mark_unavailable(&mut graph, n);
            }
            // Arcs are at most one diagonal long, so a crossing arc has an end within one step of the box.
            let mut candidates: BTreeSet<ArcId> = BTreeSet::new();
            for n in lattice.nodes_near(&bb, 1) {
                for m in graph.neighbors(n) {
                    if let Some(a) = graph.search_arc(n, m) {
                        candidates.insert(a);
                    }
                }
            }
            for a in candidates {
                let Some(arc) = graph.arc(a) else {
                    continue;
                };
                let (Some(s), Some(t)) = (graph.node(arc.src), graph.node(arc.tgt)) else {
                    continue;
                };
                if poly.intersects_properly_with_segment(&Segment::new(s.position, t.position)) {
                    graph.remove_arc(a);
                }
            }
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
