use std::rc::Rc;

use super::{check_fits, check_positive, inside, ConfigSpaceBuilder};
use crate::error::CspaceError;
use crate::geom::{Polygon, Segment};
use crate::graph::{EnvironmentGraph, NodeId};
use crate::workspace::Workspace;

/// Visibility-graph configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityCfg {
    /// Extra offset for candidate vertices, keeping them off the radius buffer boundary.
    pub margin: f64,
}

impl Default for VisibilityCfg {
    fn default() -> Self {
        Self { margin: 0.01 }
    }
}

/// Vertices of the `radius + margin` buffers inside the map bounds, joined
/// wherever the straight segment stays clear of every `radius` buffer.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityGraph {
    pub radius: f64,
    pub cfg: VisibilityCfg,
}

impl ConfigSpaceBuilder for VisibilityGraph {
    fn name(&self) -> &'static str {
        "Visibility graph"
    }

    fn build(&self, ws: &Workspace) -> Result<EnvironmentGraph, CspaceError> {
        check_positive("radius", self.radius)?;
        if !(self.cfg.margin.is_finite() && self.cfg.margin >= 0.0) {
            return Err(CspaceError::parameter(format!(
                "margin must be finite and >= 0 (got {})",
                self.cfg.margin
            )));
        }
        let bounds = check_fits(ws, "radius", self.radius)?;

        let mut graph = EnvironmentGraph::new();
        for poly in ws.extended_all(self.radius + self.cfg.margin) {
            for v in poly.vertices() {
                if bounds.contains_point(*v) {
                    graph.insert_node(*v);
                }
            }
        }
        let blocking = ws.extended_all(self.radius);
        let ids: Vec<NodeId> = graph.nodes().map(|(id, _)| id).collect();
        for u in ids {
            let available = connect_with(&mut graph, &blocking, u);
            if let Some(node) = graph.node_mut(u) {
                node.available = available;
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

/// Connects `u` to every visible node; `false` when `u` itself is blocked.
///
/// Also used for mission endpoints inserted after the build.
pub(crate) fn connect_node(graph: &mut EnvironmentGraph, ws: &Workspace, u: NodeId, radius: f64) -> bool {
    let blocking = ws.extended_all(radius);
    connect_with(graph, &blocking, u)
}

fn connect_with(graph: &mut EnvironmentGraph, blocking: &[Rc<Polygon>], u: NodeId) -> bool {
    let Some(pu) = graph.node(u).map(|n| n.position) else {
        return false;
    };
    if blocking.iter().any(|poly| inside(poly, pu, false)) {
        return false;
    }
    let candidates: Vec<_> = graph
        .nodes()
        .filter(|(v, n)| *v != u && n.available)
        .map(|(v, n)| (v, n.position))
        .collect();
    for (v, pv) in candidates {
        if graph.search_arc(u, v).is_some() {
            continue;
        }
        if blocking.iter().any(|poly| inside(poly, pv, false)) {
            continue;
        }
        let seg = Segment::new(pu, pv);
        if blocking.iter().any(|poly| crosses(poly, &seg)) {
            continue;
        }
        graph.insert_arc(u, v);
    }
    true
}

/// Proper edge crossing, or a chord through the interior (midpoint strictly inside).
fn crosses(poly: &Polygon, seg: &Segment) -> bool {
    poly.intersects_properly_with_segment(seg) || inside(poly, seg.midpoint(), false)
}
