//! Configuration-space builders: map + robot radius → environment graph.
//!
//! Purpose
//! - Four ways of turning a continuous polygonal workspace into a graph of
//!   positions a disk robot of the given radius can occupy:
//!   regular-grid discretization, square cells, quad-tree decomposition and the
//!   visibility graph over buffered vertices.
//!
//! Shared contract
//! - Parameters are validated before any graph is built; a failed build returns
//!   `Err` and nothing else.
//! - Every arc joins two available nodes.
//! - Each builder has its own notion of free space; shortest paths are optimal
//!   only within the graph it returns.
//!
//! Code cross-refs: `Workspace::extended`, `graph::EnvironmentGraph`, `quadtree::QuadTree`

mod discretize;
mod grid;
mod quad_cells;
mod square_cells;
pub(crate) mod visibility;

pub use discretize::Discretization;
pub use grid::MAX_GRID_NODES;
pub use quad_cells::QuadTreeDecomposition;
pub use square_cells::SquareCells;
pub use visibility::{VisibilityCfg, VisibilityGraph};

use std::fmt;

use crate::error::CspaceError;
use crate::geom::{Polygon, Rect};
use crate::graph::{EnvironmentGraph, NodeId, Placement};
use crate::map::GeometricMap;
use crate::workspace::Workspace;

pub trait ConfigSpaceBuilder {
    /// Modeling-technique label.
    fn name(&self) -> &'static str;
    fn build(&self, ws: &Workspace) -> Result<EnvironmentGraph, CspaceError>;
}

/// Builder selector for callers that pick the technique at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Discretization,
    SquareCells,
    QuadTree,
    VisibilityGraph,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Discretization,
        Algorithm::SquareCells,
        Algorithm::QuadTree,
        Algorithm::VisibilityGraph,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Discretization => "Discretization",
            Algorithm::SquareCells => "Building square cells",
            Algorithm::QuadTree => "Building quad tree",
            Algorithm::VisibilityGraph => "Visibility graph",
        }
    }

    /// How mission endpoints attach to graphs of this kind.
    pub fn endpoint_placement(self) -> Placement {
        match self {
            Algorithm::VisibilityGraph => Placement::NewNode,
            _ => Placement::Snap,
        }
    }

    pub fn build(self, ws: &Workspace, params: BuildParams) -> Result<EnvironmentGraph, CspaceError> {
        let radius = params.radius;
        match self {
            Algorithm::Discretization => {
                let step = params
                    .step
                    .ok_or_else(|| CspaceError::parameter("discretization needs a step length"))?;
                Discretization { step, radius }.build(ws)
            }
            Algorithm::SquareCells => SquareCells { radius }.build(ws),
            Algorithm::QuadTree => QuadTreeDecomposition { radius }.build(ws),
            Algorithm::VisibilityGraph => VisibilityGraph {
                radius,
                cfg: params.visibility,
            }
            .build(ws),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for `Algorithm::build`.
#[derive(Clone, Copy, Debug)]
pub struct BuildParams {
    pub radius: f64,
    /// Grid spacing; only the discretization reads it.
    pub step: Option<f64>,
    pub visibility: VisibilityCfg,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            step: None,
            visibility: VisibilityCfg::default(),
        }
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), CspaceError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CspaceError::parameter(format!(
            "{name} must be finite and > 0 (got {value})"
        )))
    }
}

/// Map bounds, provided the map has geometry and `length` fits in both extents.
pub(crate) fn check_fits(ws: &Workspace, name: &str, length: f64) -> Result<Rect, CspaceError> {
    let map = ws.map();
    let bounds = match map.bounds() {
        Some(b) if !map.is_empty() => b,
        _ => return Err(CspaceError::parameter("map has no walls or obstacles")),
    };
    if length > bounds.width() || length > bounds.height() {
        return Err(CspaceError::parameter(format!(
            "{name} {length} exceeds map extent {} x {}",
            bounds.width(),
            bounds.height()
        )));
    }
    Ok(bounds)
}

/// Flags `n` unavailable and drops its arcs.
pub(crate) fn mark_unavailable(graph: &mut EnvironmentGraph, n: NodeId) {
    if let Some(node) = graph.node_mut(n) {
        node.available = false;
    }
    graph.isolate(n);
}

/// Some raw wall or obstacle meets the closed rectangle.
pub(crate) fn is_busy(map: &GeometricMap, rect: &Rect) -> bool {
    map.walls().iter().any(|w| rect.intersects_segment(w))
        || map.obstacles().iter().any(|o| rect.intersects_polygon(o))
}

/// Containment that treats polygons without interior as empty.
#[inline]
pub(crate) fn inside(poly: &Polygon, p: crate::geom::Point, borders: bool) -> bool {
    poly.len() >= 3 && poly.contains(p, borders).unwrap_or(false)
}
