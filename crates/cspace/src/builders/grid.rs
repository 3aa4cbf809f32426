//! Regular lattice shared by the discretization and square-cell builders.

use crate::error::CspaceError;
use crate::geom::{Point, Rect};
use crate::graph::{EnvironmentGraph, NodeId};

/// Upper bound on lattice nodes; finer requests fail with `Parameter`.
pub const MAX_GRID_NODES: usize = 4_000_000;

/// Slack on `extent / spacing` so exact multiples keep their last row/column.
const FIT_EPS: f64 = 1e-9;

/// Nodes along an extent: `floor(extent / spacing) + 1`.
pub(crate) fn lattice_size(extent: f64, spacing: f64) -> usize {
    (extent / spacing + FIT_EPS).floor() as usize + 1
}

/// Row-major lattice anchored at the map's min corner; node `(i, j)` is `NodeId(j * cols + i)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lattice {
    pub origin: Point,
    pub spacing: f64,
    pub cols: usize,
    pub rows: usize,
}

impl Lattice {
    #[inline]
    pub fn id(&self, i: usize, j: usize) -> NodeId {
        NodeId(j * self.cols + i)
    }

    /// Nodes whose position may fall in `rect` grown by `pad` steps on every side.
    pub fn nodes_near(&self, rect: &Rect, pad: usize) -> impl Iterator<Item = NodeId> + '_ {
        let (i0, i1) = self.span(rect.min.x() - self.origin.x(), rect.max.x() - self.origin.x(), self.cols, pad);
        let (j0, j1) = self.span(rect.min.y() - self.origin.y(), rect.max.y() - self.origin.y(), self.rows, pad);
        (j0..j1).flat_map(move |j| (i0..i1).map(move |i| self.id(i, j)))
    }

    fn span(&self, lo: f64, hi: f64, n: usize, pad: usize) -> (usize, usize) {
        let lo = (lo / self.spacing).floor();
        let hi = (hi / self.spacing).ceil();
        let start = if lo <= 0.0 { 0 } else { (lo as usize).saturating_sub(pad).min(n) };
        let end = if hi < 0.0 { 0 } else { (hi as usize + 1 + pad).min(n) };
        (start, end.max(start))
    }
}

/// Lattice nodes plus 8-neighbour arcs (horizontal, vertical, both diagonals).
pub(crate) fn build_grid(bounds: Rect, spacing: f64) -> Result<(EnvironmentGraph, Lattice), CspaceError> {
    let cols = lattice_size(bounds.width(), spacing);
    let rows = lattice_size(bounds.height(), spacing);
    if cols.saturating_mul(rows) > MAX_GRID_NODES {
        return Err(CspaceError::parameter(format!(
            "grid too fine: {cols} x {rows} nodes exceeds {MAX_GRID_NODES}"
        )));
    }
    let lattice = Lattice {
        origin: bounds.min,
        spacing,
        cols,
        rows,
    };
    let mut graph = EnvironmentGraph::new();
    for j in 0..rows {
        for i in 0..cols {
            graph.insert_node(Point::new(
                bounds.min.x() + i as f64 * spacing,
                bounds.min.y() + j as f64 * spacing,
            ));
        }
    }
    for j in 0..rows {
        for i in 0..cols {
            let here = lattice.id(i, j);
            if i + 1 < cols {
                graph.insert_arc(here, lattice.id(i + 1, j));
            }
            if j + 1 < rows {
                graph.insert_arc(here, lattice.id(i, j + 1));
                if i + 1 < cols {
                    graph.insert_arc(here, lattice.id(i + 1, j + 1));
                }
                if i > 0 {
                    graph.insert_arc(here, lattice.id(i - 1, j + 1));
                }
            }
        }
    }
    Ok((graph, lattice))
}
