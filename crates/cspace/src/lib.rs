//! Configuration-space construction for a disk-shaped robot.
//!
//! A polygonal workspace (walls, doors, obstacles) is turned into an
//! environment graph of positions the robot can occupy, by one of four
//! builders; the min-path extractor then runs Dijkstra between the mission
//! endpoints.
//!
//! Layout
//! - `geom`: exact-as-practical 2D kernel (points, segments, polygons, rectangles, hull).
//! - `map`, `workspace`, `buffer`: map storage and memoized obstacle buffering.
//! - `graph`, `quadtree`: node/arc arena and the quad-tree index.
//! - `builders`, `path`: free-space construction and shortest paths.
//! - `random`: reproducible random maps for benches and tests.
//!
//! Threading: single-threaded; `Workspace` holds an `Rc`/`RefCell` cache and is neither `Send` nor `Sync`.

pub mod buffer;
pub mod builders;
pub mod error;
pub mod geom;
pub mod graph;
pub mod map;
pub mod path;
pub mod quadtree;
pub mod random;
pub mod workspace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{CspaceError, Endpoint};

/// Common exports for callers driving a full build-and-search.
pub mod prelude {
    pub use crate::buffer::BufferCfg;
    pub use crate::builders::{
        Algorithm, BuildParams, ConfigSpaceBuilder, Discretization, QuadTreeDecomposition,
        SquareCells, VisibilityCfg, VisibilityGraph,
    };
    pub use crate::error::{CspaceError, Endpoint};
    pub use crate::geom::{Point, Polygon, Rect, Segment};
    pub use crate::graph::{EnvironmentGraph, NodeId, Placement};
    pub use crate::map::{EntityId, GeometricMap};
    pub use crate::path::{MinPath, MinPathBuilder};
    pub use crate::workspace::Workspace;
}
