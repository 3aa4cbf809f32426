//! Error type shared by the geometry kernel, builders, graph persistence and path search.

use std::fmt;
use std::io;

/// Mission endpoint role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Begin,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Begin => f.write_str("begin"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Failure conditions surfaced to the immediate caller. Nothing is retried internally.
#[derive(Debug)]
pub enum CspaceError {
    /// Radius/step non-positive, non-finite, or larger than the map extent.
    Parameter { reason: String },
    /// Path requested without the begin or end node selected.
    MissingEndpoint(Endpoint),
    /// Search exhausted without reaching the end node.
    NoPath,
    /// Containment asked of a polygon with fewer than 3 vertices.
    GeometryDegenerate { vertices: usize },
    /// Intersection point asked of segments that do not cross properly.
    NoIntersection,
    /// Malformed persisted graph (1-based line number).
    Format { line: usize, reason: String },
    Io(io::Error),
}

impl CspaceError {
    pub(crate) fn parameter(reason: impl Into<String>) -> Self {
        Self::Parameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::MissingEndpoint(role) => write!(f, "no {role} node selected"),
            Self::NoPath => write!(f, "no path between begin and end nodes"),
            Self::GeometryDegenerate { vertices } => write!(
                f,
                "polygon has {vertices} vertices; containment needs at least 3"
            ),
            Self::NoIntersection => write!(f, "segments do not intersect properly"),
            Self::Format { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for CspaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CspaceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
