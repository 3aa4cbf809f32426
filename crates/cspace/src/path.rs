//! Minimal path between the graph's begin and end nodes.
//!
//! Dijkstra over the environment graph with Euclidean arc weights. The search
//! only follows arcs, so unavailable nodes (which keep none) are never crossed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::Write;

use crate::error::{CspaceError, Endpoint};
use crate::geom::Point;
use crate::graph::{EnvironmentGraph, NodeId};

#[derive(Clone, Copy, Debug)]
struct DijkstraState {
    cost: f64,
    node: NodeId,
}

impl PartialEq for DijkstraState {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; ties broken by node id for determinism.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered waypoints from begin to end and their total length.
#[derive(Clone, Debug, PartialEq)]
pub struct MinPath {
    points: Vec<Point>,
    length: f64,
}

impl MinPath {
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// One `x y` line per waypoint.
    pub fn save<W: Write>(&self, mut w: W) -> Result<(), CspaceError> {
        for p in &self.points {
            writeln!(w, "{} {}", p.x(), p.y())?;
        }
        w.flush()?;
        Ok(())
    }
}

impl IntoIterator for MinPath {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

pub struct MinPathBuilder<'a> {
    graph: &'a EnvironmentGraph,
}

impl<'a> MinPathBuilder<'a> {
    pub fn new(graph: &'a EnvironmentGraph) -> Self {
        Self { graph }
    }

    pub fn build(&self) -> Result<MinPath, CspaceError> {
        let g = self.graph;
        let start = g.begin().ok_or(CspaceError::MissingEndpoint(Endpoint::Begin))?;
        let goal = g.end().ok_or(CspaceError::MissingEndpoint(Endpoint::End))?;
        let position = |n: NodeId| g.node(n).map(|node| node.position);

        if start == goal {
            let p = position(start).ok_or(CspaceError::NoPath)?;
            return Ok(MinPath {
                points: vec![p],
                length: 0.0,
            });
        }

        let n = g.node_bound();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<NodeId>> = vec![None; n];
        dist[start.0] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(DijkstraState {
            cost: 0.0,
            node: start,
        });
        let mut settled = 0usize;

        while let Some(DijkstraState { cost, node }) = heap.pop() {
            if cost > dist[node.0] {
                continue;
            }
            settled += 1;
            if node == goal {
                break;
            }
            let Some(here) = position(node) else {
                continue;
            };
            for next in g.neighbors(node) {
                let Some(there) = position(next) else {
                    continue;
                };
                let candidate = cost + here.distance_with(&there);
                if candidate < dist[next.0] {
                    dist[next.0] = candidate;
                    prev[next.0] = Some(node);
                    heap.push(DijkstraState {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }

        if !dist[goal.0].is_finite() {
            tracing::debug!(settled, "end node unreachable");
            return Err(CspaceError::NoPath);
        }
        let mut nodes = vec![goal];
        let mut current = goal;
        while let Some(p) = prev[current.0] {
            nodes.push(p);
            current = p;
        }
        nodes.reverse();
        let points = nodes.into_iter().filter_map(position).collect::<Vec<_>>();
        tracing::debug!(settled, waypoints = points.len(), length = dist[goal.0], "path found");
        Ok(MinPath {
            points,
            length: dist[goal.0],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Segment;
    use crate::graph::Placement;
    use crate::map::GeometricMap;
    use crate::workspace::Workspace;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Square a-b-c-d with one diagonal a-c and a far detour through e.
    fn diamond() -> (EnvironmentGraph, Workspace) {
        let mut g = EnvironmentGraph::new();
        let a = g.insert_node(p(0.0, 0.0));
        let b = g.insert_node(p(1.0, 0.0));
        let c = g.insert_node(p(1.0, 1.0));
        let d = g.insert_node(p(0.0, 1.0));
        let e = g.insert_node(p(5.0, 5.0));
        g.insert_arc(a, b);
        g.insert_arc(b, c);
        g.insert_arc(c, d);
        g.insert_arc(d, a);
        g.insert_arc(a, c);
        g.insert_arc(a, e);
        g.insert_arc(e, c);
        let mut map = GeometricMap::new();
        map.add_wall(Segment::new(p(-1.0, -1.0), p(6.0, -1.0)));
        (g, Workspace::new(map))
    }

    #[test]
    fn shortest_path_takes_the_diagonal() {
        let (mut g, ws) = diamond();
        g.set_begin(p(0.0, 0.0), Placement::Snap, 0.1, &ws);
        g.set_end(p(1.0, 1.0), Placement::Snap, 0.1, &ws);
        let path = MinPathBuilder::new(&g).build().unwrap();
        assert_eq!(path.points(), &[p(0.0, 0.0), p(1.0, 1.0)]);
        assert!((path.length() - 2f64.sqrt()).abs() < 1e-12);
        let collected: Vec<Point> = path.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn detour_when_diagonal_removed() {
        let (mut g, ws) = diamond();
        let a = g.get_closest_node(p(0.0, 0.0)).unwrap();
        let c = g.get_closest_node(p(1.0, 1.0)).unwrap();
        let ac = g.search_arc(a, c).unwrap();
        g.remove_arc(ac);
        g.set_begin(p(0.0, 0.0), Placement::Snap, 0.1, &ws);
        g.set_end(p(1.0, 1.0), Placement::Snap, 0.1, &ws);
        let path = MinPathBuilder::new(&g).build().unwrap();
        assert_eq!(path.len(), 3);
        assert!((path.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn begin_equal_end_is_a_single_point() {
        let (mut g, ws) = diamond();
        g.set_begin(p(1.0, 0.1), Placement::Snap, 0.1, &ws);
        g.set_end(p(0.9, 0.0), Placement::Snap, 0.1, &ws);
        let path = MinPathBuilder::new(&g).build().unwrap();
        assert_eq!(path.points(), &[p(1.0, 0.0)]);
        assert_eq!(path.length(), 0.0);
        assert!(!path.is_empty());
    }

    #[test]
    fn missing_endpoints_and_unreachable_end() {
        let (mut g, ws) = diamond();
        assert!(matches!(
            MinPathBuilder::new(&g).build(),
            Err(CspaceError::MissingEndpoint(Endpoint::Begin))
        ));
        g.set_begin(p(0.0, 0.0), Placement::Snap, 0.1, &ws);
        assert!(matches!(
            MinPathBuilder::new(&g).build(),
            Err(CspaceError::MissingEndpoint(Endpoint::End))
        ));
        let lonely = g.insert_node(p(-3.0, -3.0));
        assert_eq!(g.neighbors(lonely).count(), 0);
        g.set_end(p(-3.0, -3.0), Placement::Snap, 0.1, &ws);
        assert!(matches!(MinPathBuilder::new(&g).build(), Err(CspaceError::NoPath)));
    }

    #[test]
    fn save_writes_one_line_per_point() {
        let (mut g, ws) = diamond();
        g.set_begin(p(0.0, 0.0), Placement::Snap, 0.1, &ws);
        g.set_end(p(0.0, 1.0), Placement::Snap, 0.1, &ws);
        let path = MinPathBuilder::new(&g).build().unwrap();
        let mut out = Vec::new();
        path.save(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 0\n0 1\n");
    }
}
