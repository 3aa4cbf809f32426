//! Environment graph: the discretized free space a builder produces.
//!
//! Purpose
//! - Arena of nodes (positions with an availability flag and a relative cell
//!   scale) and undirected arcs, plus the mission begin/end selection consumed by
//!   the min-path extractor.
//!
//! Invariants
//! - Ids are stable: removing a node or arc leaves a hole, never shifts others.
//! - At most one arc per unordered node pair; self-loops are rejected.
//! - `begin`/`end`, when set, reference live nodes.
//!
//! Code cross-refs: `builders::ConfigSpaceBuilder`, `path::MinPathBuilder`,
//! `builders::visibility::connect_node` (endpoint insertion)

mod persist;

use std::collections::BTreeMap;

use crate::builders::visibility::connect_node;
use crate::error::Endpoint;
use crate::geom::Point;
use crate::workspace::Workspace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvNode {
    pub position: Point,
    pub available: bool,
    /// Cell size relative to the finest level; `1.0` outside the quad-tree builder.
    pub level_length_rel: f64,
}

impl EnvNode {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            available: true,
            level_length_rel: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvArc {
    pub src: NodeId,
    pub tgt: NodeId,
}

impl EnvArc {
    /// The endpoint that is not `n` (or `src` for a query on neither).
    #[inline]
    pub fn other(&self, n: NodeId) -> NodeId {
        if self.src == n {
            self.tgt
        } else {
            self.src
        }
    }
}

/// How a mission endpoint is attached to a built graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Insert a fresh node and connect it by visibility.
    NewNode,
    /// Reuse the nearest existing node.
    Snap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EndpointSlot {
    node: NodeId,
    /// The node was created for this endpoint and is owned by it.
    inserted: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EnvironmentGraph {
    nodes: Vec<Option<EnvNode>>,
    arcs: Vec<Option<EnvArc>>,
    adjacency: Vec<Vec<ArcId>>,
    arc_index: BTreeMap<(NodeId, NodeId), ArcId>,
    num_nodes: usize,
    num_arcs: usize,
    begin: Option<EndpointSlot>,
    end: Option<EndpointSlot>,
}

#[inline]
fn pair_key(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl EnvironmentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_node(&mut self, position: Point) -> NodeId {
        self.insert_node_with(EnvNode::new(position))
    }

    pub fn insert_node_with(&mut self, node: EnvNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        self.adjacency.push(Vec::new());
        self.num_nodes += 1;
        id
    }

    /// Removes `n` with its incident arcs; unsets begin/end pointing at it.
    pub fn remove_node(&mut self, n: NodeId) -> Option<EnvNode> {
        let node = self.nodes.get_mut(n.0)?.take()?;
        self.isolate(n);
        self.num_nodes -= 1;
        if self.begin.is_some_and(|s| s.node == n) {
            self.begin = None;
        }
        if self.end.is_some_and(|s| s.node == n) {
            self.end = None;
        }
        Some(node)
    }

    /// Inserts the undirected arc `u–v`, or returns the one already present.
    ///
    /// `None` for a self-loop or a missing endpoint.
    pub fn insert_arc(&mut self, u: NodeId, v: NodeId) -> Option<ArcId> {
        if u == v || self.node(u).is_none() || self.node(v).is_none() {
            return None;
        }
        let key = pair_key(u, v);
        if let Some(&a) = self.arc_index.get(&key) {
            return Some(a);
        }
        let id = ArcId(self.arcs.len());
        self.arcs.push(Some(EnvArc { src: u, tgt: v }));
        self.adjacency[u.0].push(id);
        self.adjacency[v.0].push(id);
        self.arc_index.insert(key, id);
        self.num_arcs += 1;
        Some(id)
    }

    pub fn remove_arc(&mut self, a: ArcId) -> Option<EnvArc> {
        let arc = self.arcs.get_mut(a.0)?.take()?;
        self.adjacency[arc.src.0].retain(|x| *x != a);
        self.adjacency[arc.tgt.0].retain(|x| *x != a);
        self.arc_index.remove(&pair_key(arc.src, arc.tgt));
        self.num_arcs -= 1;
        Some(arc)
    }

    /// Drops every arc incident to `n`.
    pub fn isolate(&mut self, n: NodeId) {
        let Some(incident) = self.adjacency.get_mut(n.0).map(std::mem::take) else {
            return;
        };
        for a in incident {
            self.remove_arc(a);
        }
    }

    pub fn search_arc(&self, u: NodeId, v: NodeId) -> Option<ArcId> {
        self.arc_index.get(&pair_key(u, v)).copied()
    }

    #[inline]
    pub fn node(&self, n: NodeId) -> Option<&EnvNode> {
        self.nodes.get(n.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn node_mut(&mut self, n: NodeId) -> Option<&mut EnvNode> {
        self.nodes.get_mut(n.0).and_then(Option::as_mut)
    }

    #[inline]
    pub fn arc(&self, a: ArcId) -> Option<&EnvArc> {
        self.arcs.get(a.0).and_then(Option::as_ref)
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &EnvNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    /// Live arcs in insertion order.
    pub fn arcs(&self) -> impl Iterator<Item = (ArcId, &EnvArc)> + '_ {
        self.arcs
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_ref().map(|a| (ArcId(i), a)))
    }

    pub fn neighbors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(n.0)
            .into_iter()
            .flatten()
            .filter_map(move |a| self.arc(*a).map(|arc| arc.other(n)))
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.num_arcs
    }

    pub fn available_nodes(&self) -> usize {
        self.nodes().filter(|(_, n)| n.available).count()
    }

    /// One past the largest node id ever issued (for dense per-node tables).
    #[inline]
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn begin(&self) -> Option<NodeId> {
        self.begin.map(|s| s.node)
    }

    #[inline]
    pub fn end(&self) -> Option<NodeId> {
        self.end.map(|s| s.node)
    }

    /// Nearest live node by Euclidean distance; the first one found wins ties.
    pub fn get_closest_node(&self, p: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, n) in self.nodes() {
            let d = n.position.distance_with(&p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn set_begin(&mut self, p: Point, placement: Placement, radius: f64, ws: &Workspace) {
        self.place_endpoint(Endpoint::Begin, p, placement, radius, ws);
    }

    pub fn set_end(&mut self, p: Point, placement: Placement, radius: f64, ws: &Workspace) {
        self.place_endpoint(Endpoint::End, p, placement, radius, ws);
    }

    fn slot_mut(&mut self, role: Endpoint) -> &mut Option<EndpointSlot> {
        match role {
            Endpoint::Begin => &mut self.begin,
            Endpoint::End => &mut self.end,
        }
    }

    fn place_endpoint(
        &mut self,
        role: Endpoint,
        p: Point,
        placement: Placement,
        radius: f64,
        ws: &Workspace,
    ) {
        if let Some(old) = self.slot_mut(role).take() {
            if old.inserted {
                self.remove_node(old.node);
            }
        }
        let slot = match placement {
            Placement::NewNode => {
                let id = self.insert_node(p);
                let available = connect_node(self, ws, id, radius);
                if let Some(n) = self.node_mut(id) {
                    n.available = available;
                }
                Some(EndpointSlot {
                    node: id,
                    inserted: true,
                })
            }
            Placement::Snap => self.get_closest_node(p).map(|node| EndpointSlot {
                node,
                inserted: false,
            }),
        };
        tracing::debug!(?role, ?placement, node = ?slot.map(|s| s.node), "endpoint placed");
        *self.slot_mut(role) = slot;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests;
