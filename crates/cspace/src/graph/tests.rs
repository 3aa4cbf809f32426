use super::*;
use crate::error::CspaceError;
use crate::geom::Polygon;
use crate::map::GeometricMap;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn triangle_graph() -> (EnvironmentGraph, [NodeId; 3]) {
    let mut g = EnvironmentGraph::new();
    let a = g.insert_node(p(0.0, 0.0));
    let b = g.insert_node(p(1.0, 0.0));
    let c = g.insert_node(p(0.0, 1.0));
    g.insert_arc(a, b).unwrap();
    g.insert_arc(b, c).unwrap();
    g.insert_arc(c, a).unwrap();
    (g, [a, b, c])
}

/// Square obstacle [4,6]² in a 10×10 map.
fn blocked_workspace() -> Workspace {
    let mut map = GeometricMap::new();
    map.extend_bounds(p(0.0, 0.0));
    map.extend_bounds(p(10.0, 10.0));
    map.add_obstacle(Polygon::from_vertices(vec![
        p(4.0, 4.0),
        p(6.0, 4.0),
        p(6.0, 6.0),
        p(4.0, 6.0),
    ]));
    Workspace::new(map)
}

#[test]
fn arcs_are_undirected_and_unique() {
    let (mut g, [a, b, c]) = triangle_graph();
    assert_eq!(g.num_arcs(), 3);
    let ab = g.search_arc(a, b).unwrap();
    assert_eq!(g.search_arc(b, a), Some(ab));
    assert_eq!(g.insert_arc(b, a), Some(ab));
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.insert_arc(c, c), None);
    assert_eq!(g.insert_arc(a, NodeId(42)), None);
    let mut nb: Vec<_> = g.neighbors(a).collect();
    nb.sort();
    assert_eq!(nb, vec![b, c]);
    let arc = g.remove_arc(ab).unwrap();
    assert_eq!((arc.src, arc.tgt), (a, b));
    assert!(g.search_arc(a, b).is_none());
    assert!(g.remove_arc(ab).is_none());
    assert_eq!(g.neighbors(a).collect::<Vec<_>>(), vec![c]);
}

#[test]
fn removing_node_drops_incident_arcs_and_keeps_ids() {
    let (mut g, [a, b, c]) = triangle_graph();
    g.remove_node(b).unwrap();
    assert_eq!(g.num_nodes(), 2);
    assert_eq!(g.num_arcs(), 1);
    assert!(g.node(b).is_none());
    assert!(g.remove_node(b).is_none());
    assert!(g.search_arc(a, c).is_some());
    let d = g.insert_node(p(5.0, 5.0));
    assert_eq!(d, NodeId(3));
    assert_eq!(g.node_bound(), 4);
    let ids: Vec<_> = g.nodes().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, c, d]);
}

#[test]
fn closest_node_prefers_first_on_ties() {
    let mut g = EnvironmentGraph::new();
    assert!(g.get_closest_node(p(0.0, 0.0)).is_none());
    let a = g.insert_node(p(-1.0, 0.0));
    let _b = g.insert_node(p(1.0, 0.0));
    let c = g.insert_node(p(3.0, 0.0));
    assert_eq!(g.get_closest_node(p(0.0, 0.0)), Some(a));
    assert_eq!(g.get_closest_node(p(2.6, 0.1)), Some(c));
}

#[test]
fn snap_selects_nearest_and_empty_graph_leaves_unset() {
    let ws = blocked_workspace();
    let mut g = EnvironmentGraph::new();
    g.set_begin(p(1.0, 1.0), Placement::Snap, 0.5, &ws);
    assert!(g.begin().is_none());
    let (mut g, [a, _, c]) = triangle_graph();
    g.set_begin(p(0.1, 0.1), Placement::Snap, 0.5, &ws);
    g.set_end(p(0.1, 0.9), Placement::Snap, 0.5, &ws);
    assert_eq!(g.begin(), Some(a));
    assert_eq!(g.end(), Some(c));
    // Snapped nodes are not owned by the endpoint.
    g.set_begin(p(0.9, 0.1), Placement::Snap, 0.5, &ws);
    assert_eq!(g.num_nodes(), 3);
}

#[test]
fn new_node_endpoint_replaces_previous_one() {
    let ws = blocked_workspace();
    let mut g = EnvironmentGraph::new();
    let left = g.insert_node(p(1.0, 5.0));
    let right = g.insert_node(p(9.0, 1.0));
    g.set_begin(p(1.0, 1.0), Placement::NewNode, 0.5, &ws);
    let b0 = g.begin().unwrap();
    assert!(g.node(b0).unwrap().available);
    assert!(g.search_arc(b0, left).is_some());
    assert!(g.search_arc(b0, right).is_some());
    assert_eq!(g.num_nodes(), 3);

    g.set_begin(p(9.0, 5.0), Placement::NewNode, 0.5, &ws);
    let b1 = g.begin().unwrap();
    assert!(g.node(b0).is_none());
    assert_eq!(g.num_nodes(), 3);
    assert!(g.search_arc(b1, right).is_some());
    // (9,5) to (1,5) runs through the obstacle.
    assert!(g.search_arc(b1, left).is_none());
}

#[test]
fn new_node_inside_buffer_is_unavailable() {
    let ws = blocked_workspace();
    let mut g = EnvironmentGraph::new();
    let far = g.insert_node(p(1.0, 1.0));
    g.set_end(p(5.0, 5.0), Placement::NewNode, 0.5, &ws);
    let e = g.end().unwrap();
    assert!(!g.node(e).unwrap().available);
    assert_eq!(g.neighbors(e).count(), 0);
    assert!(g.search_arc(e, far).is_none());
}

#[test]
fn removing_endpoint_node_unsets_role() {
    let (mut g, [a, ..]) = triangle_graph();
    let ws = blocked_workspace();
    g.set_begin(p(0.0, 0.0), Placement::Snap, 0.5, &ws);
    assert_eq!(g.begin(), Some(a));
    g.remove_node(a);
    assert!(g.begin().is_none());
    g.clear();
    assert_eq!(g.num_nodes(), 0);
    assert_eq!(g.num_arcs(), 0);
}

#[test]
fn save_emits_only_available_nodes_and_their_arcs() {
    let (mut g, [_, b, _]) = triangle_graph();
    let d = g.insert_node_with(EnvNode {
        position: p(2.5, -1.0),
        available: true,
        level_length_rel: 4.0,
    });
    g.insert_arc(b, d);
    g.node_mut(b).unwrap().available = false;
    let mut out = Vec::new();
    g.save(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "3\n0 0 1\n0 1 1\n2.5 -1 4\n1\n1 0\n");
}

#[test]
fn save_then_load_round_trips() {
    let (mut g, [a, _, c]) = triangle_graph();
    g.node_mut(a).unwrap().level_length_rel = 2.0;
    g.node_mut(c).unwrap().position = p(0.1, 1.0 / 3.0);
    let mut out = Vec::new();
    g.save(&mut out).unwrap();
    let back = EnvironmentGraph::load(out.as_slice()).unwrap();
    assert_eq!(back.num_nodes(), 3);
    assert_eq!(back.num_arcs(), 3);
    for ((_, x), (_, y)) in g.nodes().zip(back.nodes()) {
        assert_eq!(x, y);
    }
    for (_, arc) in g.arcs() {
        assert!(back.search_arc(arc.src, arc.tgt).is_some());
    }
}

#[test]
fn load_reports_line_numbers() {
    let err = EnvironmentGraph::load("2\n0 0 1\n1 x 1\n0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CspaceError::Format { line: 3, .. }), "{err}");
    let err = EnvironmentGraph::load("1\n0 0 1\n1\n0 1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CspaceError::Format { line: 4, .. }), "{err}");
    let err = EnvironmentGraph::load("1\n0 0 1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CspaceError::Format { line: 3, .. }), "{err}");
    let err = EnvironmentGraph::load("1\n0 0 1\n1\n0 0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CspaceError::Format { line: 4, .. }), "{err}");
}
