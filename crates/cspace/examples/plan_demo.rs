//! Build every configuration space for one small map and print the path each yields.
//!
//! Usage:
//!   cargo run -p cspace --example plan_demo
//!   cargo run -p cspace --example plan_demo -- 0.4   (robot radius)

use cspace::prelude::*;

fn main() {
    let radius: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.3);

    let mut map = GeometricMap::new();
    map.add_wall(Segment::new(Point::new(0.0, 0.0), Point::new(12.0, 0.0)));
    map.add_wall(Segment::new(Point::new(0.0, 8.0), Point::new(12.0, 8.0)));
    map.add_obstacle(Polygon::from_vertices(vec![
        Point::new(4.0, 2.0),
        Point::new(6.0, 2.0),
        Point::new(6.0, 6.0),
        Point::new(4.0, 5.0),
    ]));
    map.add_obstacle(Polygon::from_vertices(vec![
        Point::new(8.0, 3.0),
        Point::new(10.0, 4.0),
        Point::new(8.5, 6.5),
    ]));
    map.set_mission_begin(Point::new(1.0, 4.0));
    map.set_mission_end(Point::new(11.0, 4.0));
    let ws = Workspace::new(map);

    let params = BuildParams {
        radius,
        step: Some(0.5),
        visibility: VisibilityCfg::default(),
    };
    for algo in Algorithm::ALL {
        let mut graph = match algo.build(&ws, params) {
            Ok(g) => g,
            Err(e) => {
                println!("{algo}: {e}");
                continue;
            }
        };
        let placement = algo.endpoint_placement();
        if let (Some(b), Some(e)) = (ws.map().mission_begin(), ws.map().mission_end()) {
            graph.set_begin(b, placement, radius, &ws);
            graph.set_end(e, placement, radius, &ws);
        }
        match MinPathBuilder::new(&graph).build() {
            Ok(path) => println!(
                "{algo}: nodes={} arcs={} waypoints={} length={:.3}",
                graph.num_nodes(),
                graph.num_arcs(),
                path.len(),
                path.length()
            ),
            Err(e) => println!("{algo}: nodes={} arcs={} ({e})", graph.num_nodes(), graph.num_arcs()),
        }
    }
}
