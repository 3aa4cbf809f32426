//! Random polygonal maps (radial-jitter obstacles + replay tokens).
//!
//! Purpose
//! - Reproducible workspaces for benchmarks, demos and property tests.
//!
//! Model
//! - Obstacles: `n` equally spaced angles with bounded angular and radial
//!   jitter around a random center, closed by the convex hull.
//! - Walls: segments with uniformly drawn endpoints.
//! - The bounding box is the square `[0, extent]²`; every shape stays inside it.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `geom::convex_hull`, `map::GeometricMap`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CspaceError;
use crate::geom::{convex_hull, Point, Polygon, Segment};
use crate::map::GeometricMap;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Random map configuration.
#[derive(Clone, Copy, Debug)]
pub struct MapCfg {
    /// Side of the square map.
    pub extent: f64,
    pub obstacles: usize,
    pub walls: usize,
    pub vertex_count: VertexCount,
    /// Obstacle circumradius range before jitter.
    pub radius_min: f64,
    pub radius_max: f64,
    /// Angular jitter as a fraction of the base spacing. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Relative radial jitter. Clamped to [0, 0.9].
    pub radial_jitter: f64,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self {
            extent: 20.0,
            obstacles: 4,
            walls: 2,
            vertex_count: VertexCount::Uniform { min: 3, max: 8 },
            radius_min: 0.5,
            radius_max: 2.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Convex obstacle around `center` with circumradius about `radius`.
pub fn draw_obstacle_radial<R: Rng>(rng: &mut R, center: Point, radius: f64, cfg: &MapCfg) -> Polygon {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = radius * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            Point::new(center.x() + r * th.cos(), center.y() + r * th.sin())
        })
        .collect();
    Polygon::from_vertices(convex_hull(&pts))
}

/// Draws a map according to `cfg`.
///
/// Fails with `Parameter` when the largest obstacle cannot fit inside the map.
pub fn random_map(cfg: &MapCfg, tok: ReplayToken) -> Result<GeometricMap, CspaceError> {
    let rmax = cfg.radius_max.max(cfg.radius_min);
    let rmin = cfg.radius_min.min(rmax);
    if !(cfg.extent.is_finite() && rmin > 0.0) {
        return Err(CspaceError::parameter("map extent and obstacle radii must be finite and > 0"));
    }
    // Worst-case reach of a jittered vertex.
    let reach = rmax * (1.0 + cfg.radial_jitter.clamp(0.0, 0.9));
    if 2.0 * reach >= cfg.extent {
        return Err(CspaceError::parameter(format!(
            "obstacles of reach {reach} do not fit in a map of side {}",
            cfg.extent
        )));
    }
    let mut rng = tok.to_std_rng();
    let mut map = GeometricMap::new();
    map.extend_bounds(Point::new(0.0, 0.0));
    map.extend_bounds(Point::new(cfg.extent, cfg.extent));
    for _ in 0..cfg.obstacles {
        let center = Point::new(
            rng.gen_range(reach..cfg.extent - reach),
            rng.gen_range(reach..cfg.extent - reach),
        );
        let radius = if rmax > rmin { rng.gen_range(rmin..rmax) } else { rmin };
        map.add_obstacle(draw_obstacle_radial(&mut rng, center, radius, cfg));
    }
    for _ in 0..cfg.walls {
        let mut draw = || Point::new(rng.gen_range(0.0..cfg.extent), rng.gen_range(0.0..cfg.extent));
        let (a, b) = (draw(), draw());
        map.add_wall(Segment::new(a, b));
    }
    tracing::trace!(?tok, obstacles = cfg.obstacles, walls = cfg.walls, "random map drawn");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Orientation;

    #[test]
    fn replay_token_is_deterministic() {
        let cfg = MapCfg::default();
        let tok = ReplayToken { seed: 7, index: 3 };
        let a = random_map(&cfg, tok).unwrap();
        let b = random_map(&cfg, tok).unwrap();
        assert_eq!(a.obstacles(), b.obstacles());
        assert_eq!(a.walls(), b.walls());
        let c = random_map(&cfg, ReplayToken { seed: 7, index: 4 }).unwrap();
        assert_ne!(a.obstacles(), c.obstacles());
    }

    #[test]
    fn shapes_stay_inside_the_square() {
        let cfg = MapCfg {
            obstacles: 10,
            walls: 5,
            ..MapCfg::default()
        };
        for index in 0..5 {
            let map = random_map(&cfg, ReplayToken { seed: 1, index }).unwrap();
            let r = map.bounds().unwrap();
            assert_eq!(r.min, Point::new(0.0, 0.0));
            assert_eq!(r.max, Point::new(cfg.extent, cfg.extent));
            assert_eq!(map.obstacles().len(), 10);
            assert_eq!(map.walls().len(), 5);
            for o in map.obstacles() {
                assert!(o.len() >= 3);
                assert_eq!(o.orientation(), Orientation::CounterClockwise);
            }
        }
    }

    #[test]
    fn oversized_obstacles_are_rejected() {
        let cfg = MapCfg {
            extent: 3.0,
            radius_max: 2.0,
            ..MapCfg::default()
        };
        assert!(matches!(
            random_map(&cfg, ReplayToken { seed: 0, index: 0 }),
            Err(CspaceError::Parameter { .. })
        ));
    }
}
