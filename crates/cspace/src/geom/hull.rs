use super::point::{orientation, Point, Side};

/// Andrew's monotone chain convex hull.
///
/// Returns the hull in counter-clockwise order without repeating the first
/// vertex; collinear points are dropped. Fewer than 3 distinct inputs come back
/// sorted and deduplicated.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| {
        match a.x().partial_cmp(&b.x()).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y().partial_cmp(&b.y()).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| a.distance_with(b) < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && !turns_left(lower[lower.len() - 2], lower[lower.len() - 1], *p) {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && !turns_left(upper[upper.len() - 2], upper[upper.len() - 1], *p) {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

#[inline]
fn turns_left(a: Point, b: Point, c: Point) -> bool {
    orientation(a, b, c) == Side::Left
}
