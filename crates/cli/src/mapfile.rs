//! Map text format loader.
//!
//! One command per line, two-letter prefix:
//! - `CO ...` comment
//! - `WA (x,y) (x,y)` wall, `DO (x,y) (x,y)` door
//! - `OB (x,y) (x,y) (x,y) ...` obstacle, at least three vertices
//! - `NI (x,y)` mission begin, `NF (x,y)` mission end (at most one each)
//!
//! Blank lines are skipped. Every parsed point extends the map bounds.

use anyhow::{anyhow, bail, Context, Result};
use cspace::geom::{Point, Polygon, Segment};
use cspace::map::GeometricMap;
use std::fs;
use std::path::Path;

pub fn load_map<P: AsRef<Path>>(path: P) -> Result<GeometricMap> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?;
    parse_map(&text).with_context(|| format!("parsing map {}", path.display()))
}

pub fn parse_map(text: &str) -> Result<GeometricMap> {
    let mut map = GeometricMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.get(..2) {
            Some(c) => (c, &line[2..]),
            None => (line, ""),
        };
        match command {
            "CO" => {}
            "WA" | "DO" => {
                let [a, b] = points::<2>(rest, line_no)?;
                let s = Segment::new(a, b);
                if command == "WA" {
                    map.add_wall(s);
                } else {
                    map.add_door(s);
                }
            }
            "OB" => {
                let pts = parse_points(rest, line_no)?;
                if pts.len() < 3 {
                    bail!("line {line_no}: obstacle needs at least 3 vertices, got {}", pts.len());
                }
                map.add_obstacle(Polygon::from_vertices(pts));
            }
            "NI" => {
                let [p] = points::<1>(rest, line_no)?;
                if map.mission_begin().is_some() {
                    bail!("line {line_no}: mission begin already set");
                }
                map.set_mission_begin(p);
            }
            "NF" => {
                let [p] = points::<1>(rest, line_no)?;
                if map.mission_end().is_some() {
                    bail!("line {line_no}: mission end already set");
                }
                map.set_mission_end(p);
            }
            other => bail!("line {line_no}: unknown command {other:?}"),
        }
    }
    tracing::debug!(
        walls = map.walls().len(),
        doors = map.doors().len(),
        obstacles = map.obstacles().len(),
        "map parsed"
    );
    Ok(map)
}

fn points<const N: usize>(rest: &str, line_no: usize) -> Result<[Point; N]> {
    let pts = parse_points(rest, line_no)?;
    let got = pts.len();
    pts.try_into()
        .map_err(|_| anyhow!("line {line_no}: expected {N} point(s), got {got}"))
}

/// Every `(x,y)` group in `rest`, in order.
fn parse_points(rest: &str, line_no: usize) -> Result<Vec<Point>> {
    let mut out = Vec::new();
    let mut tail = rest;
    while let Some(open) = tail.find('(') {
        let close = tail[open..]
            .find(')')
            .map(|c| open + c)
            .ok_or_else(|| anyhow!("line {line_no}: unclosed '('"))?;
        out.push(parse_point(&tail[open + 1..close]).with_context(|| format!("line {line_no}"))?);
        tail = &tail[close + 1..];
    }
    Ok(out)
}

/// `x,y` without the parentheses. Also used for `--begin`/`--end`.
pub fn parse_point(body: &str) -> Result<Point> {
    let (x, y) = body
        .split_once(',')
        .ok_or_else(|| anyhow!("expected x,y in {body:?}"))?;
    let coord = |s: &str| -> Result<f64> {
        let v: f64 = s
            .trim()
            .parse()
            .with_context(|| format!("bad coordinate {s:?}"))?;
        if !v.is_finite() {
            bail!("coordinate {s:?} is not finite");
        }
        Ok(v)
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
