//! Persisted graph format.
//!
//! ```text
//! N
//! x y level_length_rel      (N lines, available nodes in insertion order)
//! M
//! src tgt                   (M lines, 0-based indices into the node list)
//! ```

use std::io::{BufRead, Write};

use super::{EnvNode, EnvironmentGraph, NodeId};
use crate::error::CspaceError;
use crate::geom::Point;

impl EnvironmentGraph {
    /// Writes available nodes (renumbered from 0) and the arcs joining two of them.
    pub fn save<W: Write>(&self, mut w: W) -> Result<(), CspaceError> {
        let mut renumber: Vec<Option<usize>> = vec![None; self.node_bound()];
        let mut count = 0usize;
        for (id, n) in self.nodes() {
            if n.available {
                renumber[id.0] = Some(count);
                count += 1;
            }
        }
        writeln!(w, "{count}")?;
        for (_, n) in self.nodes().filter(|(_, n)| n.available) {
            writeln!(
                w,
                "{} {} {}",
                n.position.x(),
                n.position.y(),
                n.level_length_rel
            )?;
        }
        let kept: Vec<(usize, usize)> = self
            .arcs()
            .filter_map(|(_, a)| Some((renumber[a.src.0]?, renumber[a.tgt.0]?)))
            .collect();
        writeln!(w, "{}", kept.len())?;
        for (s, t) in kept {
            writeln!(w, "{s} {t}")?;
        }
        w.flush()?;
        Ok(())
    }

    /// Reads the persisted format back; every node comes back available.
    pub fn load<R: BufRead>(r: R) -> Result<Self, CspaceError> {
        let mut lines = Lines::new(r);
        let n = lines.count()?;
        let mut graph = EnvironmentGraph::new();
        for _ in 0..n {
            let (no, fields) = lines.fields(3)?;
            let x = parse_f64(no, fields[0])?;
            let y = parse_f64(no, fields[1])?;
            let level = parse_f64(no, fields[2])?;
            graph.insert_node_with(EnvNode {
                position: Point::new(x, y),
                available: true,
                level_length_rel: level,
            });
        }
        let m = lines.count()?;
        for _ in 0..m {
            let (no, fields) = lines.fields(2)?;
            let s = parse_index(no, fields[0], n)?;
            let t = parse_index(no, fields[1], n)?;
            if graph.insert_arc(NodeId(s), NodeId(t)).is_none() {
                return Err(CspaceError::format(no, format!("self-loop on node {s}")));
            }
        }
        Ok(graph)
    }
}

struct Lines<R> {
    inner: std::io::Lines<R>,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> Lines<R> {
    fn new(r: R) -> Self {
        Self {
            inner: r.lines(),
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Next non-blank line with its 1-based number.
    fn next_line(&mut self) -> Result<usize, CspaceError> {
        loop {
            let Some(line) = self.inner.next() else {
                return Err(CspaceError::format(self.line_no + 1, "unexpected end of input"));
            };
            self.line_no += 1;
            self.buf = line?;
            if !self.buf.trim().is_empty() {
                return Ok(self.line_no);
            }
        }
    }

    fn count(&mut self) -> Result<usize, CspaceError> {
        let no = self.next_line()?;
        self.buf
            .trim()
            .parse::<usize>()
            .map_err(|e| CspaceError::format(no, format!("bad count {:?}: {e}", self.buf.trim())))
    }

    fn fields(&mut self, want: usize) -> Result<(usize, Vec<&str>), CspaceError> {
        let no = self.next_line()?;
        let fields: Vec<&str> = self.buf.split_whitespace().collect();
        if fields.len() != want {
            return Err(CspaceError::format(
                no,
                format!("expected {want} fields, found {}", fields.len()),
            ));
        }
        Ok((no, fields))
    }
}

fn parse_f64(line: usize, s: &str) -> Result<f64, CspaceError> {
    s.parse::<f64>()
        .map_err(|e| CspaceError::format(line, format!("bad number {s:?}: {e}")))
}

fn parse_index(line: usize, s: &str, n: usize) -> Result<usize, CspaceError> {
    let i = s
        .parse::<usize>()
        .map_err(|e| CspaceError::format(line, format!("bad index {s:?}: {e}")))?;
    if i >= n {
        return Err(CspaceError::format(
            line,
            format!("node index {i} out of range (0..{n})"),
        ));
    }
    Ok(i)
}
