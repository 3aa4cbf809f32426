use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cspace::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod mapfile;
mod provenance;

#[derive(Parser)]
#[command(name = "cspace")]
#[command(about = "Configuration-space builder and path planner for a disk robot")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a configuration-space graph; optionally solve the mission path
    Build(Job),
    /// Print a JSON summary of a map file
    Info {
        #[arg(long)]
        map: PathBuf,
    },
}

#[derive(Args)]
struct Job {
    /// Map file in the CO/WA/DO/OB/NI/NF text format
    #[arg(long)]
    map: PathBuf,
    #[arg(long, value_enum, default_value_t = AlgoArg::Visibility)]
    algo: AlgoArg,
    #[arg(long, default_value_t = 0.5)]
    radius: f64,
    /// Grid spacing (discretization only)
    #[arg(long)]
    step: Option<f64>,
    /// Candidate-vertex margin (visibility graph only)
    #[arg(long, default_value_t = 0.01)]
    margin: f64,
    /// Sides of the polygon approximating the robot disk
    #[arg(long, default_value_t = 16)]
    arc_segments: usize,
    /// Graph output in the persisted graph format
    #[arg(long)]
    out: PathBuf,
    /// Path output; requires a begin and an end
    #[arg(long)]
    path: Option<PathBuf>,
    /// Mission begin as `x,y`; defaults to the map's NI line
    #[arg(long)]
    begin: Option<String>,
    /// Mission end as `x,y`; defaults to the map's NF line
    #[arg(long)]
    end: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgoArg {
    Discretization,
    SquareCells,
    QuadTree,
    Visibility,
}

impl From<AlgoArg> for Algorithm {
    fn from(a: AlgoArg) -> Self {
        match a {
            AlgoArg::Discretization => Algorithm::Discretization,
            AlgoArg::SquareCells => Algorithm::SquareCells,
            AlgoArg::QuadTree => Algorithm::QuadTree,
            AlgoArg::Visibility => Algorithm::VisibilityGraph,
        }
    }
}

#[derive(Serialize)]
struct MapInfo {
    walls: usize,
    doors: usize,
    obstacles: usize,
    bounds: Option<[[f64; 2]; 2]>,
    mission_begin: Option<[f64; 2]>,
    mission_end: Option<[f64; 2]>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build(job) => build(job),
        Action::Info { map } => info(&map),
    }
}

fn build(job: Job) -> Result<()> {
    let algo = Algorithm::from(job.algo);
    tracing::info!(algo = algo.name(), map = %job.map.display(), radius = job.radius, "build");
    let map = mapfile::load_map(&job.map)?;
    let begin = endpoint(job.begin.as_deref(), map.mission_begin(), "begin")?;
    let end = endpoint(job.end.as_deref(), map.mission_end(), "end")?;
    let ws = Workspace::with_buffer_cfg(
        map,
        BufferCfg {
            arc_segments: job.arc_segments,
        },
    );
    let params = BuildParams {
        radius: job.radius,
        step: job.step,
        visibility: VisibilityCfg { margin: job.margin },
    };
    let mut graph = algo
        .build(&ws, params)
        .with_context(|| format!("{algo} on {}", job.map.display()))?;

    let placement = algo.endpoint_placement();
    if let Some(p) = begin {
        graph.set_begin(p, placement, job.radius, &ws);
    }
    if let Some(p) = end {
        graph.set_end(p, placement, job.radius, &ws);
    }

    let run_params = serde_json::json!({
        "map": job.map.to_string_lossy(),
        "radius": job.radius,
        "step": job.step,
        "margin": job.margin,
        "arc_segments": job.arc_segments,
        "begin": begin.map(|p| [p.x(), p.y()]),
        "end": end.map(|p| [p.x(), p.y()]),
    });

    create_parent(&job.out)?;
    let file = File::create(&job.out).with_context(|| format!("creating {}", job.out.display()))?;
    graph
        .save(BufWriter::new(file))
        .with_context(|| format!("writing graph {}", job.out.display()))?;
    provenance::write_sidecar(
        &job.out,
        provenance::Payload::new(run_params.clone()).with_algorithm(algo.name()),
    )?;
    tracing::info!(
        nodes = graph.num_nodes(),
        available = graph.available_nodes(),
        arcs = graph.num_arcs(),
        out = %job.out.display(),
        "graph written"
    );

    if let Some(path_out) = &job.path {
        if begin.is_none() || end.is_none() {
            bail!("--path needs a mission begin and end (NI/NF lines or --begin/--end)");
        }
        let path = MinPathBuilder::new(&graph).build().context("solving mission path")?;
        create_parent(path_out)?;
        let file = File::create(path_out).with_context(|| format!("creating {}", path_out.display()))?;
        path.save(BufWriter::new(file))
            .with_context(|| format!("writing path {}", path_out.display()))?;
        provenance::write_sidecar(
            path_out,
            provenance::Payload::new(run_params).with_algorithm(algo.name()),
        )?;
        tracing::info!(waypoints = path.len(), length = path.length(), out = %path_out.display(), "path written");
    }
    Ok(())
}

fn info(map_path: &Path) -> Result<()> {
    let map = mapfile::load_map(map_path)?;
    let xy = |p: Point| [p.x(), p.y()];
    let report = MapInfo {
        walls: map.walls().len(),
        doors: map.doors().len(),
        obstacles: map.obstacles().len(),
        bounds: map.bounds().map(|r| [xy(r.min), xy(r.max)]),
        mission_begin: map.mission_begin().map(xy),
        mission_end: map.mission_end().map(xy),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Explicit `x,y` flag, else the map's hint.
fn endpoint(flag: Option<&str>, hint: Option<Point>, role: &str) -> Result<Option<Point>> {
    match flag {
        Some(s) => mapfile::parse_point(s)
            .map(Some)
            .with_context(|| format!("parsing --{role}")),
        None => Ok(hint),
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
