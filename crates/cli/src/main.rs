use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use maxmatch::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "maxmatch-cli")]
#[command(about = "Enumerate all maximum matchings of a bipartite graph")]
#[command(version = maxmatch::VERSION)]
struct Cmd {
    /// Log at DEBUG instead of INFO (stderr)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate every maximum matching of the input graph
    Enumerate(EnumerateArgs),
    /// Write a seeded random bipartite graph in the input format
    Generate {
        /// Vertices per side
        #[arg(long, default_value_t = 6)]
        n: usize,
        #[arg(long, default_value_t = 0.5)]
        edge_prob: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the strongly connected components of the implication digraph
    Scc {
        /// Graph file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct EnumerateArgs {
    /// Graph file; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Stop after this many matchings
    #[arg(long)]
    max_results: Option<usize>,
    /// Stop after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Write results here instead of stdout, plus a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Format {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.debug { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    match cmd.action {
        Action::Enumerate(args) => enumerate_cmd(&args),
        Action::Generate {
            n,
            edge_prob,
            seed,
            index,
            out,
        } => generate_cmd(n, edge_prob, seed, index, out.as_deref()),
        Action::Scc { input } => scc_cmd(input.as_deref()),
    }
}

fn enumerate_cmd(args: &EnumerateArgs) -> Result<()> {
    let g = load_graph(args.input.as_deref())?;
    tracing::info!(
        n = g.side_size(),
        edges = g.edge_count(),
        format = ?args.format,
        "enumerate"
    );
    if tracing::enabled!(Level::DEBUG) {
        let d = build_digraph(&g, &initial_matching(&g));
        let scc = Scc::kosaraju(&d);
        tracing::debug!(components = scc.count(), arcs = d.arc_count(), "implication digraph");
    }
    let cfg = EnumCfg {
        max_results: args.max_results,
        time_budget: args.time_budget_ms.map(Duration::from_millis),
    };

    let mut out = open_output(args.out.as_deref())?;
    let report = match args.format {
        Format::Text => write_text(&g, cfg, &mut out)?,
        Format::Json => write_json(&g, cfg, &mut out)?,
    };
    out.flush().context("flushing output")?;
    drop(out);

    tracing::info!(
        cardinality = report.cardinality,
        count = report.emitted,
        complete = report.complete,
        nodes = report.stats.nodes,
        "done"
    );
    if !report.complete {
        tracing::warn!(count = report.emitted, "enumeration stopped early; results are partial");
    }

    if let Some(path) = args.out.as_deref() {
        let payload = Payload::new(
            "enumerate",
            json!({
                "input": args.input.as_ref().map(|p| p.to_string_lossy()),
                "max_results": args.max_results,
                "time_budget_ms": args.time_budget_ms,
                "format": args.format,
                "n": g.side_size(),
                "edges": g.edge_count(),
                "cardinality": report.cardinality,
                "count": report.emitted,
                "complete": report.complete
            }),
        );
        let prov = write_sidecar(path, payload)?;
        tracing::info!(path = %prov.display(), "provenance");
    }
    Ok(())
}

/// Stream `#<i> <matching>` lines as matchings are found.
fn write_text<W: Write>(g: &BipartiteGraph, cfg: EnumCfg, out: &mut W) -> Result<EnumReport> {
    let mut written = 0usize;
    let mut failure = None;
    let report = {
        let mut sink = |m: &Matching| {
            written += 1;
            match writeln!(out, "#{written} {m}") {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    failure = Some(e);
                    ControlFlow::Break(())
                }
            }
        };
        enumerate(g, cfg, &mut sink)
    };
    if let Some(e) = failure {
        return Err(e).context("writing matchings");
    }
    Ok(report)
}

#[derive(Serialize)]
struct StatsDoc {
    nodes: usize,
    cycle_branches: usize,
    alt_branches: usize,
    exhausted: usize,
    max_depth: usize,
}

impl From<EnumStats> for StatsDoc {
    fn from(s: EnumStats) -> Self {
        Self {
            nodes: s.nodes,
            cycle_branches: s.cycle_branches,
            alt_branches: s.alt_branches,
            exhausted: s.exhausted,
            max_depth: s.max_depth,
        }
    }
}

#[derive(Serialize)]
struct EnumerationDoc {
    n: usize,
    edges: Vec<Edge>,
    cardinality: usize,
    count: usize,
    complete: bool,
    stats: StatsDoc,
    matchings: Vec<Vec<Edge>>,
}

/// Collect everything, then write a single JSON document.
fn write_json<W: Write>(g: &BipartiteGraph, cfg: EnumCfg, out: &mut W) -> Result<EnumReport> {
    let mut all = ResultSet::new();
    let report = enumerate(g, cfg, &mut all);
    let doc = EnumerationDoc {
        n: g.side_size(),
        edges: g.edges().collect(),
        cardinality: report.cardinality,
        count: report.emitted,
        complete: report.complete,
        stats: report.stats.into(),
        matchings: all.iter().map(|m| m.edges().collect()).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc).context("serializing results")?;
    writeln!(out)?;
    Ok(report)
}

fn generate_cmd(n: usize, edge_prob: f64, seed: u64, index: u64, out: Option<&Path>) -> Result<()> {
    tracing::info!(n, edge_prob, seed, index, "generate");
    let g = draw_bipartite(
        RandomGraphCfg { side: n, edge_prob },
        ReplayToken { seed, index },
    );
    let text = write_graph(&g);
    match out {
        Some(path) => {
            create_parent(path)?;
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            let payload = Payload::new(
                "generate",
                json!({
                    "n": n,
                    "edge_prob": edge_prob,
                    "seed": seed,
                    "index": index,
                    "edges": g.edge_count()
                }),
            );
            write_sidecar(path, payload)?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn scc_cmd(input: Option<&Path>) -> Result<()> {
    let g = load_graph(input)?;
    let m = initial_matching(&g);
    let d = build_digraph(&g, &m);
    let scc = Scc::kosaraju(&d);
    tracing::info!(cardinality = m.len(), components = scc.count(), "scc");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "matching {m}")?;
    writeln!(out, "{} components", scc.count())?;
    for (id, comp) in scc.components().iter().enumerate() {
        let verts: Vec<String> = comp.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{id}: {}", verts.join(" "))?;
    }
    Ok(())
}

fn load_graph(input: Option<&Path>) -> Result<BipartiteGraph> {
    let (label, text) = match input {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            ("<stdin>".to_string(), buf)
        }
    };
    parse_graph(&text).with_context(|| format!("parsing {label}"))
}

fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match out {
        Some(path) => {
            create_parent(path)?;
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}
