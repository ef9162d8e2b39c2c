//! Command-line interface.
//!
//! `productpath [--config FILE] [--verbose] <init|import|search|stats>`.
//! Flags override the layered config; commands write to any `io::Write` so
//! they can be exercised without a terminal.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::config::{OutputFormat, ProductPathConfig};
use crate::error::{ProductPathError, Result};
use crate::graph::document::GraphDocument;
use crate::graph::store::GraphStore;
use crate::procedure::{self, ProcedureOutput, PROCEDURE_NAME};
use crate::search::WeightExtractor;
use crate::types::StoredEdge;

// ---------------------------------------------------------------------------
// Argument definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(
    name = "productpath",
    version,
    about = "Maximum product-weight paths from a start vertex"
)]
pub struct Cli {
    /// YAML config file (default: ./productpath.yaml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty graph database.
    Init {
        #[arg(long)]
        db: Option<String>,
    },
    /// Load a JSON graph document into the database.
    Import {
        file: PathBuf,
        #[arg(long)]
        db: Option<String>,
    },
    /// Run the maximum product-weight path search.
    Search(SearchArgs),
    /// Print vertex and edge counts.
    Stats {
        #[arg(long)]
        db: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Id of the start vertex.
    pub start: String,

    #[arg(long)]
    pub db: Option<String>,

    /// Maximum path length in edges; negative yields nothing.
    #[arg(long, allow_hyphen_values = true)]
    pub max_depth: Option<i64>,

    /// Minimum cumulative weight.
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Edge property holding the weight.
    #[arg(long)]
    pub weight_property: Option<String>,

    /// `table` or `json`.
    #[arg(long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

fn parse_format(raw: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_str_loose(raw).ok_or_else(|| format!("unknown format '{raw}', expected table or json"))
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run `command` against `config`, writing human or JSON output to `out`.
pub fn execute<W: Write>(command: &Command, config: &ProductPathConfig, out: &mut W) -> Result<()> {
    match command {
        Command::Init { db } => {
            let path = db.as_deref().unwrap_or(&config.store.path);
            GraphStore::new(path)?;
            writeln!(out, "initialized {path}")?;
        }
        Command::Import { file, db } => {
            let path = db.as_deref().unwrap_or(&config.store.path);
            let doc = GraphDocument::from_path(file)?;
            let store = GraphStore::new(path)?;
            let summary = store.import_document(&doc)?;
            writeln!(
                out,
                "imported {} vertices and {} edges into {path}",
                summary.vertices, summary.edges
            )?;
        }
        Command::Search(args) => run_search(args, config, out)?,
        Command::Stats { db } => {
            let store = open_existing(db.as_deref().unwrap_or(&config.store.path))?;
            let stats = store.get_stats()?;
            writeln!(out, "vertices: {}", stats.vertices)?;
            writeln!(out, "edges:    {}", stats.edges)?;
        }
    }
    Ok(())
}

fn open_existing(path: &str) -> Result<GraphStore> {
    if path != ":memory:" && !Path::new(path).exists() {
        return Err(ProductPathError::InvalidArgument(format!(
            "database not found: {path} (run `productpath init` or `import` first)"
        )));
    }
    GraphStore::new(path)
}

fn run_search<W: Write>(args: &SearchArgs, config: &ProductPathConfig, out: &mut W) -> Result<()> {
    let store = open_existing(args.db.as_deref().unwrap_or(&config.store.path))?;
    if !store.contains_vertex(&args.start)? {
        return Err(ProductPathError::InvalidArgument(format!(
            "unknown start vertex '{}'",
            args.start
        )));
    }

    let max_depth = args.max_depth.unwrap_or(config.search.max_depth);
    let threshold = args.threshold.unwrap_or(config.search.threshold);
    let property = args
        .weight_property
        .clone()
        .unwrap_or_else(|| config.search.weight_property.clone());
    let format = args.format.unwrap_or(config.output.format);

    tracing::info!(
        procedure = PROCEDURE_NAME,
        start = %args.start,
        max_depth,
        threshold,
        property = %property,
        "running search"
    );
    let started = Instant::now();
    let output = procedure::run(
        &store,
        args.start.clone(),
        max_depth,
        threshold,
        &WeightExtractor::new(property),
    )?;
    tracing::info!(
        records = output.records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search complete"
    );

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
        OutputFormat::Table => render_table(&output, out)?,
    }
    Ok(())
}

/// Aligned columns: weight, path length, vertex sequence.
pub fn render_table<W: Write>(output: &ProcedureOutput<String, StoredEdge>, out: &mut W) -> Result<()> {
    if output.records.is_empty() {
        writeln!(out, "no vertices reached")?;
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        style(format!("{:>10}  {:>3}  {}", "weight", "len", "path")).bold()
    )?;
    for record in &output.records {
        writeln!(
            out,
            "{:>10.6}  {:>3}  {}",
            record.max,
            record.len(),
            record.vertices.join(" -> ")
        )?;
    }
    writeln!(
        out,
        "{}",
        style(format!(
            "{} vertices, {} branches evaluated, {} pruned",
            output.records.len(),
            output.stats.branches_evaluated,
            output.stats.branches_pruned
        ))
        .dim()
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
