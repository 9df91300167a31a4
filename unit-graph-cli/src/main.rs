//! Upstart Job Graph CLI
//!
//! Command-line front end for the unit-graph library. Reads every job file in
//! a directory (default `/etc/init`) and prints the start graph and the stop
//! graph as Graphviz documents, ready to pipe into `dot`.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use unit_graph::{LogTrace, UnitGraph};

mod config;

/// Upstart Job Graph - Draw job dependencies as Graphviz digraphs
#[derive(Parser, Debug)]
#[command(name = "unit-graph")]
#[command(about = "Render upstart job start/stop dependencies as Graphviz digraphs", long_about = None)]
#[command(version)]
struct Args {
    /// Directory containing job files [default: /etc/init]
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file for the graphs (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log job and edge counts
    #[arg(long)]
    stats: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Upstart Job Graph CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using unit-graph library v{}", unit_graph::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let dir = app_config.job_dir(args.dir.as_deref());
    let mut graph = UnitGraph::with_config(app_config.graph_config())?;
    if args.verbose >= 2 {
        graph = graph.with_trace(LogTrace);
    }

    log::debug!(
        "Reading *.{} files as graph {:?}",
        graph.config().normalized_extension(),
        graph.config().graph_name
    );
    graph
        .add_dir(&dir)
        .with_context(|| format!("Failed to load jobs from {:?}", dir))?;

    let stats = graph.stats();
    if args.stats {
        log::info!("Jobs:        {}", stats.units);
        log::info!("Start edges: {}", stats.start_edges);
        log::info!("Stop edges:  {}", stats.stop_edges);
        log::info!("Emissions:   {}", stats.emissions);
    }

    match args.output.as_ref().or(app_config.output.file.as_ref()) {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut out = BufWriter::new(file);
            graph.render(&mut out)?;
            out.flush()?;
            log::info!("Graphs written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            graph.render(&mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
