//! Upstart Job Graph Library
//!
//! Reads upstart job files and extracts how jobs depend on each other through
//! their `start on` / `stop on` conditions and `emits` declarations, then
//! renders the result as two Graphviz documents (a start graph and a stop
//! graph).
//!
//! # Architecture
//!
//! - [`scanner`]: cursor with anchored matching and backtracking
//! - [`condition`]: recursive-descent parser for condition expressions
//! - [`unit`]: finds the stanzas of one job file and parses them
//! - [`graph`]: flattens parsed jobs into graph records
//! - [`render`]: writes the `digraph` documents
//! - [`loader`]: lists and reads a job directory
//!
//! The library does NOT:
//! - Interpret any other job stanza (scripts, env, exec, respawn...)
//! - Decide whether a condition is satisfiable
//! - Deduplicate edges
//!
//! # Example Usage
//!
//! ```no_run
//! use unit_graph::{GraphConfig, UnitGraph};
//! use std::path::Path;
//!
//! let config = GraphConfig::new().with_parallel(true);
//! let mut graph = UnitGraph::with_config(config).unwrap();
//! graph.add_dir(Path::new("/etc/init")).unwrap();
//!
//! let stdout = std::io::stdout();
//! graph.render(&mut stdout.lock()).unwrap();
//! ```

// Public modules
pub mod condition;
pub mod config;
pub mod graph;
pub mod loader;
pub mod render;
pub mod scanner;
pub mod types;
pub mod unit;
pub mod unit_graph;

// Re-export main types for convenience
pub use condition::{parse_condition_str, LogTrace, NoTrace, TraceSink};
pub use config::GraphConfig;
pub use graph::{GraphRecord, GraphStats};
pub use loader::JobSource;
pub use types::{GraphError, JobUnit, Result, Term, TransitionState};
pub use unit_graph::UnitGraph;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
