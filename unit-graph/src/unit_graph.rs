//! Main library API
//!
//! [`UnitGraph`] is the entry point: feed it job files (one at a time or a whole
//! directory), then render the start and stop graphs.

use crate::condition::{NoTrace, TraceSink};
use crate::config::GraphConfig;
use crate::graph::{self, GraphRecord, GraphStats};
use crate::loader::{self, JobSource};
use crate::render;
use crate::types::{JobUnit, Result};
use crate::unit::parse_unit;
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::Path;

/// Collection of parsed jobs, in the order they were added
pub struct UnitGraph {
    config: GraphConfig,
    units: Vec<JobUnit>,
    trace: Box<dyn TraceSink>,
}

impl UnitGraph {
    /// Create an empty graph with the default configuration
    pub fn new() -> Self {
        Self {
            config: GraphConfig::default(),
            units: Vec::new(),
            trace: Box::new(NoTrace),
        }
    }

    /// Create an empty graph with a validated configuration
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Send parser tracing to `sink`
    pub fn with_trace(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace = Box::new(sink);
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Parse one job and append it
    ///
    /// # Example
    /// ```
    /// use unit_graph::UnitGraph;
    ///
    /// let mut graph = UnitGraph::new();
    /// graph.add_unit("dbus", "start on local-filesystems\nstop on deconfiguring-networking\n");
    /// assert_eq!(graph.stats().start_edges, 1);
    /// ```
    pub fn add_unit(&mut self, name: &str, text: &str) -> &JobUnit {
        let unit = parse_unit(name, text, self.trace.as_ref());
        self.units.push(unit);
        &self.units[self.units.len() - 1]
    }

    /// Parse already loaded job files and append them in the given order
    pub fn add_sources(&mut self, sources: &[JobSource]) {
        let trace = self.trace.as_ref();
        let parsed: Vec<JobUnit> = if self.config.parallel {
            log::debug!("Parsing {} jobs in parallel", sources.len());
            sources
                .par_iter()
                .map(|source| parse_source(source, trace))
                .collect()
        } else {
            sources
                .iter()
                .map(|source| parse_source(source, trace))
                .collect()
        };
        self.units.extend(parsed);
    }

    /// Load and parse every job file in `dir`
    ///
    /// Returns the number of jobs added. An unreadable directory or file is an
    /// error; an unparseable condition is not.
    pub fn add_dir(&mut self, dir: &Path) -> Result<usize> {
        log::info!("Loading jobs from {:?}", dir);
        let sources = loader::load_dir(dir, self.config.normalized_extension())?;
        self.add_sources(&sources);
        log::info!("Loaded {} jobs from {:?}", sources.len(), dir);
        Ok(sources.len())
    }

    pub fn units(&self) -> &[JobUnit] {
        &self.units
    }

    pub fn start_records(&self) -> Vec<GraphRecord> {
        graph::start_records(&self.units)
    }

    pub fn stop_records(&self) -> Vec<GraphRecord> {
        graph::stop_records(&self.units)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::collect(&self.units)
    }

    /// Write both graph documents
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        render::write_graphs(out, &self.start_records(), &self.stop_records(), &self.config)
    }

    /// Both graph documents as a string
    pub fn render_to_string(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn parse_source(source: &JobSource, trace: &dyn TraceSink) -> JobUnit {
    log::debug!("Parsing job {} from {:?}", source.name, source.path);
    parse_unit(&source.name, &source.text, trace)
}

impl Default for UnitGraph {
    fn default() -> Self {
        Self::new()
    }
}
