//! Core types for the unit graph library
//!
//! This module defines the parsed model of a job directory: one [`JobUnit`] per
//! job file, each owning the condition trees parsed out of its `start on` and
//! `stop on` stanzas and the events it declares with `emits`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for unit graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while loading job files or configuring the graph
///
/// Grammar mismatches are never errors: a condition that cannot be parsed is
/// kept as far as it got.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}

/// State transition a dependency term waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionState {
    Starting,
    Started,
    Stopping,
    Stopped,
}

impl TransitionState {
    /// Keyword as written in a job file
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionState::Starting => "starting",
            TransitionState::Started => "started",
            TransitionState::Stopping => "stopping",
            TransitionState::Stopped => "stopped",
        }
    }

    /// Parse a keyword; anything other than the four transition words is `None`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "starting" => Some(TransitionState::Starting),
            "started" => Some(TransitionState::Started),
            "stopping" => Some(TransitionState::Stopping),
            "stopped" => Some(TransitionState::Stopped),
            _ => None,
        }
    }
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a parsed condition tree
///
/// For the leaf variants `from` is the edge source and `name` the edge
/// destination, so a condition edge always points into the job that waits
/// and an emission edge always points out of the job that emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Children of one parenthesized sub-expression, in encounter order.
    /// Whether they were joined by `and` or `or` is not recorded.
    Group(Vec<Term>),

    /// A bare event the owning job waits on
    EventRef {
        /// Event name
        from: String,
        /// Owning job
        name: String,
        /// Trailing qualifier tokens (e.g. `IFACE!=lo`)
        qualifiers: Vec<String>,
    },

    /// A state transition of another job
    Dependency {
        /// Job whose transition is awaited
        from: String,
        /// Owning job
        name: String,
        state: TransitionState,
        qualifiers: Vec<String>,
    },

    /// An event the owning job declares it emits
    Emission {
        /// Owning job
        from: String,
        /// Emitted event
        name: String,
    },
}

impl Term {
    /// Qualifier tokens of a leaf; empty for groups and emissions
    pub fn qualifiers(&self) -> &[String] {
        match self {
            Term::EventRef { qualifiers, .. } | Term::Dependency { qualifiers, .. } => qualifiers,
            Term::Group(_) | Term::Emission { .. } => &[],
        }
    }

    /// Number of leaves below (and including) this term
    pub fn leaf_count(&self) -> usize {
        match self {
            Term::Group(children) => children.iter().map(Term::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// A parsed job file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUnit {
    /// Job name (file name without extension)
    pub name: String,
    /// Top-level terms of the `start on` condition
    pub start_on: Vec<Term>,
    /// Top-level terms of the `stop on` condition
    pub stop_on: Vec<Term>,
    /// One `Term::Emission` per `emits` line
    pub emits: Vec<Term>,
}

impl JobUnit {
    /// A job with no conditions and no emissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_on: Vec::new(),
            stop_on: Vec::new(),
            emits: Vec::new(),
        }
    }
}
