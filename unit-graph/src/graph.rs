//! Graph assembly
//!
//! Flattens parsed jobs into the ordered record lists of the two graphs. A
//! record is one line of the rendered output: either a job node or an edge.

use crate::types::{JobUnit, Term};
use std::fmt;

/// One line of a rendered graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphRecord {
    /// Box node for a job
    Process { name: String },
    /// Directed edge with an optional label
    Edge {
        from: String,
        to: String,
        label: Option<String>,
    },
}

impl GraphRecord {
    pub fn is_edge(&self) -> bool {
        matches!(self, GraphRecord::Edge { .. })
    }
}

impl fmt::Display for GraphRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphRecord::Process { name } => write!(f, " \"{}\" [shape = box];", name),
            GraphRecord::Edge {
                from,
                to,
                label: None,
            } => write!(f, " \"{}\" -> \"{}\";", from, to),
            GraphRecord::Edge {
                from,
                to,
                label: Some(label),
            } => write!(f, " \"{}\" -> \"{}\" [label = \"{}\"];", from, to, label),
        }
    }
}

/// Append the edges of `term` to `records` in pre-order. Groups contribute
/// only their children.
pub fn flatten_term(term: &Term, records: &mut Vec<GraphRecord>) {
    match term {
        Term::Group(children) => {
            for child in children {
                flatten_term(child, records);
            }
        }
        Term::EventRef {
            from,
            name,
            qualifiers,
        } => records.push(GraphRecord::Edge {
            from: from.clone(),
            to: name.clone(),
            label: (!qualifiers.is_empty()).then(|| qualifiers.join(" ")),
        }),
        Term::Dependency {
            from,
            name,
            state,
            qualifiers,
        } => {
            let label = if qualifiers.is_empty() {
                state.to_string()
            } else {
                format!("{} {}", state, qualifiers.join(" "))
            };
            records.push(GraphRecord::Edge {
                from: from.clone(),
                to: name.clone(),
                label: Some(label),
            });
        }
        Term::Emission { from, name } => records.push(GraphRecord::Edge {
            from: from.clone(),
            to: name.clone(),
            label: Some("emit".to_string()),
        }),
    }
}

fn flatten_terms(terms: &[Term], records: &mut Vec<GraphRecord>) {
    for term in terms {
        flatten_term(term, records);
    }
}

/// Records of the start graph: per job, its node, its `start on` edges and
/// its emissions
pub fn start_records(units: &[JobUnit]) -> Vec<GraphRecord> {
    let mut records = Vec::new();
    for unit in units {
        records.push(GraphRecord::Process {
            name: unit.name.clone(),
        });
        flatten_terms(&unit.start_on, &mut records);
        flatten_terms(&unit.emits, &mut records);
    }
    records
}

/// Records of the stop graph: per job, its node and its `stop on` edges
pub fn stop_records(units: &[JobUnit]) -> Vec<GraphRecord> {
    let mut records = Vec::new();
    for unit in units {
        records.push(GraphRecord::Process {
            name: unit.name.clone(),
        });
        flatten_terms(&unit.stop_on, &mut records);
    }
    records
}

/// Statistics about an assembled graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub units: usize,
    pub start_edges: usize,
    pub stop_edges: usize,
    pub emissions: usize,
}

impl GraphStats {
    pub fn collect(units: &[JobUnit]) -> Self {
        let emissions = units.iter().map(|u| u.emits.len()).sum();
        Self {
            units: units.len(),
            start_edges: units
                .iter()
                .map(|u| leaf_count(&u.start_on))
                .sum::<usize>()
                + emissions,
            stop_edges: units.iter().map(|u| leaf_count(&u.stop_on)).sum(),
            emissions,
        }
    }
}

fn leaf_count(terms: &[Term]) -> usize {
    terms.iter().map(Term::leaf_count).sum()
}
