//! Graphviz output
//!
//! Writes the start graph and the stop graph as two consecutive `digraph`
//! documents. Names and qualifier tokens are restricted by the grammar to
//! characters that need no quoting, so values are written as-is.

use crate::config::GraphConfig;
use crate::graph::GraphRecord;
use std::io::{self, Write};

/// Which of the two documents is being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Start,
    Stop,
}

impl GraphKind {
    pub fn label(&self) -> &'static str {
        match self {
            GraphKind::Start => "start on",
            GraphKind::Stop => "stop on",
        }
    }
}

/// Write one `digraph` document
pub fn write_graph<W: Write>(
    out: &mut W,
    kind: GraphKind,
    records: &[GraphRecord],
    config: &GraphConfig,
) -> io::Result<()> {
    writeln!(out, "digraph {} {{", config.graph_name)?;
    writeln!(
        out,
        "    graph [label=\"{}\", rankdir = LR, fontsize = 30, fontcolor = red];",
        kind.label()
    )?;
    writeln!(out, "    node [shape = \"ellipse\"];")?;
    if kind == GraphKind::Start && config.startup_node {
        writeln!(out, "    startup;")?;
    }
    writeln!(out)?;

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", record)?;
    }

    write!(out, "\n\n}}\n")
}

/// Write the start graph, a blank line, then the stop graph
pub fn write_graphs<W: Write>(
    out: &mut W,
    start: &[GraphRecord],
    stop: &[GraphRecord],
    config: &GraphConfig,
) -> io::Result<()> {
    write_graph(out, GraphKind::Start, start, config)?;
    writeln!(out)?;
    write_graph(out, GraphKind::Stop, stop, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(start: &[GraphRecord], stop: &[GraphRecord], config: &GraphConfig) -> String {
        let mut buf = Vec::new();
        write_graphs(&mut buf, start, stop, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_graphs() {
        let expected = "\
digraph Upstart {
    graph [label=\"start on\", rankdir = LR, fontsize = 30, fontcolor = red];
    node [shape = \"ellipse\"];
    startup;



}

digraph Upstart {
    graph [label=\"stop on\", rankdir = LR, fontsize = 30, fontcolor = red];
    node [shape = \"ellipse\"];



}
";
        assert_eq!(render(&[], &[], &GraphConfig::default()), expected);
    }

    #[test]
    fn test_records_one_per_line() {
        let start = vec![
            GraphRecord::Process { name: "a".to_string() },
            GraphRecord::Edge {
                from: "startup".to_string(),
                to: "a".to_string(),
                label: None,
            },
        ];
        let config = GraphConfig::default()
            .with_graph_name("Init")
            .with_startup_node(false);
        let mut buf = Vec::new();
        write_graph(&mut buf, GraphKind::Start, &start, &config).unwrap();
        let expected = "\
digraph Init {
    graph [label=\"start on\", rankdir = LR, fontsize = 30, fontcolor = red];
    node [shape = \"ellipse\"];

 \"a\" [shape = box];
 \"startup\" -> \"a\";

}
";
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }
}
