//! Print the parsed condition trees of one or more job files
//!
//! Usage:
//!   inspect_unit <job.conf> [<job.conf> ...]
//!
//! Set RUST_LOG=unit_graph::condition=trace to watch the parser backtrack.

use std::env;
use std::path::Path;
use unit_graph::loader::read_job_file;
use unit_graph::{LogTrace, Term, UnitGraph};

fn print_terms(terms: &[Term], depth: usize) {
    let indent = "  ".repeat(depth);
    for term in terms {
        match term {
            Term::Group(children) => {
                println!("{}group ({} terms)", indent, children.len());
                print_terms(children, depth + 1);
            }
            Term::EventRef { from, qualifiers, .. } => {
                println!("{}event {} {:?}", indent, from, qualifiers);
            }
            Term::Dependency {
                from,
                state,
                qualifiers,
                ..
            } => {
                println!("{}{} {} {:?}", indent, state, from, qualifiers);
            }
            Term::Emission { name, .. } => {
                println!("{}emits {}", indent, name);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: inspect_unit <job.conf> [<job.conf> ...]");
        std::process::exit(1);
    }

    let mut graph = UnitGraph::new().with_trace(LogTrace);
    for path in &paths {
        match read_job_file(Path::new(path), "conf") {
            Ok(source) => {
                graph.add_unit(&source.name, &source.text);
            }
            Err(e) => eprintln!("✗ {}", e),
        }
    }

    for unit in graph.units() {
        println!("═══════════════════════════════════════");
        println!("Job: {}", unit.name);
        println!("═══════════════════════════════════════");
        println!("start on:");
        print_terms(&unit.start_on, 1);
        println!("stop on:");
        print_terms(&unit.stop_on, 1);
        println!("emits:");
        print_terms(&unit.emits, 1);
        println!();
    }

    let stats = graph.stats();
    println!(
        "Total: {} jobs, {} start edges, {} stop edges",
        stats.units, stats.start_edges, stats.stop_edges
    );
}
