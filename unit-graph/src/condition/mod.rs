//! `start on` / `stop on` condition parser
//!
//! A condition is a chain of terms joined by `and`/`or`, where a term is either
//! a parenthesized sub-condition or a leaf:
//!
//! ```text
//! term        := operand (andor operand)*
//! operand     := group | leaf
//! group       := '(' ws* term ws* ')' ws*
//! leaf        := dependency | event_ref
//! andor       := ws* ('and' | 'or') ws+
//! dependency  := ('starting'|'started'|'stopping'|'stopped') ws+ name qualifiers
//! event_ref   := name qualifiers
//! name        := [a-z\-]+
//! qualifiers  := (ws* token)*
//! token       := [a-zA-Z0-9!=\[\]_]+
//! ```
//!
//! `ws` is ASCII whitespace only. Chained terms are stored as flat siblings
//! and the connector itself is dropped, so `a and b` and `a or b` parse to the
//! same tree. Parsing never fails: whatever was recognized before the first
//! mismatch is kept. Groups nest at most [`MAX_GROUP_DEPTH`] deep.

use crate::scanner::Cursor;
use crate::types::Term;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub mod leaf;
pub mod qualifiers;
mod term;

pub use qualifiers::connector_ahead;
pub use term::{ConditionParser, MAX_GROUP_DEPTH};

/// Receiver for parser tracing
///
/// The parser reports every alternative it tries and every node it builds.
/// Sinks are shared across threads when units are parsed in parallel.
pub trait TraceSink: Send + Sync {
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// Discards all tracing (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn trace(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards tracing to `log::trace!`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn trace(&self, args: fmt::Arguments<'_>) {
        log::trace!(target: "unit_graph::condition", "{}", args);
    }
}

/// Parse one condition starting at the cursor into a flat list of top-level terms
pub fn parse_condition(job: &str, cursor: &mut Cursor<'_>, trace: &dyn TraceSink) -> Vec<Term> {
    let mut tree = Vec::new();
    ConditionParser::new(job, trace).term(cursor, &mut tree);
    tree
}

/// Parse a condition given as a string (the text after `start on`)
pub fn parse_condition_str(job: &str, condition: &str) -> Vec<Term> {
    let mut cursor = Cursor::new(condition);
    parse_condition(job, &mut cursor, &NoTrace)
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        pub(crate) fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                Regex::new($re).expect(concat!(stringify!($name), " regex must compile"))
            })
        }
    };
}

// ASCII whitespace only: a no-break space ends a token
pattern!(open_paren_re, r"^\((?-u:\s)*");
pattern!(close_paren_re, r"^(?-u:\s)*\)(?-u:\s)*");
pattern!(connector_re, r"^(?-u:\s)*(and|or)(?-u:\s)+");
pattern!(dependency_re, r"^(starting|started|stopping|stopped)(?-u:\s)+([a-z\-]+)");
pattern!(event_re, r"^([a-z\-]+)");
pattern!(line_end_re, r"^(?-u:\s)*\n");
pattern!(qualifier_re, r"^(?-u:\s)*([a-zA-Z0-9!=\[\]_]+)");
