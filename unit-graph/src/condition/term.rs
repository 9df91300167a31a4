use super::leaf::{dependency, event_ref};
use super::{close_paren_re, connector_re, open_paren_re, TraceSink};
use crate::scanner::Cursor;
use crate::types::Term;

/// Deepest parenthesis nesting the parser descends into. A group nested
/// deeper does not match.
pub const MAX_GROUP_DEPTH: usize = 256;

/// Recursive-descent driver for one job's conditions
pub struct ConditionParser<'s> {
    job: &'s str,
    trace: &'s dyn TraceSink,
}

impl<'s> ConditionParser<'s> {
    pub fn new(job: &'s str, trace: &'s dyn TraceSink) -> Self {
        Self { job, trace }
    }

    /// Parse a term and any chained terms, appending them to `tree`.
    ///
    /// Returns false when nothing matched at the cursor; `tree` and the cursor
    /// are then unchanged.
    pub fn term(&self, cursor: &mut Cursor<'_>, tree: &mut Vec<Term>) -> bool {
        self.chain(cursor, tree, 0)
    }

    /// Chained siblings are flat, so the chain is walked iteratively and only
    /// groups add nesting.
    fn chain(&self, cursor: &mut Cursor<'_>, tree: &mut Vec<Term>, depth: usize) -> bool {
        if !self.operand(cursor, tree, depth) {
            return false;
        }

        while let Some(caps) = cursor.scan(connector_re()) {
            self.trace.trace(format_args!("#ANDOR {}", &caps[1]));
            if !self.operand(cursor, tree, depth) {
                break;
            }
        }
        true
    }

    fn operand(&self, cursor: &mut Cursor<'_>, tree: &mut Vec<Term>, depth: usize) -> bool {
        self.trace.trace(format_args!("?TERM {}", cursor.peek(10)));
        self.group(cursor, tree, depth) || self.leaf(cursor, tree)
    }

    /// `( term )`, restoring the cursor if any part is missing
    fn group(&self, cursor: &mut Cursor<'_>, tree: &mut Vec<Term>, depth: usize) -> bool {
        self.trace.trace(format_args!("?PAREN"));
        if depth >= MAX_GROUP_DEPTH {
            self.trace.trace(format_args!("#NO PAREN nested deeper than {}", MAX_GROUP_DEPTH));
            return false;
        }

        let pos = cursor.pos();
        let mut children = Vec::new();

        let matched = cursor.scan(open_paren_re()).is_some()
            && self.chain(cursor, &mut children, depth + 1)
            && cursor.scan(close_paren_re()).is_some();

        if matched {
            self.trace.trace(format_args!("#PAREN -> {} terms", children.len()));
            tree.push(Term::Group(children));
        } else {
            cursor.set_pos(pos);
        }
        matched
    }

    fn leaf(&self, cursor: &mut Cursor<'_>, tree: &mut Vec<Term>) -> bool {
        self.trace.trace(format_args!("?EVENTS"));
        let term = dependency(self.job, cursor, self.trace)
            .or_else(|| event_ref(self.job, cursor, self.trace));

        match term {
            Some(term) => {
                tree.push(term);
                true
            }
            None => false,
        }
    }
}
