//! Leaf terms: event references, job state dependencies and emissions

use super::qualifiers::read_qualifiers;
use super::{dependency_re, event_re, TraceSink};
use crate::scanner::Cursor;
use crate::types::{Term, TransitionState};

/// Try `(starting|started|stopping|stopped) <job> [qualifiers]` at the cursor.
///
/// Must be tried before [`event_ref`], which would otherwise take the state
/// keyword for an event name.
pub fn dependency(job: &str, cursor: &mut Cursor<'_>, trace: &dyn TraceSink) -> Option<Term> {
    trace.trace(format_args!("?DEPEND"));
    let caps = cursor.scan(dependency_re())?;
    let state = TransitionState::from_keyword(&caps[1])?;
    let from = caps[2].to_string();
    trace.trace(format_args!("#DEPEND {} {}", state, from));

    let mut qualifiers = Vec::new();
    read_qualifiers(cursor, &mut qualifiers, trace);
    Some(Term::Dependency {
        from,
        name: job.to_string(),
        state,
        qualifiers,
    })
}

/// Try `<event> [qualifiers]` at the cursor
pub fn event_ref(job: &str, cursor: &mut Cursor<'_>, trace: &dyn TraceSink) -> Option<Term> {
    trace.trace(format_args!("?EVENT"));
    let caps = cursor.scan(event_re())?;
    let from = caps[1].to_string();
    trace.trace(format_args!("#EVENT {}", from));

    let mut qualifiers = Vec::new();
    read_qualifiers(cursor, &mut qualifiers, trace);
    Some(Term::EventRef {
        from,
        name: job.to_string(),
        qualifiers,
    })
}

/// Emission of `event` by `job`
pub fn emission(job: &str, event: &str) -> Term {
    Term::Emission {
        from: job.to_string(),
        name: event.to_string(),
    }
}
