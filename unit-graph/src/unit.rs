//! Job file processing
//!
//! Pulls the `start on` and `stop on` conditions and the `emits` declarations
//! out of one job file. Every other stanza is ignored.

use crate::condition::{leaf, parse_condition, TraceSink};
use crate::scanner::Cursor;
use crate::types::{JobUnit, Term};
use regex::Regex;
use std::sync::OnceLock;

fn start_on_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^start on").expect("start-on line regex must compile"))
}

fn start_on_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^start on(?-u:\s)+").expect("start-on regex must compile"))
}

fn stop_on_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^stop on").expect("stop-on line regex must compile"))
}

fn stop_on_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^stop on(?-u:\s)+").expect("stop-on regex must compile"))
}

fn emits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^emits(?-u:\s)+([a-z\-]+)").expect("emits regex must compile")
    })
}

/// Parse one job file's text into a [`JobUnit`]
pub fn parse_unit(name: &str, text: &str, trace: &dyn TraceSink) -> JobUnit {
    trace.trace(format_args!("#FILE {}", name));
    JobUnit {
        name: name.to_string(),
        start_on: parse_stanza(name, text, "start on", start_on_line_re(), start_on_re(), trace),
        stop_on: parse_stanza(name, text, "stop on", stop_on_line_re(), stop_on_re(), trace),
        emits: parse_emits(name, text),
    }
}

/// Parse the condition of the first line matching `line`.
///
/// A missing stanza, or a keyword not followed by whitespace, gives no terms.
fn parse_stanza(
    name: &str,
    text: &str,
    stanza: &str,
    line: &Regex,
    keyword: &Regex,
    trace: &dyn TraceSink,
) -> Vec<Term> {
    trace.trace(format_args!("#=={}", stanza));
    let Some(found) = line.find(text) else {
        log::debug!("{}: no `{}` stanza", name, stanza);
        return Vec::new();
    };

    let mut cursor = Cursor::new(text);
    cursor.set_pos(found.start());
    if cursor.scan(keyword).is_none() {
        log::debug!("{}: `{}` has no condition", name, stanza);
        return Vec::new();
    }

    let tree = parse_condition(name, &mut cursor, trace);
    if tree.is_empty() {
        log::warn!("{}: could not parse condition after `{}`", name, stanza);
    }
    tree
}

/// One emission per line starting with `emits`; only the first event of a
/// line is taken.
fn parse_emits(name: &str, text: &str) -> Vec<Term> {
    text.split('\n')
        .filter_map(|line| emits_re().captures(line))
        .map(|caps| leaf::emission(name, &caps[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::NoTrace;
    use crate::types::TransitionState;

    fn event(from: &str, name: &str) -> Term {
        Term::EventRef {
            from: from.to_string(),
            name: name.to_string(),
            qualifiers: vec![],
        }
    }

    #[test]
    fn test_no_stanzas() {
        let unit = parse_unit("plain", "description \"nothing\"\nexec /bin/true\n", &NoTrace);
        assert_eq!(unit, JobUnit::new("plain"));
    }

    #[test]
    fn test_start_and_stop() {
        let text = "\
description \"D-Bus system message bus\"

start on local-filesystems
stop on deconfiguring-networking

expect fork
respawn
";
        let unit = parse_unit("dbus", text, &NoTrace);
        assert_eq!(unit.start_on, vec![event("local-filesystems", "dbus")]);
        assert_eq!(unit.stop_on, vec![event("deconfiguring-networking", "dbus")]);
        assert!(unit.emits.is_empty());
    }

    #[test]
    fn test_stop_before_start() {
        let text = "stop on runlevel [!2345]\nstart on runlevel [2345]\n";
        let unit = parse_unit("rc", text, &NoTrace);
        assert_eq!(unit.start_on[0].qualifiers(), ["[2345]".to_string()]);
        assert_eq!(unit.stop_on[0].qualifiers(), ["[!2345]".to_string()]);
    }

    #[test]
    fn test_stanza_must_start_line() {
        let unit = parse_unit("x", "# start on foo\n  stop on bar\n", &NoTrace);
        assert!(unit.start_on.is_empty());
        assert!(unit.stop_on.is_empty());
    }

    #[test]
    fn test_first_stanza_wins() {
        let unit = parse_unit("x", "start on foo\nstart on bar\n", &NoTrace);
        assert_eq!(unit.start_on, vec![event("foo", "x")]);
    }

    #[test]
    fn test_keyword_without_condition() {
        let unit = parse_unit("x", "start on", &NoTrace);
        assert!(unit.start_on.is_empty());
    }

    #[test]
    fn test_keyword_needs_ascii_space() {
        let unit = parse_unit("x", "start on\u{a0}foo\nemits\u{a0}bar\nstop on\tbaz\n", &NoTrace);
        assert!(unit.start_on.is_empty());
        assert!(unit.emits.is_empty());
        assert_eq!(unit.stop_on, vec![event("baz", "x")]);
    }

    #[test]
    fn test_multiline_condition() {
        let text = "\
start on (filesystem
          and started dbus
          and net-device-up IFACE!=lo)
stop on stopping dbus
";
        let unit = parse_unit("network-manager", text, &NoTrace);
        assert_eq!(unit.start_on.len(), 1);
        assert_eq!(unit.start_on[0].leaf_count(), 3);
        assert_eq!(
            unit.stop_on,
            vec![Term::Dependency {
                from: "dbus".to_string(),
                name: "network-manager".to_string(),
                state: TransitionState::Stopping,
                qualifiers: vec![],
            }]
        );
    }

    #[test]
    fn test_emits() {
        let text = "\
emits virtual-filesystems
emits local-filesystems all-swaps
  emits nope
start on startup
";
        let unit = parse_unit("mountall", text, &NoTrace);
        assert_eq!(
            unit.emits,
            vec![
                leaf::emission("mountall", "virtual-filesystems"),
                leaf::emission("mountall", "local-filesystems"),
            ]
        );
        assert_eq!(unit.start_on, vec![event("startup", "mountall")]);
    }
}
