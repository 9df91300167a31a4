//! Qualifier tokens trailing a leaf, e.g. `IFACE!=lo` in
//! `net-device-up IFACE!=lo`

use super::{connector_re, line_end_re, qualifier_re, TraceSink};
use crate::scanner::Cursor;

/// Whether an `and`/`or` connector sits at the cursor. The connector is left
/// for the chain parser to consume.
pub fn connector_ahead(cursor: &Cursor<'_>) -> bool {
    cursor.check(connector_re())
}

/// Read qualifier tokens into `qualifiers` until the end of the line, a
/// connector, or anything that is not a token (such as a closing paren).
///
/// A line break after the last token is consumed; a connector is not.
pub fn read_qualifiers(
    cursor: &mut Cursor<'_>,
    qualifiers: &mut Vec<String>,
    trace: &dyn TraceSink,
) {
    loop {
        if cursor.scan(line_end_re()).is_some() {
            trace.trace(format_args!("#NO KEY-VALUE TERMINATE"));
            return;
        }
        if connector_ahead(cursor) {
            trace.trace(format_args!("#NO KEY-VALUE"));
            return;
        }

        trace.trace(format_args!("?KEY-VALUE"));
        let Some(caps) = cursor.scan(qualifier_re()) else {
            return;
        };
        let token = &caps[1];
        trace.trace(format_args!("#KEY-VALUE {}", token));
        qualifiers.push(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::NoTrace;

    fn read(text: &str) -> (Vec<String>, String) {
        let mut cursor = Cursor::new(text);
        let mut qualifiers = Vec::new();
        read_qualifiers(&mut cursor, &mut qualifiers, &NoTrace);
        (qualifiers, cursor.rest().to_string())
    }

    #[test]
    fn test_connector_ahead_does_not_consume() {
        let cursor = Cursor::new("  and bar");
        assert!(connector_ahead(&cursor));
        assert_eq!(cursor.pos(), 0);

        let cursor = Cursor::new(" or\tbar");
        assert!(connector_ahead(&cursor));
        assert_eq!(cursor.pos(), 0);

        let cursor = Cursor::new(" IFACE=lo");
        assert!(!connector_ahead(&cursor));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_connector_ahead_requires_trailing_whitespace() {
        assert!(!connector_ahead(&Cursor::new(" android")));
        assert!(!connector_ahead(&Cursor::new(" orbit")));
        assert!(!connector_ahead(&Cursor::new(" and")));
        assert!(connector_ahead(&Cursor::new("and\n")));
    }

    #[test]
    fn test_stops_at_line_end() {
        let (qualifiers, rest) = read(" IFACE!=lo RUNLEVEL=[2345]\nstop on x");
        assert_eq!(qualifiers, vec!["IFACE!=lo", "RUNLEVEL=[2345]"]);
        assert_eq!(rest, "stop on x");
    }

    #[test]
    fn test_stops_before_connector() {
        let (qualifiers, rest) = read(" IFACE=eth0 or bar");
        assert_eq!(qualifiers, vec!["IFACE=eth0"]);
        assert_eq!(rest, " or bar");
    }

    #[test]
    fn test_stops_at_closing_paren() {
        let (qualifiers, rest) = read(" A=1)");
        assert_eq!(qualifiers, vec!["A=1"]);
        assert_eq!(rest, ")");
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let (qualifiers, _) = read(" B=2 A=1 B=2");
        assert_eq!(qualifiers, vec!["B=2", "A=1", "B=2"]);
    }

    #[test]
    fn test_connector_lookalike_is_a_token() {
        let (qualifiers, rest) = read(" orange and x");
        assert_eq!(qualifiers, vec!["orange"]);
        assert_eq!(rest, " and x");
    }

    #[test]
    fn test_nothing_to_read() {
        let (qualifiers, rest) = read("");
        assert!(qualifiers.is_empty());
        assert_eq!(rest, "");
    }
}
