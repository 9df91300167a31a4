//! Position-tracking cursor over one job file
//!
//! The condition parser is written as ordinary functions that try a pattern,
//! keep going on success and put the position back on failure. This cursor is
//! all the state they share.

use regex::{Captures, Regex};

/// Cursor over a job file's text
///
/// Every pattern passed to [`Cursor::scan`] must be anchored with `^`: it is
/// matched against the unconsumed suffix, so `^` means "at the cursor".
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move to a byte offset previously obtained from [`Cursor::pos`] or from a
    /// match against the whole text. Out-of-range offsets are clamped.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    /// Unconsumed text
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Match `pattern` at the cursor. On success the cursor moves past the
    /// whole match; on failure it stays where it was.
    pub fn scan(&mut self, pattern: &Regex) -> Option<Captures<'a>> {
        let rest = self.rest();
        let caps = pattern.captures(rest)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        self.pos += whole.end();
        Some(caps)
    }

    /// Whether `pattern` matches at the cursor, without moving
    pub fn check(&self, pattern: &Regex) -> bool {
        pattern
            .find(self.rest())
            .map_or(false, |m| m.start() == 0)
    }

    /// Up to `n` characters from the cursor, without moving
    pub fn peek(&self, n: usize) -> &'a str {
        let rest = self.rest();
        match rest.char_indices().nth(n) {
            Some((end, _)) => &rest[..end],
            None => rest,
        }
    }
}
