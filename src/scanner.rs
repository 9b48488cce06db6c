use once_cell::sync::Lazy;
use regex::Regex;

// Position-tracked cursor over callback source.
//
// Every pattern is anchored at the current position, so a scan either
// matches right here or not at all. Patterns live in lazily compiled statics.

/// Compile `pattern` anchored at the start of the haystack
pub fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!(r"\A(?:{})", pattern)).expect("scanner pattern must compile")
}

// Shared patterns

pub static SPACES: Lazy<Regex> = Lazy::new(|| anchored(r" *"));
pub static EOL: Lazy<Regex> = Lazy::new(|| anchored(r"\n|,"));

/// How much context `near` shows on each side of the cursor
const NEAR_WIDTH: usize = 16;

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize, // Byte offset, always on a char boundary
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewind (or fast-forward) to a position previously returned by `pos`
    pub fn set_pos(&mut self, pos: usize) {
        debug_assert!(self.source.is_char_boundary(pos));
        self.pos = pos;
    }

    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn is_eos(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Match at the current position; advance past the match on success
    pub fn scan(&mut self, pattern: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let found = pattern.find(rest)?;
        debug_assert_eq!(found.start(), 0, "scanner patterns must be anchored");
        self.pos += found.end();
        Some(&rest[..found.end()])
    }

    /// Like `scan` but only reports whether something non-empty was consumed
    pub fn skip(&mut self, pattern: &Regex) -> bool {
        matches!(self.scan(pattern), Some(text) if !text.is_empty())
    }

    /// Zero-width lookahead: does `pattern` match here? Never advances.
    pub fn check(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.rest())
    }

    /// 1-indexed line and column of the cursor
    pub fn line_column(&self) -> (usize, usize) {
        let consumed = &self.source[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = consumed[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Excerpt around the cursor for error messages: `"before" @ "after"`
    pub fn near(&self) -> String {
        let before: String = {
            let consumed = &self.source[..self.pos];
            let skip = consumed.chars().count().saturating_sub(NEAR_WIDTH);
            consumed.chars().skip(skip).collect()
        };
        let mut after: String = self.rest().chars().take(NEAR_WIDTH).collect();
        if self.rest().chars().count() > NEAR_WIDTH {
            after.push_str("...");
        }
        format!("{:?} @ {:?}", before, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_advances_only_on_match() {
        let word = anchored(r"[a-z]+");
        let mut s = Scanner::new("abc def");

        assert_eq!(s.scan(&word), Some("abc"));
        assert_eq!(s.pos(), 3);

        // Not at the current position, so no match even though "def" follows
        assert_eq!(s.scan(&word), None);
        assert_eq!(s.pos(), 3);

        assert!(s.skip(&SPACES));
        assert_eq!(s.scan(&word), Some("def"));
        assert!(s.is_eos());
    }

    #[test]
    fn test_skip_reports_empty_match_as_false() {
        let mut s = Scanner::new("x");
        assert!(!s.skip(&SPACES));
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn test_check_does_not_advance() {
        let assign = anchored(r"[a-z]+ *=");
        let s = Scanner::new("x = 4");
        assert!(s.check(&assign));
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn test_line_column() {
        let mut s = Scanner::new("ab\ncd");
        s.set_pos(4);
        assert_eq!(s.line_column(), (2, 2));
        s.set_pos(0);
        assert_eq!(s.line_column(), (1, 1));
    }

    #[test]
    fn test_near_shows_both_sides() {
        let mut s = Scanner::new(":token ]");
        s.set_pos(7);
        assert_eq!(s.near(), r#"":token " @ "]""#);
    }

    #[test]
    fn test_near_truncates_long_tail() {
        let s = Scanner::new("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(s.near(), r#""" @ "abcdefghijklmnop...""#);
    }
}
