//! The immutable line store the pager scrolls over.

use std::sync::Arc;

/// Ordered logical lines, shared cheaply between the live view and the
/// help snapshot.
///
/// Never empty: empty input is stored as a single empty line so that row
/// `0` is always addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    lines: Arc<[String]>,
}

impl Content {
    /// Build content from already split lines.
    pub fn new(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines: lines.into(),
        }
    }

    /// Split text on `\n`, dropping a trailing `\r` from every line.
    ///
    /// A final newline does not produce an extra empty line.
    pub fn from_text(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::new(lines)
    }

    /// Number of logical lines (always at least 1).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, or `None` past the end.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Index of the last line.
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Iterate lines starting at `start`.
    pub fn lines_from(&self, start: usize) -> impl Iterator<Item = &str> {
        self.lines.iter().skip(start).map(String::as_str)
    }
}

impl From<Vec<String>> for Content {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl From<&[&str]> for Content {
    fn from(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| l.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_still_has_one_line() {
        let content = Content::new(Vec::new());
        assert_eq!(content.len(), 1);
        assert_eq!(content.line(0), Some(""));
        assert_eq!(content.last_index(), 0);
    }

    #[test]
    fn from_text_splits_and_strips_carriage_returns() {
        let content = Content::from_text("one\r\ntwo\nthree\n");
        assert_eq!(content.len(), 3);
        assert_eq!(content.line(0), Some("one"));
        assert_eq!(content.line(2), Some("three"));
        assert_eq!(content.line(3), None);
    }

    #[test]
    fn from_text_keeps_inner_blank_lines() {
        let content = Content::from_text("a\n\nb");
        assert_eq!(content.len(), 3);
        assert_eq!(content.line(1), Some(""));
    }

    #[test]
    fn lines_from_skips_prefix() {
        let content = Content::from(&["a", "b", "c"][..]);
        let rest: Vec<&str> = content.lines_from(1).collect();
        assert_eq!(rest, vec!["b", "c"]);
    }
}
