//! ANSI- and width-aware tokenizing of content lines.
//!
//! A content line is a mix of SGR style codes (`ESC [ <digits;> m`), which
//! occupy no columns, and grapheme clusters occupying one or two columns.
//! Layout never measures raw strings directly; it walks [`Segment`]s.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Inverse video on.
pub const INVERSE_ON: &str = "\x1b[7m";
/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// One piece of a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A zero-width SGR escape sequence, kept verbatim.
    Style(&'a str),
    /// A grapheme cluster and the columns it occupies (1 or 2).
    Glyph {
        /// The cluster text.
        text: &'a str,
        /// Display columns.
        width: usize,
    },
}

impl Segment<'_> {
    /// Columns occupied on screen.
    pub fn width(&self) -> usize {
        match self {
            Segment::Style(_) => 0,
            Segment::Glyph { width, .. } => *width,
        }
    }
}

/// Split a line into style codes and grapheme clusters, in order.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        match rest.find('\x1b') {
            Some(0) => {
                // An ESC that does not start an SGR sequence is shown as a glyph.
                let len = style_len(rest).unwrap_or(1);
                if len == 1 {
                    out.push(Segment::Glyph {
                        text: &rest[..1],
                        width: 1,
                    });
                } else {
                    out.push(Segment::Style(&rest[..len]));
                }
                rest = &rest[len..];
            }
            Some(i) => {
                push_glyphs(&rest[..i], &mut out);
                rest = &rest[i..];
            }
            None => {
                push_glyphs(rest, &mut out);
                break;
            }
        }
    }
    out
}

/// Display width of a line, ignoring style codes.
pub fn visual_width(line: &str) -> usize {
    segments(line).iter().map(Segment::width).sum()
}

/// The visible characters of a line, style codes removed.
pub fn strip_styles(line: &str) -> String {
    segments(line)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Glyph { text, .. } => Some(text),
            Segment::Style(_) => None,
        })
        .collect()
}

/// Cut `text` to at most `width` columns, dropping whole glyphs.
pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for seg in segments(text) {
        match seg {
            Segment::Style(code) => out.push_str(code),
            Segment::Glyph { text, width: w } => {
                if used + w > width {
                    break;
                }
                used += w;
                out.push_str(text);
            }
        }
    }
    out
}

/// Wrap `text` in inverse video.
pub fn inverse(text: &str) -> String {
    format!("{INVERSE_ON}{text}{RESET}")
}

/// `count` inverse-video spaces, used where a wide glyph cannot be shown whole.
pub fn inverse_spaces(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    inverse(&" ".repeat(count))
}

/// Columns a grapheme cluster occupies, clamped to the 1..=2 range terminals use.
pub fn glyph_width(glyph: &str) -> usize {
    glyph.width().clamp(1, 2)
}

fn push_glyphs<'a>(text: &'a str, out: &mut Vec<Segment<'a>>) {
    out.extend(text.graphemes(true).map(|g| Segment::Glyph {
        text: g,
        width: glyph_width(g),
    }));
}

/// Length in bytes of the SGR sequence at the start of `s`, if any.
fn style_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&0x1b) || bytes.get(1) != Some(&b'[') {
        return None;
    }
    let params = bytes[2..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b';')
        .count();
    match bytes.get(2 + params) {
        Some(b'm') => Some(3 + params),
        _ => None,
    }
}
