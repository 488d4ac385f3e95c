//! Frame layout: content lines to exactly the rows a terminal frame shows.
//!
//! Two strategies share one contract. Starting at the viewport's
//! `(row, sub_row)`, produce at most `window - 1` rows and report whether
//! the last produced row is the final visual row of the content.
//!
//! - **Chop** truncates each line to the screen width, ending a truncated
//!   line with an inverse-video `>` marker.
//! - **Wrap** splits each line into sub-rows of exactly `screen_width`
//!   columns. Splitting is done by [`split_sub_rows`], which navigation also
//!   uses to count sub-rows, so both agree on where content ends.

use crate::model::Content;

use super::text::{
    inverse, inverse_spaces, segments, truncate, visual_width, Segment, INVERSE_ON, RESET,
};
use super::viewport::Viewport;

/// Inverse-video end of content marker.
pub const END_MARKER: &str = "\x1b[7m(END)\x1b[0m";
/// Bold `~` shown on rows past the end of content.
pub const FILLER: &str = "\x1b[1m~\x1b[0m";
/// Inverse-video marker for a chopped line.
pub const MORE_MARKER: &str = "\x1b[7m>\x1b[0m";

/// Frame flags read and updated by [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameState {
    /// The content has not yet filled a whole frame; suppresses filler rows.
    pub init: bool,
    /// The last content row shown is the final visual row.
    pub eof: bool,
    /// A numeric prefix is being typed; the prompt stays visible.
    pub buffering: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            init: true,
            eof: false,
            buffering: false,
        }
    }
}

/// Content rows for one frame, before filler and markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRows {
    /// Printable rows, at most `window - 1`.
    pub rows: Vec<String>,
    /// Whether the last row is the content's final visual row.
    pub eof: bool,
}

/// Lay out a full frame.
///
/// Returns the content rows, then bold `~` filler up to `window - 1` rows
/// once `init` has been cleared, then the `(END)` marker when the end of
/// content is on screen and no numeric prefix is being typed. The marker
/// takes the prompt row.
pub fn layout(content: &Content, viewport: &Viewport, state: &mut FrameState) -> Vec<String> {
    let ContentRows { mut rows, eof } = content_rows(content, viewport);
    let budget = viewport.page_rows();

    if !state.init {
        rows.resize(budget.max(rows.len()), FILLER.to_string());
    } else if rows.len() == budget {
        state.init = false;
    }

    state.eof = eof;
    if eof && !state.buffering {
        rows.push(end_marker(viewport.screen_width));
    }
    rows
}

/// The `(END)` marker, cut to fit screens narrower than the marker.
pub fn end_marker(width: usize) -> String {
    if visual_width(END_MARKER) <= width {
        END_MARKER.to_string()
    } else {
        inverse(&truncate("(END)", width))
    }
}

/// Content rows for the current position, using the viewport's strategy.
pub fn content_rows(content: &Content, viewport: &Viewport) -> ContentRows {
    if viewport.chop_long_lines {
        chop_rows(content, viewport)
    } else {
        wrap_rows(content, viewport)
    }
}

/// Chop strategy: one row per line, truncated to the screen width.
pub fn chop_rows(content: &Content, viewport: &Viewport) -> ContentRows {
    let budget = viewport.page_rows();
    let rows = content
        .lines_from(viewport.row)
        .take(budget)
        .map(|line| chop_line(line, viewport.col, viewport.screen_width))
        .collect();
    ContentRows {
        rows,
        eof: viewport.row + budget >= content.len(),
    }
}

/// Wrap strategy: lines split into sub-rows, starting at `sub_row`.
pub fn wrap_rows(content: &Content, viewport: &Viewport) -> ContentRows {
    let budget = viewport.page_rows();
    let mut rows = Vec::with_capacity(budget);

    for (offset, line) in content.lines_from(viewport.row).enumerate() {
        let index = viewport.row + offset;
        let sub_rows = split_sub_rows(line, viewport.screen_width);
        let skip = if offset == 0 {
            viewport.sub_row.min(sub_rows.len() - 1)
        } else {
            0
        };

        for (k, sub_row) in sub_rows.iter().enumerate().skip(skip) {
            let mut text = if k == skip {
                // Styles opened in skipped sub-rows still apply.
                styles_of(&sub_rows[..skip])
            } else {
                String::new()
            };
            push_segments(&mut text, sub_row);

            if rows.len() + 1 == budget {
                text.push_str(&styles_of(&sub_rows[k + 1..]));
                rows.push(text);
                let eof = index == content.last_index() && k + 1 == sub_rows.len();
                return ContentRows { rows, eof };
            }
            rows.push(text);
        }
    }

    ContentRows { rows, eof: true }
}

/// Truncate one line for chop mode.
///
/// Skips the first `col` columns; a wide glyph cut by that boundary is
/// replaced by inverse spaces. If what remains fits in `width` columns it
/// is returned whole. Otherwise it is cut to `width - 1` columns, padded
/// with inverse spaces where a wide glyph would straddle the cut, and ended
/// with the `>` marker. Style codes past the cut are kept before the marker
/// so the color state stays correct.
pub fn chop_line(line: &str, col: usize, width: usize) -> String {
    let segs = segments(line);
    let total: usize = segs.iter().map(Segment::width).sum();
    let fits = total.saturating_sub(col) <= width;
    let limit = if fits { width } else { width.saturating_sub(1) };

    let mut out = String::with_capacity(line.len());
    let mut pos = 0;
    let mut used = 0;
    let mut cut = false;

    for seg in &segs {
        match *seg {
            Segment::Style(code) => out.push_str(code),
            Segment::Glyph { text, width: w } => {
                let start = pos;
                pos += w;
                if cut || pos <= col {
                    continue;
                }
                let shown = if start < col { pos - col } else { w };
                if used + shown > limit {
                    out.push_str(&inverse_spaces(limit - used));
                    used = limit;
                    cut = true;
                    continue;
                }
                if start < col {
                    out.push_str(&inverse_spaces(shown));
                } else {
                    out.push_str(text);
                }
                used += shown;
            }
        }
    }

    if !fits {
        if !cut {
            out.push_str(&inverse_spaces(limit - used));
        }
        out.push_str(MORE_MARKER);
    }
    out
}

/// Split one line into sub-rows of at most `width` columns.
///
/// A glyph that would overflow starts the next sub-row; a style code stays
/// on the sub-row that is open when it appears. An empty line yields one
/// empty sub-row. A glyph wider than the screen is shown as one inverse
/// space, as chop mode does.
pub fn split_sub_rows(line: &str, width: usize) -> Vec<Vec<Segment<'_>>> {
    let mut rows: Vec<Vec<Segment<'_>>> = vec![Vec::new()];
    let mut used = 0;
    for seg in segments(line) {
        let w = seg.width().min(width.max(1));
        if w > 0 && used > 0 && used + w > width {
            rows.push(Vec::new());
            used = 0;
        }
        used += w;
        let Some(current) = rows.last_mut() else {
            continue;
        };
        if w < seg.width() {
            current.extend([
                Segment::Style(INVERSE_ON),
                Segment::Glyph { text: " ", width: 1 },
                Segment::Style(RESET),
            ]);
        } else {
            current.push(seg);
        }
    }
    rows
}

/// Number of sub-rows `line` wraps to at `width` columns.
pub fn sub_row_count(line: &str, width: usize) -> usize {
    if line.is_ascii() && !line.contains('\x1b') {
        return line.len().div_ceil(width.max(1)).max(1);
    }
    split_sub_rows(line, width).len()
}

/// Index of the last sub-row of `line`.
pub fn max_sub_row(line: &str, width: usize) -> usize {
    sub_row_count(line, width) - 1
}

/// Widest visible line among the rows currently on screen.
pub fn max_visible_width(content: &Content, viewport: &Viewport) -> usize {
    content
        .lines_from(viewport.row)
        .take(viewport.page_rows())
        .map(visual_width)
        .max()
        .unwrap_or(0)
}

fn push_segments(out: &mut String, segs: &[Segment<'_>]) {
    for seg in segs {
        match seg {
            Segment::Style(code) => out.push_str(code),
            Segment::Glyph { text, .. } => out.push_str(text),
        }
    }
}

fn styles_of(sub_rows: &[Vec<Segment<'_>>]) -> String {
    sub_rows
        .iter()
        .flatten()
        .filter_map(|seg| match seg {
            Segment::Style(code) => Some(*code),
            Segment::Glyph { .. } => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
