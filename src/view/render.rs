//! Frame composition and terminal output.
//!
//! [`compose`] turns the pager state into the exact rows of one frame,
//! including the prompt row. A [`RenderSink`] puts those rows on a screen;
//! every frame replaces the previous one completely.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::state::PagerState;
use crate::view_state::layout::layout;
use crate::view_state::text::{inverse, truncate, RESET};

/// Prompt shown on the last row while waiting for a command.
pub const PROMPT: &str = ":";

/// Destination for composed frames.
pub trait RenderSink {
    /// Replace the screen with `rows`, top to bottom.
    fn draw(&mut self, rows: &[String]) -> io::Result<()>;

    /// Ring the terminal bell without redrawing.
    fn bell(&mut self) -> io::Result<()>;
}

/// Lay out the current state as a full frame.
///
/// The content rows come first. The last row is the `(END)` marker when the
/// end of content is visible, or the prompt followed by the numeric prefix.
/// A pending message takes the place of either, once. Every row fits the
/// screen width.
pub fn compose(state: &mut PagerState) -> Vec<String> {
    let content = state.content().clone();
    let mut rows = layout(&content, &state.viewport, &mut state.frame);
    let end_shown = state.frame.eof && !state.frame.buffering;
    let width = state.viewport.screen_width;

    if let Some(message) = state.message() {
        let line = inverse(&truncate(message, width));
        if end_shown {
            rows.pop();
        }
        rows.push(line);
    } else if !end_shown {
        rows.push(prompt_line(state));
    }
    rows
}

/// `:` followed by the typed digits, trimmed from the left to fit one row.
fn prompt_line(state: &mut PagerState) -> String {
    let digits = state.prefix().as_str();
    let overflow = (PROMPT.len() + digits.len()).saturating_sub(state.viewport.screen_width);
    let line = format!("{PROMPT}{}", &digits[overflow.min(digits.len())..]);
    state.viewport.buffer_offset = overflow;
    line
}

/// Writes frames to a terminal through crossterm commands.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    /// Wrap a writer, usually stdout.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn draw(&mut self, rows: &[String]) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        for (i, row) in rows.iter().enumerate() {
            let y = u16::try_from(i).unwrap_or(u16::MAX);
            self.out.queue(MoveTo(0, y))?.queue(Print(row))?;
        }
        self.out.queue(Print(RESET))?;
        self.out.flush()
    }

    fn bell(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}
