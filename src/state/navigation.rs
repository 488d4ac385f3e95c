//! Moving the viewport over content.
//!
//! Positions are `(row, sub_row)` pairs ordered lexicographically. In chop
//! mode every line is one visual row; in wrap mode a line has as many
//! visual rows as [`sub_row_count`] reports at the current screen width.
//!
//! Forward movement is clamped to the *EOF position*: the first position
//! from which the frame reaches the final visual row of the content. From
//! there on the `(END)` marker sits directly under the last line and never
//! floats above filler rows.

use crate::model::Content;
use crate::view_state::layout::{max_visible_width, sub_row_count};
use crate::view_state::viewport::Viewport;

/// Outcome of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// The viewport changed.
    Moved,
    /// No progress was possible; the caller rings the bell.
    Blocked,
}

impl Motion {
    /// True when the viewport changed.
    pub fn moved(self) -> bool {
        self == Motion::Moved
    }
}

/// A `(row, sub_row)` position.
pub type Position = (usize, usize);

/// Visual rows occupied by `row`.
fn row_height(content: &Content, viewport: &Viewport, row: usize) -> usize {
    if viewport.chop_long_lines {
        return 1;
    }
    content
        .line(row)
        .map(|line| sub_row_count(line, viewport.screen_width))
        .unwrap_or(1)
}

/// The first position whose frame shows the final visual row.
///
/// Walks backward from the last line summing row heights until a full
/// frame of `window - 1` rows is covered. Content shorter than a frame
/// yields `(0, 0)`.
pub fn eof_position(content: &Content, viewport: &Viewport) -> Position {
    let budget = viewport.page_rows();
    if viewport.chop_long_lines {
        return (content.len().saturating_sub(budget), 0);
    }

    let mut covered = 0;
    for row in (0..content.len()).rev() {
        let height = row_height(content, viewport, row);
        if covered + height >= budget {
            return (row, covered + height - budget);
        }
        covered += height;
    }
    (0, 0)
}

/// The final visual row of the content.
pub fn last_position(content: &Content, viewport: &Viewport) -> Position {
    let last = content.last_index();
    (last, row_height(content, viewport, last) - 1)
}

/// Whether a frame starting at the current position reaches the end.
pub fn at_eof(content: &Content, viewport: &Viewport) -> bool {
    viewport.position() >= eof_position(content, viewport)
}

/// Index of the last line with at least one row in the current frame.
pub fn bottom_row(content: &Content, viewport: &Viewport) -> usize {
    let last = content.last_index();
    if viewport.chop_long_lines {
        return (viewport.row + viewport.page_rows() - 1).min(last);
    }

    let mut remaining = viewport.page_rows();
    let mut row = viewport.row;
    let mut height = row_height(content, viewport, row).saturating_sub(viewport.sub_row);
    while height < remaining && row < last {
        remaining -= height;
        row += 1;
        height = row_height(content, viewport, row);
    }
    row
}

/// Bring `sub_row` back in range after the width changed.
pub fn clamp_position(content: &Content, viewport: &mut Viewport) {
    viewport.row = viewport.row.min(content.last_index());
    let max_sub_row = row_height(content, viewport, viewport.row) - 1;
    let sub_row = viewport.sub_row.min(max_sub_row);
    viewport.set_position((viewport.row, sub_row));
}

fn advance(content: &Content, viewport: &Viewport, from: Position, by: usize, limit: Position) -> Position {
    if viewport.chop_long_lines {
        return (from.0.saturating_add(by), 0).min(limit);
    }

    let (mut row, mut sub_row) = from;
    let mut left = by;
    loop {
        let max_sub_row = row_height(content, viewport, row) - 1;
        let room = max_sub_row - sub_row;
        if left <= room {
            return (row, sub_row + left).min(limit);
        }
        left -= room + 1;
        if row >= limit.0 || row == content.last_index() {
            return limit;
        }
        row += 1;
        sub_row = 0;
    }
}

fn retreat(content: &Content, viewport: &Viewport, from: Position, by: usize) -> Position {
    if viewport.chop_long_lines {
        return (from.0.saturating_sub(by), 0);
    }

    let (mut row, mut sub_row) = from;
    let mut left = by;
    loop {
        if left <= sub_row {
            return (row, sub_row - left);
        }
        left -= sub_row + 1;
        if row == 0 {
            return (0, 0);
        }
        row -= 1;
        sub_row = row_height(content, viewport, row) - 1;
    }
}

fn move_to(viewport: &mut Viewport, target: Position) -> Motion {
    if target == viewport.position() {
        return Motion::Blocked;
    }
    viewport.set_position(target);
    Motion::Moved
}

/// Move forward `offset` visual rows.
///
/// Blocked when `offset` is 0 or the viewport is already at the EOF
/// position. With `ignore_eof` the bound is the final visual row instead,
/// so the frame may scroll past the end of content.
pub fn line_forward(content: &Content, viewport: &mut Viewport, offset: usize, ignore_eof: bool) -> Motion {
    let limit = if ignore_eof {
        last_position(content, viewport)
    } else {
        eof_position(content, viewport)
    };
    let current = viewport.position();
    if offset == 0 || current >= limit {
        return Motion::Blocked;
    }
    let target = advance(content, viewport, current, offset, limit);
    move_to(viewport, target)
}

/// Move backward `offset` visual rows, stopping at the first line.
pub fn line_backward(content: &Content, viewport: &mut Viewport, offset: usize) -> Motion {
    let current = viewport.position();
    if offset == 0 || current == (0, 0) {
        return Motion::Blocked;
    }
    let target = retreat(content, viewport, current, offset);
    move_to(viewport, target)
}

/// Explicit count, else a sticky value when set, else the default.
fn pick(count: Option<usize>, sticky: usize, default: usize) -> usize {
    count
        .or((sticky > 0).then_some(sticky))
        .unwrap_or(default)
}

/// Forward one window: `count` rows, else `set_window`, else `window - 1`.
pub fn window_forward(
    content: &Content,
    viewport: &mut Viewport,
    count: Option<usize>,
    ignore_eof: bool,
) -> Motion {
    let offset = pick(count, viewport.set_window, viewport.page_rows());
    line_forward(content, viewport, offset, ignore_eof)
}

/// Backward one window.
pub fn window_backward(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    let offset = pick(count, viewport.set_window, viewport.page_rows());
    line_backward(content, viewport, offset)
}

/// Forward one window after making `count` the sticky window size.
pub fn set_window_forward(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    if let Some(n) = count {
        viewport.set_window = n;
    }
    window_forward(content, viewport, None, false)
}

/// Backward one window after making `count` the sticky window size.
pub fn set_window_backward(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    if let Some(n) = count {
        viewport.set_window = n;
    }
    window_backward(content, viewport, None)
}

/// Forward half a window after making `count` the sticky half-window size.
pub fn set_half_window_forward(
    content: &Content,
    viewport: &mut Viewport,
    count: Option<usize>,
) -> Motion {
    if let Some(n) = count {
        viewport.set_half_window = n;
    }
    let offset = pick(None, viewport.set_half_window, viewport.half_window);
    line_forward(content, viewport, offset, false)
}

/// Backward half a window after making `count` the sticky half-window size.
pub fn set_half_window_backward(
    content: &Content,
    viewport: &mut Viewport,
    count: Option<usize>,
) -> Motion {
    if let Some(n) = count {
        viewport.set_half_window = n;
    }
    let offset = pick(None, viewport.set_half_window, viewport.half_window);
    line_backward(content, viewport, offset)
}

/// Scroll right by `set_col`, else half the screen width.
///
/// Wrap mode has no horizontal offset, so this is always blocked there.
pub fn set_half_screen_right(viewport: &mut Viewport, count: Option<usize>) -> Motion {
    if !viewport.chop_long_lines {
        return Motion::Blocked;
    }
    if let Some(n) = count {
        viewport.set_col = n;
    }
    let step = pick(None, viewport.set_col, viewport.half_screen_width);
    if step == 0 {
        return Motion::Blocked;
    }
    viewport.col += step;
    Motion::Moved
}

/// Scroll left by `set_col`, else half the screen width, stopping at 0.
pub fn set_half_screen_left(viewport: &mut Viewport, count: Option<usize>) -> Motion {
    if !viewport.chop_long_lines {
        return Motion::Blocked;
    }
    if let Some(n) = count {
        viewport.set_col = n;
    }
    if viewport.col == 0 {
        return Motion::Blocked;
    }
    let step = pick(None, viewport.set_col, viewport.half_screen_width).max(1);
    viewport.col = viewport.col.saturating_sub(step);
    Motion::Moved
}

/// Scroll back to the first column.
pub fn first_col(viewport: &mut Viewport) -> Motion {
    if viewport.col == 0 {
        return Motion::Blocked;
    }
    viewport.col = 0;
    Motion::Moved
}

/// Scroll right until the end of the widest line on screen is visible.
pub fn last_col(content: &Content, viewport: &mut Viewport) -> Motion {
    if !viewport.chop_long_lines {
        return Motion::Blocked;
    }
    let target = max_visible_width(content, viewport).saturating_sub(viewport.screen_width);
    if target == viewport.col {
        return Motion::Blocked;
    }
    viewport.col = target;
    Motion::Moved
}

/// Jump so that 0-based line `row` is at the top, clamped to the EOF position.
fn goto_row(content: &Content, viewport: &mut Viewport, row: usize) -> Motion {
    let target = (row.min(content.last_index()), 0).min(eof_position(content, viewport));
    move_to(viewport, target)
}

/// Go to line `count` (1-based), default the first line.
pub fn first_line(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    goto_row(content, viewport, count.unwrap_or(1).saturating_sub(1))
}

/// Go to line `count` (1-based), default the end of content.
pub fn last_line(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    match count {
        Some(n) => goto_row(content, viewport, n.saturating_sub(1)),
        None => {
            let target = eof_position(content, viewport);
            move_to(viewport, target)
        }
    }
}

/// Go to `count` percent into the content, default the beginning.
pub fn percent_line(content: &Content, viewport: &mut Viewport, count: Option<usize>) -> Motion {
    let percent = count.unwrap_or(0).min(100);
    let row = content.len() * percent / 100;
    goto_row(content, viewport, row)
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
