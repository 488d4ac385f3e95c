//! Scroll position and window geometry.

use crate::model::GeometryError;

/// Terminal dimensions that are known to be able to host a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    rows: u16,
    cols: u16,
}

impl TerminalSize {
    /// Validate raw dimensions: at least 2 rows and 1 column.
    pub fn new(rows: u16, cols: u16) -> Result<Self, GeometryError> {
        if rows < 2 {
            return Err(GeometryError::TooShort { rows });
        }
        if cols == 0 {
            return Err(GeometryError::TooNarrow);
        }
        Ok(Self { rows, cols })
    }

    /// Row count.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> u16 {
        self.cols
    }
}

impl Default for TerminalSize {
    /// The classic 24x80 terminal.
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// The mutable scroll record shared by layout and navigation.
///
/// `window` counts terminal rows including the prompt row, so a frame holds
/// `window - 1` content rows. The `set_*` fields are sticky user overrides;
/// `0` means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first content line shown.
    pub row: usize,
    /// Wrapped sub-row of `row` shown first. Always 0 in chop mode.
    pub sub_row: usize,
    /// Horizontal scroll in columns (chop mode only).
    pub col: usize,
    /// Sticky horizontal scroll amount.
    pub set_col: usize,
    /// Terminal rows.
    pub window: usize,
    /// Sticky window scroll amount.
    pub set_window: usize,
    /// Half of `window`.
    pub half_window: usize,
    /// Sticky half-window scroll amount.
    pub set_half_window: usize,
    /// Terminal columns.
    pub screen_width: usize,
    /// Half of `screen_width`.
    pub half_screen_width: usize,
    /// Truncate long lines instead of wrapping them.
    pub chop_long_lines: bool,
    /// Indent width used when pretty-printing structured input.
    pub indentation: usize,
    /// Leading prefix digits hidden so the prompt fits on one row.
    pub buffer_offset: usize,
}

impl Viewport {
    /// A viewport at the top of the content, sized for `size`.
    pub fn new(size: TerminalSize, chop_long_lines: bool, indentation: usize) -> Self {
        let mut viewport = Self {
            row: 0,
            sub_row: 0,
            col: 0,
            set_col: 0,
            window: 0,
            set_window: 0,
            half_window: 0,
            set_half_window: 0,
            screen_width: 0,
            half_screen_width: 0,
            chop_long_lines,
            indentation,
            buffer_offset: 0,
        };
        viewport.apply_size(size);
        viewport
    }

    /// Adopt new terminal dimensions, keeping the scroll position.
    pub fn apply_size(&mut self, size: TerminalSize) {
        self.window = usize::from(size.rows());
        self.half_window = self.window / 2;
        self.screen_width = usize::from(size.cols());
        self.half_screen_width = self.screen_width / 2;
    }

    /// Content rows per frame.
    pub fn page_rows(&self) -> usize {
        self.window - 1
    }

    /// Current `(row, sub_row)` position.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.sub_row)
    }

    /// Jump to `(row, sub_row)`.
    pub fn set_position(&mut self, (row, sub_row): (usize, usize)) {
        self.row = row;
        self.sub_row = if self.chop_long_lines { 0 } else { sub_row };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_size_rejects_single_row() {
        assert_eq!(
            TerminalSize::new(1, 80),
            Err(GeometryError::TooShort { rows: 1 })
        );
        assert_eq!(TerminalSize::new(2, 0), Err(GeometryError::TooNarrow));
        assert!(TerminalSize::new(2, 1).is_ok());
    }

    #[test]
    fn new_viewport_derives_halves() {
        let size = TerminalSize::new(25, 81).unwrap();
        let vp = Viewport::new(size, true, 2);
        assert_eq!(vp.window, 25);
        assert_eq!(vp.half_window, 12);
        assert_eq!(vp.screen_width, 81);
        assert_eq!(vp.half_screen_width, 40);
        assert_eq!(vp.page_rows(), 24);
        assert_eq!(vp.position(), (0, 0));
    }

    #[test]
    fn apply_size_keeps_position_and_sticky_values() {
        let mut vp = Viewport::new(TerminalSize::default(), false, 2);
        vp.row = 7;
        vp.sub_row = 1;
        vp.set_window = 5;
        vp.apply_size(TerminalSize::new(10, 40).unwrap());
        assert_eq!(vp.position(), (7, 1));
        assert_eq!(vp.set_window, 5);
        assert_eq!(vp.half_window, 5);
        assert_eq!(vp.half_screen_width, 20);
    }

    #[test]
    fn set_position_ignores_sub_row_in_chop_mode() {
        let mut vp = Viewport::new(TerminalSize::default(), true, 2);
        vp.set_position((3, 2));
        assert_eq!(vp.position(), (3, 0));
    }
}
