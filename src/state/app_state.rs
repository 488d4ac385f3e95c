//! Pager session state.
//!
//! [`PagerState`] owns everything a key press can change: the content being
//! paged, the viewport, the frame flags, the numeric prefix and the help
//! overlay. It is mutated only by the dispatcher, one event at a time.

use crate::model::Content;
use crate::view_state::layout::FrameState;
use crate::view_state::viewport::{TerminalSize, Viewport};

use super::navigation::clamp_position;

/// Digits typed before a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixBuffer {
    digits: String,
}

impl PrefixBuffer {
    /// Append one digit.
    pub fn push(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        self.digits.push(digit);
    }

    /// Remove the last digit. Returns false when there was none.
    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    /// Forget all digits.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// True when no digit has been typed.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digits as typed.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The repeat count, or `None` when empty, zero or too large.
    pub fn count(&self) -> Option<usize> {
        self.digits.parse::<usize>().ok().filter(|n| *n > 0)
    }
}

/// Everything the help overlay replaces, kept for restoring on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    content: Content,
    viewport: Viewport,
    frame: FrameState,
}

/// Whether help is covering the paged content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Paging the user's content.
    None,
    /// Paging help text; the user's content is saved in the snapshot.
    Help(Box<Snapshot>),
}

/// The whole mutable state of a pager session.
#[derive(Debug, Clone)]
pub struct PagerState {
    content: Content,
    /// Scroll position and geometry.
    pub viewport: Viewport,
    /// Frame flags updated by layout.
    pub frame: FrameState,
    overlay: Overlay,
    prefix: PrefixBuffer,
    message: Option<String>,
}

impl PagerState {
    /// Start a session at the top of `content`.
    pub fn new(content: Content, viewport: Viewport) -> Self {
        Self {
            content,
            viewport,
            frame: FrameState::default(),
            overlay: Overlay::None,
            prefix: PrefixBuffer::default(),
            message: None,
        }
    }

    /// Content currently on screen (help text while in help).
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// True while the help overlay is shown.
    pub fn in_help(&self) -> bool {
        matches!(self.overlay, Overlay::Help(_))
    }

    /// The numeric prefix typed so far.
    pub fn prefix(&self) -> &PrefixBuffer {
        &self.prefix
    }

    /// Append a prefix digit.
    pub fn push_digit(&mut self, digit: char) {
        self.prefix.push(digit);
        self.frame.buffering = true;
    }

    /// Remove the last prefix digit. Returns false when the prefix was empty.
    pub fn pop_digit(&mut self) -> bool {
        let popped = self.prefix.pop();
        self.frame.buffering = !self.prefix.is_empty();
        popped
    }

    /// Consume the prefix as a repeat count.
    pub fn take_count(&mut self) -> Option<usize> {
        let count = self.prefix.count();
        self.prefix.clear();
        self.frame.buffering = false;
        count
    }

    /// One-shot message shown instead of the prompt.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Show `message` on the next frame.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Drop any pending message.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Replace the content with `help`, saving the current session.
    ///
    /// Returns false when help is already shown.
    pub fn enter_help(&mut self, help: Content) -> bool {
        if self.in_help() {
            return false;
        }
        let size = self.terminal_size();
        let fresh = Viewport::new(size, false, self.viewport.indentation);
        let snapshot = Snapshot {
            content: std::mem::replace(&mut self.content, help),
            viewport: std::mem::replace(&mut self.viewport, fresh),
            frame: std::mem::take(&mut self.frame),
        };
        self.overlay = Overlay::Help(Box::new(snapshot));
        true
    }

    /// Restore the session saved by [`enter_help`](Self::enter_help).
    ///
    /// Geometry changes made while in help are carried over. Returns false
    /// when help was not shown.
    pub fn leave_help(&mut self) -> bool {
        let Overlay::Help(snapshot) = std::mem::replace(&mut self.overlay, Overlay::None) else {
            return false;
        };
        let Snapshot {
            content,
            viewport,
            frame,
        } = *snapshot;
        let size = self.terminal_size();
        let resized = viewport.window != self.viewport.window
            || viewport.screen_width != self.viewport.screen_width;

        self.content = content;
        self.viewport = viewport;
        self.frame = frame;
        if resized {
            self.viewport.apply_size(size);
            clamp_position(&self.content, &mut self.viewport);
            self.frame.init = false;
        }
        self.frame.buffering = !self.prefix.is_empty();
        true
    }

    /// Adopt new terminal dimensions.
    ///
    /// A pending prefix is discarded and filler rows are enabled.
    pub fn resize(&mut self, size: TerminalSize) {
        self.viewport.apply_size(size);
        clamp_position(&self.content, &mut self.viewport);
        self.prefix.clear();
        self.frame.buffering = false;
        self.frame.init = false;
    }

    fn terminal_size(&self) -> TerminalSize {
        let rows = u16::try_from(self.viewport.window).unwrap_or(u16::MAX);
        let cols = u16::try_from(self.viewport.screen_width).unwrap_or(u16::MAX);
        TerminalSize::new(rows, cols).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
