//! Key and resize handling for one pager session.
//!
//! Every event is handled to completion before the next one: digits feed the
//! numeric prefix, other keys are resolved through the binding table and run
//! against the [`PagerState`], and the returned [`Outcome`] tells the view
//! whether to redraw, ring the bell, or quit.

use tracing::{debug, warn};

use crate::config::KeyBindings;
use crate::model::{Content, KeyAction};
use crate::view_state::viewport::TerminalSize;

use super::app_state::PagerState;
use super::navigation::{self as nav, Motion};

/// What the view should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the full frame.
    Redraw,
    /// Ring the bell and leave the screen as it is.
    Bell,
    /// Nothing changed; leave the screen as it is.
    Ignore,
    /// End the session.
    Quit,
}

impl From<Motion> for Outcome {
    fn from(motion: Motion) -> Self {
        match motion {
            Motion::Moved => Outcome::Redraw,
            Motion::Blocked => Outcome::Bell,
        }
    }
}

/// Routes key tokens to pager commands.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bindings: KeyBindings,
    help: Content,
}

impl Dispatcher {
    /// Dispatch with `bindings`, showing `help` for the help command.
    pub fn new(bindings: KeyBindings, help: Content) -> Self {
        Self { bindings, help }
    }

    /// Handle one decoded key.
    pub fn handle_key(&self, state: &mut PagerState, key: &str) -> Outcome {
        state.clear_message();

        if let Some(digit) = single_digit(key) {
            state.push_digit(digit);
            return Outcome::Redraw;
        }

        let Some(action) = self.bindings.get(key) else {
            debug!(key = ?key, "unbound key");
            state.take_count();
            return Outcome::Bell;
        };

        if action == KeyAction::Backspace && state.pop_digit() {
            return Outcome::Redraw;
        }

        let count = state.take_count();
        if action.takes_count() {
            debug!(?action, ?count, "dispatch");
        } else {
            debug!(?action, "dispatch");
        }
        self.run(state, action, count)
    }

    /// Adopt a new terminal size and redraw.
    ///
    /// Sizes too small for a frame are logged and ignored.
    pub fn handle_resize(&self, state: &mut PagerState, rows: u16, cols: u16) -> Outcome {
        match TerminalSize::new(rows, cols) {
            Ok(size) => {
                debug!(rows, cols, "resize");
                state.resize(size);
                Outcome::Redraw
            }
            Err(e) => {
                warn!(rows, cols, error = %e, "ignoring resize");
                Outcome::Ignore
            }
        }
    }

    fn run(&self, state: &mut PagerState, action: KeyAction, count: Option<usize>) -> Outcome {
        let content = state.content().clone();
        let vp = &mut state.viewport;

        match action {
            KeyAction::LineForward => {
                nav::line_forward(&content, vp, count.unwrap_or(1), false).into()
            }
            KeyAction::LineBackward => nav::line_backward(&content, vp, count.unwrap_or(1)).into(),
            KeyAction::WindowForward => nav::window_forward(&content, vp, count, false).into(),
            KeyAction::WindowBackward => nav::window_backward(&content, vp, count).into(),
            KeyAction::SetWindowForward => nav::set_window_forward(&content, vp, count).into(),
            KeyAction::SetWindowBackward => nav::set_window_backward(&content, vp, count).into(),
            KeyAction::NoEofWindowForward => nav::window_forward(&content, vp, count, true).into(),
            KeyAction::SetHalfWindowForward => {
                nav::set_half_window_forward(&content, vp, count).into()
            }
            KeyAction::SetHalfWindowBackward => {
                nav::set_half_window_backward(&content, vp, count).into()
            }
            KeyAction::SetHalfScreenRight => nav::set_half_screen_right(vp, count).into(),
            KeyAction::SetHalfScreenLeft => nav::set_half_screen_left(vp, count).into(),
            KeyAction::LastCol => nav::last_col(&content, vp).into(),
            KeyAction::FirstCol => nav::first_col(vp).into(),
            KeyAction::FirstLine => nav::first_line(&content, vp, count).into(),
            KeyAction::LastLine => nav::last_line(&content, vp, count).into(),
            KeyAction::PercentLine => nav::percent_line(&content, vp, count).into(),
            KeyAction::Repaint | KeyAction::DropInputRepaint => Outcome::Redraw,
            KeyAction::CurrentInfo => {
                let info = position_info(state);
                state.set_message(info);
                Outcome::Redraw
            }
            KeyAction::Version => {
                state.set_message(format!("minipager version {}", env!("CARGO_PKG_VERSION")));
                Outcome::Redraw
            }
            KeyAction::Help => {
                state.enter_help(self.help.clone());
                Outcome::Redraw
            }
            KeyAction::Exit => {
                if state.leave_help() {
                    Outcome::Redraw
                } else {
                    Outcome::Quit
                }
            }
            KeyAction::ForceExit => Outcome::Quit,
            // Reached only with an empty prefix.
            KeyAction::Backspace => Outcome::Bell,
        }
    }
}

fn single_digit(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

/// `lines A-B/TOTAL P%`, or with `(END)` in place of the percentage.
fn position_info(state: &PagerState) -> String {
    let content = state.content();
    let vp = &state.viewport;
    let first = vp.row + 1;
    let last = nav::bottom_row(content, vp) + 1;
    let total = content.len();
    if nav::at_eof(content, vp) {
        format!("lines {first}-{last}/{total} (END)")
    } else {
        format!("lines {first}-{last}/{total} {}%", last * 100 / total)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
