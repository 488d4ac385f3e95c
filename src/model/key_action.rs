//! Pager commands independent of the keys that trigger them.

use serde::Deserialize;

/// Commands the dispatcher knows how to run.
///
/// These represent user intent, not specific keys. The mapping from raw key
/// sequences to `KeyAction` is held by [`KeyBindings`](crate::config::KeyBindings)
/// and can be overridden per action in the config file, using the snake_case
/// variant name (e.g. `line_forward = ["j", "\u001b[B"]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    // Vertical movement
    /// Forward N lines, default 1. Default: e ^E j ^N CR ↓
    LineForward,
    /// Backward N lines, default 1. Default: y ^Y k ^K ^P ↑
    LineBackward,
    /// Forward one window (or N lines). Default: f ^F ^V SPACE
    WindowForward,
    /// Backward one window (or N lines). Default: b ^B ESC-v
    WindowBackward,
    /// Forward one window, and set the window size to N. Default: z
    SetWindowForward,
    /// Backward one window, and set the window size to N. Default: w
    SetWindowBackward,
    /// Forward one window, scrolling past end of file. Default: ESC-SPACE
    NoEofWindowForward,
    /// Forward half a window, and set half-window size to N. Default: d ^D
    SetHalfWindowForward,
    /// Backward half a window, and set half-window size to N. Default: u ^U
    SetHalfWindowBackward,

    // Horizontal movement (chop mode only)
    /// Right half a screen width, and set the scroll amount to N. Default: ESC-) →
    SetHalfScreenRight,
    /// Left half a screen width, and set the scroll amount to N. Default: ESC-( ←
    SetHalfScreenLeft,
    /// Scroll right so the end of the longest displayed line is visible. Default: ESC-} ^→
    LastCol,
    /// Scroll back to the first column. Default: ESC-{ ^←
    FirstCol,

    // Jumping
    /// Go to line N, default the first line. Default: g < ESC-<
    FirstLine,
    /// Go to line N, default the last line. Default: G > ESC->
    LastLine,
    /// Go to N percent into the content. Default: p %
    PercentLine,

    // Display
    /// Redraw the screen. Default: r ^R ^L
    Repaint,
    /// Redraw the screen, discarding a pending numeric prefix. Default: R
    DropInputRepaint,
    /// Show position information in the prompt line. Default: = ^G
    CurrentInfo,
    /// Show the version in the prompt line. Default: V
    Version,

    // Session
    /// Show the command summary. Default: h H
    Help,
    /// Leave help, or quit when not in help. Default: q Q
    Exit,
    /// Quit unconditionally, even from help. Default: ^C
    ForceExit,
    /// Remove the last digit of the numeric prefix. Default: BACKSPACE DEL
    Backspace,
}

impl KeyAction {
    /// Whether this action moves the viewport and so accepts a numeric prefix.
    pub fn takes_count(self) -> bool {
        !matches!(
            self,
            KeyAction::Repaint
                | KeyAction::DropInputRepaint
                | KeyAction::CurrentInfo
                | KeyAction::Version
                | KeyAction::Help
                | KeyAction::Exit
                | KeyAction::ForceExit
                | KeyAction::Backspace
        )
    }
}
