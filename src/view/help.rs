//! Help screen text.
//!
//! The help screen is ordinary [`Content`]: it is paged with the same layout
//! and navigation as the user's input, so it only needs to be built once.

use crate::config::KeyBindings;
use crate::model::{Content, KeyAction};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Width of the key column, before the description.
const KEY_COLUMN: usize = 24;

type Section = (&'static str, &'static [(KeyAction, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "MOVING",
        &[
            (KeyAction::LineForward, "Forward  one line   (or N lines)."),
            (KeyAction::LineBackward, "Backward one line   (or N lines)."),
            (KeyAction::WindowForward, "Forward  one window (or N lines)."),
            (KeyAction::WindowBackward, "Backward one window (or N lines)."),
            (KeyAction::NoEofWindowForward, "Forward  one window, and don't stop at end-of-file."),
            (KeyAction::SetWindowForward, "Forward  one window (and set window to N)."),
            (KeyAction::SetWindowBackward, "Backward one window (and set window to N)."),
            (KeyAction::SetHalfWindowForward, "Forward  one half-window (and set half-window to N)."),
            (KeyAction::SetHalfWindowBackward, "Backward one half-window (and set half-window to N)."),
            (KeyAction::SetHalfScreenRight, "Right one half screen width (or N positions)."),
            (KeyAction::SetHalfScreenLeft, "Left  one half screen width (or N positions)."),
            (KeyAction::LastCol, "Right to last column displayed."),
            (KeyAction::FirstCol, "Left  to first column."),
        ],
    ),
    (
        "JUMPING",
        &[
            (KeyAction::FirstLine, "Go to first line in file (or line N)."),
            (KeyAction::LastLine, "Go to last line in file (or line N)."),
            (KeyAction::PercentLine, "Go to beginning of file (or N percent into file)."),
        ],
    ),
    (
        "MISCELLANEOUS",
        &[
            (KeyAction::Repaint, "Repaint screen."),
            (KeyAction::DropInputRepaint, "Repaint screen, discarding buffered input."),
            (KeyAction::CurrentInfo, "Print current file name and position."),
            (KeyAction::Version, "Print version number of minipager."),
            (KeyAction::Help, "Display this help."),
            (KeyAction::Exit, "Exit (or leave this help)."),
            (KeyAction::ForceExit, "Exit immediately."),
        ],
    ),
];

/// Build the help text for the given bindings.
///
/// Actions with no bound key are left out. Commands that accept a numeric
/// prefix are marked with `*`.
pub fn help_content(bindings: &KeyBindings) -> Content {
    let mut lines = vec![
        String::new(),
        format!("{BOLD}                   SUMMARY OF MINIPAGER COMMANDS{RESET}"),
        String::new(),
        "      Commands marked with * may be preceded by a number, N.".to_string(),
        "      A prefix of 0 or no prefix counts as 1.".to_string(),
    ];

    for (title, entries) in SECTIONS {
        let rows: Vec<String> = entries
            .iter()
            .filter_map(|(action, description)| entry_line(bindings, *action, description))
            .collect();
        if rows.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{BOLD}  {title}{RESET}"));
        lines.push(String::new());
        lines.extend(rows);
    }

    lines.push(String::new());
    Content::new(lines)
}

fn entry_line(bindings: &KeyBindings, action: KeyAction, description: &str) -> Option<String> {
    let keys = bindings.keys_for(action);
    if keys.is_empty() {
        return None;
    }
    let marker = if action.takes_count() { '*' } else { ' ' };
    let keys = format!("  {}", keys.join("  "));
    Some(format!("{keys:<width$} {marker} {description}", width = KEY_COLUMN))
}
