//! Key binding table: raw key sequences to pager commands.

use crate::model::key_action::KeyAction;
use std::collections::HashMap;

/// Built-in bindings, following `less` defaults.
const DEFAULT_BINDINGS: &[(&str, KeyAction)] = &[
    // Lines
    ("e", KeyAction::LineForward),
    ("\x05", KeyAction::LineForward),
    ("j", KeyAction::LineForward),
    ("\x0e", KeyAction::LineForward),
    ("\r", KeyAction::LineForward),
    ("\n", KeyAction::LineForward),
    ("\x1b[B", KeyAction::LineForward),
    ("\x1bOB", KeyAction::LineForward),
    ("y", KeyAction::LineBackward),
    ("\x19", KeyAction::LineBackward),
    ("k", KeyAction::LineBackward),
    ("\x0b", KeyAction::LineBackward),
    ("\x10", KeyAction::LineBackward),
    ("\x1b[A", KeyAction::LineBackward),
    ("\x1bOA", KeyAction::LineBackward),
    // Windows
    ("f", KeyAction::WindowForward),
    ("\x06", KeyAction::WindowForward),
    ("\x16", KeyAction::WindowForward),
    (" ", KeyAction::WindowForward),
    ("\x1b[6~", KeyAction::WindowForward),
    ("b", KeyAction::WindowBackward),
    ("\x02", KeyAction::WindowBackward),
    ("\x1bv", KeyAction::WindowBackward),
    ("\x1b[5~", KeyAction::WindowBackward),
    ("z", KeyAction::SetWindowForward),
    ("w", KeyAction::SetWindowBackward),
    ("\x1b ", KeyAction::NoEofWindowForward),
    ("d", KeyAction::SetHalfWindowForward),
    ("\x04", KeyAction::SetHalfWindowForward),
    ("u", KeyAction::SetHalfWindowBackward),
    ("\x15", KeyAction::SetHalfWindowBackward),
    // Columns
    ("\x1b)", KeyAction::SetHalfScreenRight),
    ("\x1b[C", KeyAction::SetHalfScreenRight),
    ("\x1bOC", KeyAction::SetHalfScreenRight),
    ("\x1b(", KeyAction::SetHalfScreenLeft),
    ("\x1b[D", KeyAction::SetHalfScreenLeft),
    ("\x1bOD", KeyAction::SetHalfScreenLeft),
    ("\x1b}", KeyAction::LastCol),
    ("\x1b[1;5C", KeyAction::LastCol),
    ("\x1b{", KeyAction::FirstCol),
    ("\x1b[1;5D", KeyAction::FirstCol),
    // Jumps
    ("g", KeyAction::FirstLine),
    ("<", KeyAction::FirstLine),
    ("\x1b<", KeyAction::FirstLine),
    ("G", KeyAction::LastLine),
    (">", KeyAction::LastLine),
    ("\x1b>", KeyAction::LastLine),
    ("p", KeyAction::PercentLine),
    ("%", KeyAction::PercentLine),
    // Display
    ("r", KeyAction::Repaint),
    ("\x12", KeyAction::Repaint),
    ("\x0c", KeyAction::Repaint),
    ("R", KeyAction::DropInputRepaint),
    ("=", KeyAction::CurrentInfo),
    ("\x07", KeyAction::CurrentInfo),
    ("V", KeyAction::Version),
    // Session
    ("h", KeyAction::Help),
    ("H", KeyAction::Help),
    ("q", KeyAction::Exit),
    ("Q", KeyAction::Exit),
    ("\x03", KeyAction::ForceExit),
    ("\x7f", KeyAction::Backspace),
    ("\x08", KeyAction::Backspace),
];

/// Maps raw key sequences to pager commands.
///
/// Starts from the `less`-style defaults; the config file may replace the
/// keys of individual actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<String, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a decoded key.
    pub fn get(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Replace the keys of each listed action.
    ///
    /// Every key previously bound to an overridden action is unbound first.
    /// Keys use [`parse_key_notation`], so `"^F"` means Ctrl-F.
    pub fn with_overrides(mut self, overrides: &HashMap<KeyAction, Vec<String>>) -> Self {
        self.bindings
            .retain(|_, action| !overrides.contains_key(action));
        for (action, keys) in overrides {
            for key in keys {
                self.bindings.insert(parse_key_notation(key), *action);
            }
        }
        self
    }

    /// Keys bound to `action`, sorted, in display form.
    ///
    /// Sequences with the same display name (CSI and SS3 arrows) appear once.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| display_key(key))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| (key.to_string(), *action))
            .collect();
        Self { bindings }
    }
}

/// Turn `^X` caret notation into the control character; other text is literal.
pub fn parse_key_notation(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('^'), Some(c), None) if c.is_ascii_alphabetic() || "[\\]^_@".contains(c) => {
            char::from((c.to_ascii_uppercase() as u8) & 0x1f).to_string()
        }
        _ => key.to_string(),
    }
}

/// Human readable form of a raw key sequence, used by the help screen.
pub fn display_key(key: &str) -> String {
    match key {
        " " => "SPACE".to_string(),
        "\r" => "RETURN".to_string(),
        "\n" => "^J".to_string(),
        "\x7f" => "DEL".to_string(),
        "\x1b[A" | "\x1bOA" => "UP".to_string(),
        "\x1b[B" | "\x1bOB" => "DOWN".to_string(),
        "\x1b[C" | "\x1bOC" => "RIGHT".to_string(),
        "\x1b[D" | "\x1bOD" => "LEFT".to_string(),
        "\x1b[1;5C" => "^RIGHT".to_string(),
        "\x1b[1;5D" => "^LEFT".to_string(),
        "\x1b[5~" => "PGUP".to_string(),
        "\x1b[6~" => "PGDN".to_string(),
        "\x1b " => "ESC-SPACE".to_string(),
        _ => {
            if let Some(rest) = key.strip_prefix('\x1b') {
                return format!("ESC-{rest}");
            }
            key.chars()
                .map(|c| match c {
                    '\0'..='\x1f' => format!("^{}", char::from(c as u8 + b'@')),
                    _ => c.to_string(),
                })
                .collect()
        }
    }
}
