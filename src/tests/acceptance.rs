//! End-to-end scenarios: keys in, frames out, no terminal.

use crate::config::KeyBindings;
use crate::model::Content;
use crate::state::{Dispatcher, Outcome, PagerState};
use crate::tests::fixtures::{numbered, sample, viewport};
use crate::view::{compose, help_content};
use crate::view_state::layout::{END_MARKER, MORE_MARKER};
use crate::view_state::text::inverse;

/// A session wired the way `run_with_source` wires it.
struct Session {
    dispatcher: Dispatcher,
    state: PagerState,
}

impl Session {
    fn new(content: Content, chop: bool) -> Self {
        let bindings = KeyBindings::default();
        let help = help_content(&bindings);
        Self {
            dispatcher: Dispatcher::new(bindings, help),
            state: PagerState::new(content, viewport(chop)),
        }
    }

    fn press(&mut self, keys: &[&str]) -> Outcome {
        let mut last = Outcome::Ignore;
        for key in keys {
            last = self.dispatcher.handle_key(&mut self.state, key);
        }
        last
    }

    fn frame(&mut self) -> Vec<String> {
        compose(&mut self.state)
    }
}

#[test]
fn short_content_shows_end_after_last_line() {
    let mut session = Session::new(numbered(6), true);
    let frame = session.frame();
    assert_eq!(frame.len(), 7);
    assert_eq!(frame[5], "line 6");
    assert_eq!(frame[6], END_MARKER);

    assert_eq!(session.press(&["j"]), Outcome::Bell);
    assert_eq!(session.press(&[" "]), Outcome::Bell);
    assert_eq!(session.state.viewport.row, 0);
}

#[test]
fn huge_forward_in_chop_mode_stops_at_last_full_frame() {
    let mut session = Session::new(sample(), true);
    session.frame();
    assert_eq!(session.press(&["9", "9", "9", "9", "j"]), Outcome::Redraw);

    let frame = session.frame();
    assert_eq!(frame.len(), 24);
    assert!(frame[0].starts_with("28 Lorem ipsum"), "got {:?}", frame[0]);
    assert!(frame[0].ends_with(MORE_MARKER));
    assert_eq!(frame[22], "50 THE END");
    assert_eq!(frame[23], END_MARKER);
}

#[test]
fn huge_forward_in_wrap_mode_ends_on_last_sub_row() {
    let mut session = Session::new(sample(), false);
    session.frame();
    session.press(&["G"]);

    let frame = session.frame();
    assert!(frame[0].starts_with("32 The line number 32"), "got {:?}", frame[0]);
    assert_eq!(frame[22], "50 THE END");
    assert_eq!(frame[23], END_MARKER);
}

#[test]
fn numeric_prefix_twelve_moves_twelve_lines() {
    let mut session = Session::new(sample(), true);
    session.press(&["1", "2"]);
    assert_eq!(session.frame().last().map(String::as_str), Some(":12"));

    session.press(&["j"]);
    let frame = session.frame();
    assert!(frame[0].starts_with("13 1234567890"), "got {:?}", frame[0]);
    assert_eq!(frame.last().map(String::as_str), Some(":"));
}

#[test]
fn zero_prefix_moves_one_line() {
    let mut session = Session::new(sample(), true);
    session.press(&["0", "j"]);
    assert_eq!(session.state.viewport.row, 1);
}

#[test]
fn typing_a_prefix_at_end_hides_the_marker() {
    let mut session = Session::new(numbered(6), true);
    session.press(&["3"]);
    let frame = session.frame();
    assert!(!frame.contains(&END_MARKER.to_string()));
    assert_eq!(frame.last().map(String::as_str), Some(":3"));
}

#[test]
fn resize_discards_prefix_and_redraws_with_filler() {
    let mut session = Session::new(sample(), true);
    session.frame();
    session.press(&["1", "2"]);

    let outcome = session.dispatcher.handle_resize(&mut session.state, 10, 40);
    assert_eq!(outcome, Outcome::Redraw);
    assert!(session.state.prefix().is_empty());
    assert!(!session.state.frame.init);

    session.press(&["j"]);
    assert_eq!(session.state.viewport.row, 1);
    assert_eq!(session.frame().len(), 10);
}

#[test]
fn help_round_trip_restores_position() {
    let mut session = Session::new(sample(), true);
    session.press(&["5", "j"]);
    let before = session.frame();

    session.press(&["h"]);
    assert!(session.state.in_help());
    let help = session.frame();
    assert!(help.iter().any(|row| row.contains("SUMMARY OF MINIPAGER COMMANDS")));

    session.press(&["j"]);
    assert_eq!(session.press(&["q"]), Outcome::Redraw);
    assert!(!session.state.in_help());
    assert_eq!(session.state.viewport.row, 5);
    assert_eq!(session.frame(), before);

    assert_eq!(session.press(&["q"]), Outcome::Quit);
}

#[test]
fn info_message_replaces_prompt_once() {
    let mut session = Session::new(sample(), true);
    session.press(&["="]);
    let frame = session.frame();
    assert_eq!(frame[23], inverse("lines 1-23/50 46%"));

    session.press(&["r"]);
    assert_eq!(session.frame()[23], ":");
}

#[test]
fn version_message() {
    let mut session = Session::new(sample(), true);
    session.press(&["V"]);
    let expected = format!("minipager version {}", env!("CARGO_PKG_VERSION"));
    assert_eq!(session.frame()[23], inverse(&expected));
}

#[test]
fn line_of_exact_screen_width_is_unchanged() {
    let line = "x".repeat(80);
    let mut session = Session::new(Content::new(vec![line.clone(), "next".into()]), true);
    assert_eq!(session.frame()[0], line);
}

#[test]
fn unknown_key_rings_bell_and_clears_prefix() {
    let mut session = Session::new(sample(), true);
    session.press(&["4"]);
    assert_eq!(session.press(&["/"]), Outcome::Bell);
    assert!(session.state.prefix().is_empty());
    assert_eq!(session.state.viewport.row, 0);
}
