//! Snapshot tests for composed frames.
//!
//! Marker escape sequences are spelled out so the snapshots stay readable.

use crate::state::PagerState;
use crate::tests::fixtures::{sample, sized_viewport};
use crate::view::compose;
use crate::view_state::layout::{END_MARKER, FILLER, MORE_MARKER};

fn frame_to_string(state: &mut PagerState) -> String {
    compose(state)
        .into_iter()
        .map(|row| {
            row.replace(MORE_MARKER, "<more>")
                .replace(END_MARKER, "<end>")
                .replace(FILLER, "<~>")
                .replace('\x1b', "ESC")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn chop_frame_truncates_wide_text() {
    let mut state = PagerState::new(sample(), sized_viewport(6, 20, true));
    insta::assert_snapshot!(frame_to_string(&mut state), @r"
    1 A
    2 ABCD
    3 你好
    4 Lorem ipsum dolor<more>
    5 Hello こんにちは <more>
    :
    ");
}

#[test]
fn wrap_frame_splits_long_lines() {
    let mut state = PagerState::new(sample(), sized_viewport(6, 20, false));
    state.viewport.set_position((5, 0));
    insta::assert_snapshot!(frame_to_string(&mut state), @r"
    6 abcdefghijklmnopqr
    stuvwxyzABCDEFGHIJKL
    MNOPQRSTUVWXYZ012345
    6789
    7 这是一段中文，用于
    :
    ");
}
