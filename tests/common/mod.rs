//! Shared helpers for integration tests.

use minipager::model::Content;
use minipager::view_state::{TerminalSize, Viewport};
use proptest::prelude::*;

/// A viewport with explicit geometry.
pub fn viewport(rows: u16, cols: u16, chop: bool) -> Viewport {
    Viewport::new(
        TerminalSize::new(rows, cols).expect("valid test geometry"),
        chop,
        2,
    )
}

/// Lines mixing ASCII, CJK and SGR codes.
pub fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z ]{1,12}",
            "[中文字符测试]{1,6}",
            Just("\x1b[32m".to_string()),
            Just("\x1b[0m".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

/// Non-empty content built from [`line_strategy`].
pub fn content_strategy() -> impl Strategy<Value = Content> {
    prop::collection::vec(line_strategy(), 1..60).prop_map(Content::new)
}
