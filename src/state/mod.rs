//! Pager state machine (pure).
//!
//! All state transitions are plain functions over [`PagerState`], testable
//! without a terminal.
//!
//! - `navigation`: scroll motions and the end-of-content clamp
//! - `app_state`: the session record, numeric prefix and help overlay
//! - `dispatch`: routes decoded keys and resizes to the above

pub mod app_state;
pub mod dispatch;
pub mod navigation;

// Re-export for convenience
pub use app_state::{Overlay, PagerState, PrefixBuffer, Snapshot};
pub use dispatch::{Dispatcher, Outcome};
pub use navigation::{Motion, Position};
