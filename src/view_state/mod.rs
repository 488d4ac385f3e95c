//! View-state layer - geometry, text measurement and frame layout
//!
//! # Module Structure
//!
//! - `text`: style-code and grapheme tokenizing, display widths
//! - `viewport`: terminal size and the scroll record
//! - `layout`: content lines to frame rows (chop and wrap)

pub mod layout;
pub mod text;
pub mod viewport;

pub use layout::{layout, FrameState};
pub use viewport::{TerminalSize, Viewport};
