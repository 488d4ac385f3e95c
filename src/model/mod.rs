//! Domain model types (pure).
//!
//! Content, key actions and the error taxonomy. Nothing here touches the
//! terminal.

pub mod content;
pub mod error;
pub mod key_action;

pub use content::Content;
pub use error::{AppError, GeometryError, InputError};
pub use key_action::KeyAction;
