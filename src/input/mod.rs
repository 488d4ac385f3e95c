//! Keyboard input: raw tty bytes to key tokens.
//!
//! - `tty`: opens an interactive terminal and pumps its bytes from a
//!   dedicated thread into a tokio channel
//! - `decoder`: turns that byte stream into key tokens, using a timeout to
//!   tell a lone ESC from the start of an escape sequence

pub mod decoder;
pub mod tty;

pub use decoder::KeyDecoder;
pub use tty::{open_keyboard, spawn_reader_thread, ByteReceiver, ByteSender, ReadResult};
