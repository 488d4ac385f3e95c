//! Piped standard input.
//!
//! The whole stream is read before paging starts; keystrokes come from the
//! terminal, not from stdin.

use crate::model::error::InputError;
use std::io::Read;

/// Read piped stdin to the end.
///
/// # Errors
///
/// Returns `InputError::Io` for I/O errors.
pub fn read_stdin() -> Result<String, InputError> {
    read_all(std::io::stdin().lock())
}

/// Read any reader to the end, replacing invalid UTF-8.
///
/// # Errors
///
/// Returns `InputError::Io` for I/O errors.
pub fn read_all<R: Read>(mut reader: R) -> Result<String, InputError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
