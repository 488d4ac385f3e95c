//! Read-once file input.

use crate::model::error::InputError;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file as text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn read_file(path: &Path) -> Result<String, InputError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(InputError::Io(e)),
    }
}
