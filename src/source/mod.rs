//! Content sources.
//!
//! This module turns the command line's input into pageable [`Content`]:
//! - `file`: read a named file
//! - `stdin`: read piped standard input to the end
//! - `normalize`: JSON pretty-printing, line splitting and tab expansion

use crate::model::error::InputError;
use crate::model::Content;
use std::io::IsTerminal;
use std::path::PathBuf;

pub mod file;
pub mod normalize;
pub mod stdin;

pub use normalize::{expand_tabs, normalize, NormalizeOptions};

/// Where the content comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file named on the command line.
    File(PathBuf),
    /// Piped standard input.
    Stdin,
}

impl InputSource {
    /// Read the whole source as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished, or
    /// `InputError::Io` for other read failures.
    pub fn read_text(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => file::read_file(path),
            InputSource::Stdin => stdin::read_stdin(),
        }
    }

    /// Read and normalize the source into pageable lines.
    ///
    /// # Errors
    ///
    /// As [`InputSource::read_text`], plus `InputError::Json` when JSON
    /// formatting was requested and the text is not JSON.
    pub fn load(&self, options: &NormalizeOptions) -> Result<Content, InputError> {
        let text = self.read_text()?;
        normalize(&text, options)
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: it must exist
/// 2. If stdin is piped: use stdin
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a
/// terminal. Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path.exists() => Ok(InputSource::File(path)),
        Some(path) => Err(InputError::FileNotFound { path }),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
