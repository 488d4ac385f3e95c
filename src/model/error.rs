//! Error types for minipager.
//!
//! Errors are organised as a small `thiserror` hierarchy so that the binary
//! can propagate everything with `?`:
//!
//! - [`AppError`] - top-level error returned from `main`
//!   - [`InputError`] - content or keyboard input could not be obtained
//!   - [`GeometryError`] - the terminal is too small to page in
//!   - [`ConfigError`](crate::config::ConfigError) - unreadable or invalid config file
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing could not be set up
//!   - `std::io::Error` - terminal I/O failures
//!
//! Inside the pager loop, nothing is fatal except terminal I/O: unknown keys
//! and blocked movements only ring the bell.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to obtain content or an interactive keyboard.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Terminal geometry cannot host a pager frame.
    #[error("Unusable terminal: {0}")]
    Geometry(#[from] GeometryError),

    /// Config file exists but could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or rendering I/O failure.
    ///
    /// Fatal: the terminal is restored before the error is reported.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading content or opening the keyboard.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file given on the command line does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use minipager::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that failed to open.
        path: PathBuf,
    },

    /// No file argument and stdin is a terminal, so there is nothing to page.
    #[error("Missing filename (\"minipager --help\" for help)")]
    NoInput,

    /// Keystrokes cannot be read one at a time.
    ///
    /// Raised before the session starts when neither stdin nor the
    /// controlling terminal is an interactive tty.
    #[error("Input is not interactive: {reason}")]
    NotInteractive {
        /// What was missing.
        reason: String,
    },

    /// The `--json` flag was given but the content is not valid JSON.
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O failure while reading content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal dimensions that cannot host a frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A frame needs at least one content row plus the prompt row.
    #[error("terminal has {rows} rows, at least 2 are required")]
    TooShort {
        /// Rows reported by the terminal.
        rows: u16,
    },

    /// Zero columns were reported.
    #[error("terminal reports zero columns")]
    TooNarrow,
}
