//! Interactive keyboard source.
//!
//! Content may arrive on a pipe, so keystrokes are read from stdin only when
//! it is a terminal and from `/dev/tty` otherwise. Reads block, so they run
//! on their own thread and are forwarded over an unbounded channel that the
//! async dispatch loop can await.

use crate::model::InputError;
use std::fs::File;
use std::io::{IsTerminal, Read};

const READ_BUFFER_SIZE: usize = 1024;

/// One read from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// Bytes received.
    Data(Vec<u8>),
    /// The terminal was closed.
    Eof,
    /// A read failed; the reader thread stops.
    Error(std::io::ErrorKind),
}

/// Sending half of the keyboard channel.
pub type ByteSender = tokio::sync::mpsc::UnboundedSender<ReadResult>;

/// Receiving half of the keyboard channel.
pub type ByteReceiver = tokio::sync::mpsc::UnboundedReceiver<ReadResult>;

/// Open a terminal to read keystrokes from.
///
/// # Errors
///
/// [`InputError::NotInteractive`] when neither stdin nor `/dev/tty` is a
/// terminal, so keys cannot be read one at a time.
pub fn open_keyboard() -> Result<Box<dyn Read + Send>, InputError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Box::new(stdin));
    }

    let tty = File::open("/dev/tty").map_err(|e| InputError::NotInteractive {
        reason: format!("stdin is not a terminal and /dev/tty cannot be opened: {e}"),
    })?;
    if !tty.is_terminal() {
        return Err(InputError::NotInteractive {
            reason: "/dev/tty is not a terminal".to_string(),
        });
    }
    Ok(Box::new(tty))
}

/// Read `reader` on a background thread, forwarding every chunk.
///
/// The thread exits after EOF, a read error, or once the receiver is dropped
/// and the next read completes.
pub fn spawn_reader_thread<R>(reader: R) -> Result<ByteReceiver, InputError>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("keyboard-reader".into())
        .spawn(move || reader_loop(reader, tx))?;
    Ok(rx)
}

fn reader_loop<R: Read>(mut reader: R, tx: ByteSender) {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => {
                tracing::debug!("keyboard reader: EOF");
                drop(tx.send(ReadResult::Eof));
                break;
            }
            Ok(n) => {
                if tx.send(ReadResult::Data(buffer[..n].to_vec())).is_err() {
                    tracing::debug!("keyboard reader: receiver dropped");
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "keyboard reader: read failed");
                drop(tx.send(ReadResult::Error(e.kind())));
                break;
            }
        }
    }
}
