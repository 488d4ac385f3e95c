//! Byte stream to key tokens.
//!
//! A key token is the exact character sequence a key produced: `"j"`,
//! `"\x06"` for Ctrl-F, `"\x1b[A"` for the up arrow. Tokens are looked up
//! verbatim in the key binding table.
//!
//! ESC is ambiguous: it is a key on its own and also the first byte of
//! every escape sequence. After an ESC the decoder waits up to
//! `esc_timeout` for more bytes. If they arrive, the token covers the whole
//! sequence (`ESC x`, a full CSI `ESC [ params final`, or SS3 `ESC O x`);
//! if the timer fires first, the token is a bare ESC.

use super::tty::{ByteReceiver, ReadResult};
use std::time::Duration;

const ESC: u8 = 0x1b;

/// Default wait after ESC before treating it as a key on its own.
pub const DEFAULT_ESC_TIMEOUT: Duration = Duration::from_millis(50);

/// Result of scanning the pending bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// The first `n` bytes form a complete token.
    Token(usize),
    /// More bytes are needed to decide.
    NeedMore,
}

/// Decodes keyboard bytes into key tokens.
///
/// Bytes are only removed from the internal buffer once a token has been
/// decided, so dropping a pending [`next_key`](Self::next_key) future (for
/// example when a resize wins a `select!`) loses nothing.
#[derive(Debug)]
pub struct KeyDecoder {
    rx: ByteReceiver,
    pending: Vec<u8>,
    esc_timeout: Duration,
    closed: bool,
}

impl KeyDecoder {
    /// Decode bytes from `rx`, waiting `esc_timeout` after a lone ESC.
    pub fn new(rx: ByteReceiver, esc_timeout: Duration) -> Self {
        Self {
            rx,
            pending: Vec::new(),
            esc_timeout,
            closed: false,
        }
    }

    /// The next key token, or `None` once the input has closed and every
    /// buffered byte has been delivered.
    pub async fn next_key(&mut self) -> Option<String> {
        loop {
            if let Scan::Token(len) = scan(&self.pending) {
                return Some(self.take(len));
            }
            if self.closed {
                return self.flush();
            }

            let received = if self.pending.first() == Some(&ESC) {
                match tokio::time::timeout(self.esc_timeout, self.rx.recv()).await {
                    Ok(received) => received,
                    Err(_elapsed) => return self.flush(),
                }
            } else {
                self.rx.recv().await
            };

            match received {
                Some(ReadResult::Data(bytes)) => self.pending.extend_from_slice(&bytes),
                Some(ReadResult::Eof) | None => self.closed = true,
                Some(ReadResult::Error(kind)) => {
                    tracing::warn!(?kind, "keyboard input failed");
                    self.closed = true;
                }
            }
        }
    }

    /// Emit whatever is buffered as a single token.
    fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let len = self.pending.len();
        Some(self.take(len))
    }

    fn take(&mut self, len: usize) -> String {
        let bytes: Vec<u8> = self.pending.drain(..len).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Decide whether `pending` starts with a complete token.
fn scan(pending: &[u8]) -> Scan {
    match pending {
        [] => Scan::NeedMore,
        [ESC] => Scan::NeedMore,
        // A second ESC starts a new sequence.
        [ESC, ESC, ..] => Scan::Token(1),
        [ESC, b'[', rest @ ..] => scan_csi(rest).map_or(Scan::NeedMore, |n| Scan::Token(2 + n)),
        [ESC, b'O'] => Scan::NeedMore,
        [ESC, b'O', _, ..] => Scan::Token(3),
        [ESC, rest @ ..] => utf8_len(rest).map_or(Scan::NeedMore, |n| Scan::Token(1 + n)),
        _ => utf8_len(pending).map_or(Scan::NeedMore, Scan::Token),
    }
}

/// Length of the CSI body (parameters, intermediates, final byte).
///
/// Returns `None` while the final byte has not arrived. A byte that cannot
/// belong to a CSI sequence ends it early.
fn scan_csi(body: &[u8]) -> Option<usize> {
    for (i, byte) in body.iter().enumerate() {
        match byte {
            0x20..=0x3f => continue,
            0x40..=0x7e => return Some(i + 1),
            _ => return Some(i),
        }
    }
    None
}

/// Length of the UTF-8 character at the start of `bytes`.
///
/// Invalid bytes count as one-byte characters so decoding always progresses.
fn utf8_len(bytes: &[u8]) -> Option<usize> {
    let lead = *bytes.first()?;
    let expected = match lead {
        0x00..=0x7f => return Some(1),
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Some(1),
    };
    for i in 1..expected {
        match bytes.get(i) {
            None => return None,
            Some(0x80..=0xbf) => {}
            Some(_) => return Some(i),
        }
    }
    Some(expected)
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
