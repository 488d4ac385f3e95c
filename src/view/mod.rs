//! Terminal front end (impure shell).
//!
//! Owns the terminal for the lifetime of a session: raw mode, the alternate
//! screen and the event loop. Each event goes through the dispatcher and its
//! [`Outcome`] decides whether a new frame is drawn.

pub mod help;
pub mod render;

pub use help::help_content;
pub use render::{compose, RenderSink, TerminalSink};

use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::input::{open_keyboard, spawn_reader_thread, KeyDecoder};
use crate::model::{AppError, Content};
use crate::state::{Dispatcher, Outcome, PagerState};
use crate::view_state::viewport::{TerminalSize, Viewport};

/// Terminal sizes as reported by crossterm, `(cols, rows)`.
pub type ResizeReceiver = mpsc::UnboundedReceiver<(u16, u16)>;

/// A pager session: state, key handling and a place to draw.
///
/// Generic over the sink so tests can record frames instead of writing to
/// a terminal.
pub struct Pager<S: RenderSink> {
    state: PagerState,
    dispatcher: Dispatcher,
    sink: S,
}

impl<S: RenderSink> Pager<S> {
    /// Assemble a session.
    pub fn new(state: PagerState, dispatcher: Dispatcher, sink: S) -> Self {
        Self {
            state,
            dispatcher,
            sink,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Compose and draw one frame.
    pub fn draw(&mut self) -> io::Result<()> {
        let rows = compose(&mut self.state);
        self.sink.draw(&rows)
    }

    /// Feed one decoded key. Returns true when the session should end.
    pub fn handle_key(&mut self, key: &str) -> io::Result<bool> {
        let outcome = self.dispatcher.handle_key(&mut self.state, key);
        self.apply(outcome)
    }

    /// Adopt a new terminal size, `(cols, rows)` as crossterm reports it.
    pub fn handle_resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        let outcome = self.dispatcher.handle_resize(&mut self.state, rows, cols);
        self.apply(outcome).map(|_| ())
    }

    fn apply(&mut self, outcome: Outcome) -> io::Result<bool> {
        match outcome {
            Outcome::Redraw => self.draw()?,
            Outcome::Bell => self.sink.bell()?,
            Outcome::Ignore => {}
            Outcome::Quit => return Ok(true),
        }
        Ok(false)
    }

    /// Run the event loop until quit or until the keyboard closes.
    ///
    /// Resizes are polled first so a frame is never drawn for a stale size.
    pub async fn run(
        &mut self,
        decoder: &mut KeyDecoder,
        resizes: &mut ResizeReceiver,
    ) -> Result<(), AppError> {
        self.draw()?;

        loop {
            tokio::select! {
                biased;

                Some((cols, rows)) = resizes.recv() => {
                    self.handle_resize(cols, rows)?;
                }

                key = decoder.next_key() => match key {
                    Some(key) => {
                        if self.handle_key(&key)? {
                            debug!("quit");
                            break;
                        }
                    }
                    None => {
                        debug!("keyboard closed");
                        break;
                    }
                },
            }
        }

        Ok(())
    }
}

/// Forward SIGWINCH as terminal sizes.
///
/// Must be called from inside a tokio runtime.
pub fn watch_resizes() -> io::Result<ResizeReceiver> {
    let mut winch = signal(SignalKind::window_change())?;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while winch.recv().await.is_some() {
            match terminal::size() {
                Ok(size) => {
                    if tx.send(size).is_err() {
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "failed to read terminal size"),
            }
        }
    });

    Ok(rx)
}

/// Page `content` on the controlling terminal.
///
/// This is the main entry point for the pager. It checks the terminal,
/// sets it up, runs the event loop, and restores the terminal on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(content: Content, config: &ResolvedConfig) -> Result<(), AppError> {
    let (cols, rows) = terminal::size()?;
    let size = TerminalSize::new(rows, cols)?;
    let keyboard = open_keyboard()?;

    let bindings = KeyBindings::default().with_overrides(&config.keybindings);
    let help = help_content(&bindings);
    info!(rows, cols, lines = content.len(), "starting pager");

    let viewport = Viewport::new(size, config.chop_long_lines, config.indentation);
    let state = PagerState::new(content, viewport);
    let mut pager = Pager::new(
        state,
        Dispatcher::new(bindings, help),
        TerminalSink::new(io::stdout()),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut decoder = KeyDecoder::new(spawn_reader_thread(keyboard)?, config.esc_timeout);

    setup_terminal()?;

    // Run the pager and ensure cleanup happens even on error
    let result = runtime.block_on(async {
        let mut resizes = watch_resizes()?;
        pager.run(&mut decoder, &mut resizes).await
    });

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Raw mode, alternate screen, hidden cursor.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

/// Restore terminal to normal state
///
/// Shows the cursor, leaves the alternate screen and disables raw mode.
fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    disable_raw_mode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ReadResult;
    use crate::tests::fixtures::{numbered, sized_viewport};
    use crate::view_state::layout::END_MARKER;
    use std::time::Duration;

    /// Records frames and bells in memory.
    #[derive(Debug, Default)]
    struct RecordingSink {
        frames: Vec<Vec<String>>,
        bells: usize,
    }

    impl RenderSink for RecordingSink {
        fn draw(&mut self, rows: &[String]) -> io::Result<()> {
            self.frames.push(rows.to_vec());
            Ok(())
        }

        fn bell(&mut self) -> io::Result<()> {
            self.bells += 1;
            Ok(())
        }
    }

    fn pager(lines: usize, rows: u16, cols: u16) -> Pager<RecordingSink> {
        let bindings = KeyBindings::default();
        let help = help_content(&bindings);
        Pager::new(
            PagerState::new(numbered(lines), sized_viewport(rows, cols, true)),
            Dispatcher::new(bindings, help),
            RecordingSink::default(),
        )
    }

    fn keyboard(bytes: &[u8]) -> KeyDecoder {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ReadResult::Data(bytes.to_vec()))
            .expect("receiver alive");
        KeyDecoder::new(rx, Duration::from_millis(50))
    }

    #[test]
    fn unbound_key_rings_bell_without_redraw() {
        let mut pager = pager(100, 10, 40);
        assert!(!pager.handle_key("X").expect("in memory"));
        assert_eq!(pager.sink().bells, 1);
        assert!(pager.sink().frames.is_empty());
    }

    #[test]
    fn blocked_motion_rings_bell() {
        let mut pager = pager(6, 24, 80);
        assert!(!pager.handle_key("j").expect("in memory"));
        assert_eq!(pager.sink().bells, 1);
    }

    #[test]
    fn force_exit_quits() {
        let mut pager = pager(100, 10, 40);
        assert!(pager.handle_key("\x03").expect("in memory"));
    }

    #[test]
    fn invalid_resize_is_ignored() {
        let mut pager = pager(100, 10, 40);
        pager.handle_resize(40, 1).expect("in memory");
        assert!(pager.sink().frames.is_empty());
        assert_eq!(pager.state().viewport.window, 10);
    }

    #[tokio::test]
    async fn run_draws_first_frame_and_moves() {
        let mut pager = pager(100, 10, 40);
        let mut decoder = keyboard(b"jq");
        let (_tx, mut resizes) = mpsc::unbounded_channel();

        pager
            .run(&mut decoder, &mut resizes)
            .await
            .expect("session ends cleanly");

        let frames = &pager.sink().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][0], "line 1");
        assert_eq!(frames[1][0], "line 2");
    }

    #[tokio::test]
    async fn run_handles_pending_resize_before_keys() {
        let mut pager = pager(100, 10, 40);
        let mut decoder = keyboard(b"q");
        let (tx, mut resizes) = mpsc::unbounded_channel();
        tx.send((40, 6)).expect("receiver alive");

        pager
            .run(&mut decoder, &mut resizes)
            .await
            .expect("session ends cleanly");

        let frames = &pager.sink().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].len(), 6);
        assert_eq!(pager.state().viewport.window, 6);
    }

    #[tokio::test]
    async fn run_ends_when_keyboard_closes() {
        let mut pager = pager(100, 10, 40);
        let (tx, rx) = mpsc::unbounded_channel::<ReadResult>();
        drop(tx);
        let mut decoder = KeyDecoder::new(rx, Duration::from_millis(50));
        let (_tx, mut resizes) = mpsc::unbounded_channel();

        pager
            .run(&mut decoder, &mut resizes)
            .await
            .expect("session ends cleanly");
        assert_eq!(pager.sink().frames.len(), 1);
    }

    #[tokio::test]
    async fn help_exit_returns_to_content() {
        let mut pager = pager(6, 24, 80);
        let mut decoder = keyboard(b"hqq");
        let (_tx, mut resizes) = mpsc::unbounded_channel();

        pager
            .run(&mut decoder, &mut resizes)
            .await
            .expect("session ends cleanly");

        let frames = &pager.sink().frames;
        assert_eq!(frames.len(), 3);
        assert!(frames[1].iter().any(|row| row.contains("SUMMARY OF MINIPAGER COMMANDS")));
        assert_eq!(frames[2], frames[0]);
        assert_eq!(frames[2][6], END_MARKER);
        assert!(!pager.state().in_help());
    }
}
