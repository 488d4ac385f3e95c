//! minipager
//!
//! A small `less`-style terminal pager whose layout understands ANSI style
//! codes and wide characters.
//!
//! The pure core (`model`, `view_state`, `state`) turns key tokens into
//! frames; the impure shell (`input`, `source`, `view`) talks to the
//! terminal.

pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod tests;
