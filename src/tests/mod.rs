//! Internal test modules - whitebox tests with crate access
//!
//! Shared fixtures plus scenario tests that drive the dispatcher and the
//! frame composer together, the way the event loop does.


// Key-by-key scenarios through dispatch and compose
mod acceptance;

// Whole-frame snapshots
mod frame_snapshots;
