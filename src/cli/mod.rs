//! Operation dispatch
//!
//! Holds the shortcut operations, kept apart from argument parsing in
//! `main.rs` so they can be driven programmatically and tested with mock
//! runners.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Operation};
