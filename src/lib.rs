pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod outcome;
pub mod ui;

pub use error::{Result, ShortcutError};
