use thiserror::Error;

use crate::git::display_command;

/// Unified error type for git-shortcuts operations
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-shortcuts
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl ShortcutError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ShortcutError::Config(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ShortcutError::Prompt(msg.into())
    }

    /// Create a spawn error for the given program
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        ShortcutError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a failed-command error from the argument list that was run
    pub fn command_failed(program: &str, args: &[String], code: i32) -> Self {
        ShortcutError::CommandFailed {
            command: display_command(program, args),
            code,
        }
    }

    /// Process exit status the binary should use for this error.
    ///
    /// A failed git invocation passes its own status through; everything
    /// else is reported as 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShortcutError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
