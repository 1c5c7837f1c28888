use std::sync::Mutex;

use crate::error::Result;
use crate::git::{display_command, GitOutput, GitRunner, OutputMode};
use crate::ui;

/// Prints each command line instead of running it, and reports success.
pub struct DryRunGit {
    program: String,
    printed: Mutex<Vec<String>>,
}

impl DryRunGit {
    pub fn new(program: impl Into<String>) -> Self {
        DryRunGit {
            program: program.into(),
            printed: Mutex::new(Vec::new()),
        }
    }

    /// Command lines shown so far.
    pub fn printed(&self) -> Vec<String> {
        self.printed
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl GitRunner for DryRunGit {
    fn execute(&self, args: &[String], _mode: OutputMode) -> Result<GitOutput> {
        let line = display_command(&self.program, args);
        ui::display_dry_run(&line);
        if let Ok(mut printed) = self.printed.lock() {
            printed.push(line);
        }
        Ok(GitOutput::ok())
    }

    fn program(&self) -> &str {
        &self.program
    }
}
