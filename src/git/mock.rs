use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::Result;
use crate::git::{GitOutput, GitRunner, OutputMode};

/// Mock runner for testing without spawning git.
///
/// Records every argument list it receives, with the output mode it was run
/// in. Each call pops the next scripted response whose prefix matches the
/// arguments; unmatched calls succeed with empty output.
pub struct MockGit {
    calls: Mutex<Vec<(Vec<String>, OutputMode)>>,
    responses: Mutex<VecDeque<(Vec<String>, GitOutput)>>,
}

impl MockGit {
    /// Create a mock where every call succeeds
    pub fn new() -> Self {
        MockGit {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Script the output for the next call whose arguments start with `prefix`
    pub fn respond(self, prefix: &[&str], output: GitOutput) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back((prefix.iter().map(|s| s.to_string()).collect(), output));
        }
        self
    }

    /// All argument lists received, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .map(|c| c.iter().map(|(args, _)| args.clone()).collect())
            .unwrap_or_default()
    }

    /// Space-joined calls that were run with [OutputMode::Capture]
    pub fn captured_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| {
                c.iter()
                    .filter(|(_, mode)| *mode == OutputMode::Capture)
                    .map(|(args, _)| args.join(" "))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Calls rendered as space-joined strings, handy for assertions
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for MockGit {
    fn execute(&self, args: &[String], mode: OutputMode) -> Result<GitOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((args.to_vec(), mode));
        }

        let mut responses = match self.responses.lock() {
            Ok(responses) => responses,
            Err(_) => return Ok(GitOutput::ok()),
        };

        let matched = responses
            .iter()
            .position(|(prefix, _)| args.starts_with(prefix));

        Ok(matched
            .and_then(|i| responses.remove(i))
            .map(|(_, output)| output)
            .unwrap_or_else(GitOutput::ok))
    }
}
