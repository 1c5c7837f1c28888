//! Git invocation layer
//!
//! Every operation in git-shortcuts is a sequence of `git` command lines.
//! This module defines the [GitRunner] trait that executes one such command
//! line, and the [GitCommand] builders that produce them.
//!
//! # Implementations
//!
//! - [system::SystemGit]: spawns the real `git` binary
//! - [dry_run::DryRunGit]: prints the command line instead of running it
//! - [mock::MockGit]: records invocations and replays scripted results, for tests
//!
//! Code that drives git should depend on the [GitRunner] trait rather than a
//! concrete runner.

pub mod dry_run;
pub mod mock;
pub mod system;

pub use dry_run::DryRunGit;
pub use mock::MockGit;
pub use system::SystemGit;

use crate::error::Result;

/// Captured result of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GitOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Successful invocation with no output.
    pub fn ok() -> Self {
        GitOutput {
            code: Some(0),
            ..Default::default()
        }
    }

    /// Failed invocation with the given exit code and stderr text.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        GitOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit status to surface to the operator; signal deaths map to 1.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}

/// How a git invocation's output reaches the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Output goes straight to the terminal while git runs; [GitOutput]
    /// carries only the exit code
    Stream,
    /// Output is collected for inspection, then replayed to the terminal
    Capture,
}

/// Executes git command lines.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// A git process that runs and exits non-zero is *not* an error: it is
/// returned as a [GitOutput] so callers decide whether the failure is fatal.
/// `Err` is reserved for failures to run git at all (missing binary, I/O).
pub trait GitRunner: Send + Sync {
    /// Run `git` with the given arguments (program name excluded).
    fn execute(&self, args: &[String], mode: OutputMode) -> Result<GitOutput>;

    /// Program name used in messages.
    fn program(&self) -> &str {
        "git"
    }

    /// Run with output streamed live to the terminal.
    fn run(&self, args: &[String]) -> Result<GitOutput> {
        self.execute(args, OutputMode::Stream)
    }

    /// Run and keep the output, for invocations whose text gets classified.
    fn capture(&self, args: &[String]) -> Result<GitOutput> {
        self.execute(args, OutputMode::Capture)
    }
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn execute(&self, args: &[String], mode: OutputMode) -> Result<GitOutput> {
        (**self).execute(args, mode)
    }

    fn program(&self) -> &str {
        (**self).program()
    }
}

impl<T: GitRunner + ?Sized> GitRunner for Box<T> {
    fn execute(&self, args: &[String], mode: OutputMode) -> Result<GitOutput> {
        (**self).execute(args, mode)
    }

    fn program(&self) -> &str {
        (**self).program()
    }
}

/// Argument-list builders for every git invocation the dispatcher issues.
pub struct GitCommand;

impl GitCommand {
    /// `git add .`
    pub fn stage_all() -> Vec<String> {
        args(&["add", "."])
    }

    /// `git commit -am <message>`
    pub fn commit_all(message: &str) -> Vec<String> {
        args(&["commit", "-am", message])
    }

    /// `git push <remote> <branch>`
    pub fn push_branch(remote: &str, branch: &str) -> Vec<String> {
        args(&["push", remote, branch])
    }

    /// `git pull <remote> <branch>`
    pub fn pull_branch(remote: &str, branch: &str) -> Vec<String> {
        args(&["pull", remote, branch])
    }

    /// `git tag -d <label>`
    pub fn delete_local_tag(label: &str) -> Vec<String> {
        args(&["tag", "-d", label])
    }

    /// `git push <remote> :refs/tags/<label>`
    pub fn delete_remote_tag(remote: &str, label: &str) -> Vec<String> {
        vec![
            "push".to_string(),
            remote.to_string(),
            format!(":refs/tags/{}", label),
        ]
    }

    /// `git tag <label>`
    pub fn create_local_tag(label: &str) -> Vec<String> {
        args(&["tag", label])
    }

    /// `git push <remote> <label>`
    pub fn push_tag(remote: &str, label: &str) -> Vec<String> {
        args(&["push", remote, label])
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Renders a command line for display, quoting empty arguments and ones
/// that contain whitespace.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(&arg.replace('"', "\\\""));
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
