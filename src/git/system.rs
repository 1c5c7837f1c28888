use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, ShortcutError};
use crate::git::{GitOutput, GitRunner, OutputMode};

/// Runs the real git binary.
///
/// Streamed invocations inherit the terminal, so progress output and prompts
/// behave as if git were run by hand. Captured invocations collect output for
/// classification under the C locale, then replay it once git exits.
pub struct SystemGit {
    program: String,
    workdir: Option<PathBuf>,
    relay: bool,
}

impl SystemGit {
    /// Create a runner for `program` in the current directory.
    pub fn new(program: impl Into<String>) -> Self {
        SystemGit {
            program: program.into(),
            workdir: None,
            relay: true,
        }
    }

    /// Run git inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Keep git output off the terminal.
    pub fn quiet(mut self) -> Self {
        self.relay = false;
        self
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        // git may still ask for credentials on the terminal
        cmd.stdin(Stdio::inherit());
        cmd
    }

    fn stream(&self, mut cmd: Command) -> Result<GitOutput> {
        if !self.relay {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd
            .status()
            .map_err(|e| ShortcutError::spawn(&self.program, e))?;

        Ok(GitOutput {
            code: status.code(),
            ..Default::default()
        })
    }

    fn capture_output(&self, mut cmd: Command) -> Result<GitOutput> {
        // output text is matched against git's English messages
        cmd.env("LC_ALL", "C").env("LANGUAGE", "C");

        let output = cmd
            .output()
            .map_err(|e| ShortcutError::spawn(&self.program, e))?;

        let output = GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        self.relay_output(&output);
        Ok(output)
    }

    fn relay_output(&self, output: &GitOutput) {
        if !self.relay {
            return;
        }
        if !output.stdout.is_empty() {
            print!("{}", output.stdout);
            let _ = std::io::stdout().flush();
        }
        if !output.stderr.is_empty() {
            eprint!("{}", output.stderr);
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for SystemGit {
    fn execute(&self, args: &[String], mode: OutputMode) -> Result<GitOutput> {
        debug!(
            target: "git_shortcuts::cmd",
            program = %self.program,
            ?args,
            ?mode,
            cwd = %self.workdir.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
            "exec"
        );

        let cmd = self.command(args);
        let output = match mode {
            OutputMode::Stream => self.stream(cmd)?,
            OutputMode::Capture => self.capture_output(cmd)?,
        };

        debug!(target: "git_shortcuts::cmd", code = ?output.code, "exit");
        Ok(output)
    }

    fn program(&self) -> &str {
        &self.program
    }
}
