//! The four shortcut operations.
//!
//! A [Dispatcher] owns a git runner, a prompter and the configuration. Each
//! operation builds its git command lines with [GitCommand] and runs them in
//! order through the runner. Nothing here talks to the terminal directly
//! except through `ui`.

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShortcutError};
use crate::git::{GitCommand, GitOutput, GitRunner};
use crate::outcome::{CommitOutcome, Report, RetagReport, RetagStep, StepWarning};
use crate::ui::{self, Prompter};

pub const COMMIT_PROMPT: &str = "Commit message";
pub const TAG_PROMPT: &str = "Enter tag";
pub const MISSING_TAG_ADVICE: &str = "Please specify the version to retag as.";

/// A requested operation with its optional operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Stage everything and commit; `None` means ask
    Commit { message: Option<String> },
    /// Commit, then push the primary branch
    Push { message: Option<String> },
    /// Fetch and merge the primary branch
    Pull,
    /// Move a tag to the current commit, locally and on the remote; `None` means ask
    Retag { label: Option<String> },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Commit { .. } => "commit",
            Operation::Push { .. } => "push",
            Operation::Pull => "pull",
            Operation::Retag { .. } => "retag",
        }
    }
}

/// Runs shortcut operations against one working directory.
pub struct Dispatcher<G, P> {
    git: G,
    prompter: P,
    config: Config,
}

impl<G: GitRunner, P: Prompter> Dispatcher<G, P> {
    pub fn new(git: G, prompter: P, config: Config) -> Self {
        Dispatcher {
            git,
            prompter,
            config,
        }
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run one operation to completion.
    pub fn run(&self, operation: Operation) -> Result<Report> {
        debug!(operation = operation.name(), "dispatch");
        match operation {
            Operation::Commit { message } => self.commit(message).map(Report::Commit),
            Operation::Push { message } => self.push(message),
            Operation::Pull => self.pull(),
            Operation::Retag { label } => self.retag(label).map(Report::Retag),
        }
    }

    /// Stage all changes and commit them.
    ///
    /// An explicit non-empty `message` is used verbatim, as is a non-blank
    /// answer to the prompt. A blank answer falls back to the configured
    /// default message. A failing `git add` aborts; a failing `git commit`
    /// is only a warning. Only the commit output is captured, since it
    /// decides between committed and nothing to commit.
    pub fn commit(&self, message: Option<String>) -> Result<CommitOutcome> {
        let message = self.resolve_message(message)?;

        self.run_required(&GitCommand::stage_all())?;

        let output = self.git.capture(&GitCommand::commit_all(&message))?;
        let outcome = CommitOutcome::classify(&message, &output);
        if let Some(warning) = outcome.warning() {
            ui::display_warning(&warning);
        }

        Ok(outcome)
    }

    /// Commit (with its own prompt), then push the primary branch.
    ///
    /// The push is attempted whatever the commit step produced.
    pub fn push(&self, message: Option<String>) -> Result<Report> {
        ui::display_status("Pushing files to remote repository");
        let commit = self.commit(message)?;

        let remote = &self.config.git.remote;
        let branch = &self.config.git.branch;
        let output = self.git.run(&GitCommand::push_branch(remote, branch))?;
        if !output.success() {
            ui::display_error(&format!(
                "Push of '{}' to '{}' failed with exit code {}",
                branch,
                remote,
                output.exit_code()
            ));
        }

        Ok(Report::Push { commit, output })
    }

    /// Fetch and merge the primary branch from the remote. Never prompts.
    pub fn pull(&self) -> Result<Report> {
        ui::display_status("Pulling files from remote repository");

        let remote = &self.config.git.remote;
        let branch = &self.config.git.branch;
        let output = self.git.run(&GitCommand::pull_branch(remote, branch))?;
        if !output.success() {
            ui::display_error(&format!(
                "Pull of '{}' from '{}' failed with exit code {}",
                branch,
                remote,
                output.exit_code()
            ));
        }

        Ok(Report::Pull { output })
    }

    /// Point `label` at the current commit, locally and on the remote.
    ///
    /// Runs delete-local, delete-remote, create-local, push in that order.
    /// Each step runs regardless of earlier failures (a tag that never
    /// existed cannot be deleted) and nothing is rolled back. An empty label
    /// aborts with a single advisory and no git calls.
    pub fn retag(&self, label: Option<String>) -> Result<RetagReport> {
        let label = match label {
            Some(label) => label.trim().to_string(),
            None => self.prompter.prompt(TAG_PROMPT, None)?.trim().to_string(),
        };

        if label.is_empty() {
            ui::display_advisory(MISSING_TAG_ADVICE);
            return Ok(RetagReport::Aborted);
        }

        ui::display_status(&format!("Retagging repository as {}", label));

        let remote = &self.config.git.remote;
        let mut steps = Vec::with_capacity(RetagStep::ALL.len());
        for step in RetagStep::ALL {
            let args = match step {
                RetagStep::DeleteLocalTag => GitCommand::delete_local_tag(&label),
                RetagStep::DeleteRemoteTag => GitCommand::delete_remote_tag(remote, &label),
                RetagStep::CreateLocalTag => GitCommand::create_local_tag(&label),
                RetagStep::PushTag => GitCommand::push_tag(remote, &label),
            };

            let output = self.git.run(&args)?;
            if !output.success() {
                ui::display_warning(&StepWarning::RetagStepFailed {
                    step,
                    label: label.clone(),
                    code: output.exit_code(),
                });
            }
            steps.push((step, output));
        }

        if steps.iter().all(|(_, output)| output.success()) {
            ui::display_success(&format!("Retagged repository as {}", label));
        }

        Ok(RetagReport::Completed { label, steps })
    }

    fn resolve_message(&self, message: Option<String>) -> Result<String> {
        let default = self.config.commit.default_message.as_str();
        let message = match message {
            Some(message) => message,
            None => self.prompter.prompt(COMMIT_PROMPT, Some(default))?,
        };

        if message.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(message)
        }
    }

    fn run_required(&self, args: &[String]) -> Result<GitOutput> {
        let output = self.git.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(ShortcutError::command_failed(
                self.git.program(),
                args,
                output.exit_code(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGit;
    use crate::ui::ScriptedPrompter;

    fn dispatcher(git: MockGit, prompter: ScriptedPrompter) -> Dispatcher<MockGit, ScriptedPrompter> {
        Dispatcher::new(git, prompter, Config::default())
    }

    #[test]
    fn test_commit_uses_explicit_message_without_prompting() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::silent());
        let outcome = d.commit(Some("Add readme".to_string())).unwrap();

        assert!(outcome.is_committed());
        assert_eq!(d.git().call_lines(), vec!["add .", "commit -am Add readme"]);
        assert!(d.prompter().asked().is_empty());
    }

    #[test]
    fn test_blank_explicit_message_uses_default() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::silent());
        d.commit(Some("   ".to_string())).unwrap();
        assert_eq!(d.git().calls()[1], vec!["commit", "-am", "No message"]);
    }

    #[test]
    fn test_stage_failure_aborts_before_commit() {
        let git = MockGit::new().respond(&["add"], GitOutput::failed(128, "fatal: not a git repository"));
        let d = dispatcher(git, ScriptedPrompter::silent());

        let err = d.commit(Some("x".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), 128);
        assert_eq!(d.git().call_lines(), vec!["add ."]);
    }

    #[test]
    fn test_configured_default_message() {
        let mut config = Config::default();
        config.commit.default_message = "wip".to_string();
        let d = Dispatcher::new(MockGit::new(), ScriptedPrompter::new([""]), config);

        d.commit(None).unwrap();
        assert_eq!(d.git().calls()[1], vec!["commit", "-am", "wip"]);
    }

    #[test]
    fn test_explicit_label_is_trimmed() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::silent());
        let report = d.retag(Some(" 2.0.0 \n".to_string())).unwrap();

        match report {
            RetagReport::Completed { label, steps } => {
                assert_eq!(label, "2.0.0");
                assert_eq!(steps.len(), 4);
            }
            RetagReport::Aborted => panic!("expected retag to run"),
        }
    }

    #[test]
    fn test_prompted_message_keeps_surrounding_whitespace() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::new(["  - indented bullet  "]));
        d.commit(None).unwrap();
        assert_eq!(d.git().calls()[1], vec!["commit", "-am", "  - indented bullet  "]);
    }

    #[test]
    fn test_prompted_label_is_trimmed() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::new(["  3.1.0  "]));
        d.retag(None).unwrap();
        assert_eq!(d.git().call_lines()[0], "tag -d 3.1.0");
    }

    #[test]
    fn test_only_commit_output_is_captured() {
        let d = dispatcher(MockGit::new(), ScriptedPrompter::silent());
        d.push(Some("Ship".to_string())).unwrap();
        d.pull().unwrap();
        d.retag(Some("1.0.0".to_string())).unwrap();

        assert_eq!(d.git().captured_lines(), vec!["commit -am Ship"]);
        assert_eq!(d.git().calls().len(), 8);
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Pull.name(), "pull");
        assert_eq!(Operation::Retag { label: None }.name(), "retag");
    }
}
