use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::git::GitOutput;

/// What happened to the commit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created with this message
    Committed { message: String },
    /// Git found nothing staged or modified
    NothingToCommit,
    /// Git refused for another reason (hooks, identity, conflicts, ...)
    Failed { code: i32, stderr: String },
}

fn nothing_to_commit_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?im)^(nothing to commit|nothing added to commit|no changes added to commit)",
            )
            .ok()
        })
        .as_ref()
}

impl CommitOutcome {
    /// Classifies the output of `git commit`.
    ///
    /// Git prints the "nothing to commit" family on stdout with exit code 1.
    pub fn classify(message: &str, output: &GitOutput) -> Self {
        if output.success() {
            return CommitOutcome::Committed {
                message: message.to_string(),
            };
        }

        let nothing_to_commit = nothing_to_commit_pattern()
            .map(|re| re.is_match(&output.stdout) || re.is_match(&output.stderr))
            .unwrap_or(false);

        if nothing_to_commit {
            CommitOutcome::NothingToCommit
        } else {
            CommitOutcome::Failed {
                code: output.exit_code(),
                stderr: output.stderr.trim().to_string(),
            }
        }
    }

    /// Exit status for a standalone commit.
    ///
    /// An empty working tree is not a failure; any other refusal keeps
    /// git's status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommitOutcome::Committed { .. } | CommitOutcome::NothingToCommit => 0,
            CommitOutcome::Failed { code, .. } => *code,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }

    /// The non-fatal warning to show for this outcome, if any.
    pub fn warning(&self) -> Option<StepWarning> {
        match self {
            CommitOutcome::Committed { .. } => None,
            CommitOutcome::NothingToCommit => Some(StepWarning::NothingToCommit),
            CommitOutcome::Failed { code, stderr } => Some(StepWarning::CommitFailed {
                code: *code,
                detail: stderr.clone(),
            }),
        }
    }
}

/// One step of a retag, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetagStep {
    DeleteLocalTag,
    DeleteRemoteTag,
    CreateLocalTag,
    PushTag,
}

impl RetagStep {
    pub const ALL: [RetagStep; 4] = [
        RetagStep::DeleteLocalTag,
        RetagStep::DeleteRemoteTag,
        RetagStep::CreateLocalTag,
        RetagStep::PushTag,
    ];

    pub fn describe(&self) -> &'static str {
        match self {
            RetagStep::DeleteLocalTag => "delete local tag",
            RetagStep::DeleteRemoteTag => "delete remote tag",
            RetagStep::CreateLocalTag => "create local tag",
            RetagStep::PushTag => "push tag",
        }
    }
}

/// Non-fatal problems reported while an operation keeps going.
#[derive(Debug, Clone, PartialEq)]
pub enum StepWarning {
    /// Commit step had nothing to record
    NothingToCommit,
    /// Commit step failed for another reason
    CommitFailed { code: i32, detail: String },
    /// A retag step exited non-zero; later steps still ran
    RetagStepFailed {
        step: RetagStep,
        label: String,
        code: i32,
    },
}

impl fmt::Display for StepWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepWarning::NothingToCommit => write!(f, "Nothing to commit, continuing"),
            StepWarning::CommitFailed { code, detail } => {
                if detail.is_empty() {
                    write!(f, "Commit failed (exit code {}), continuing", code)
                } else {
                    write!(
                        f,
                        "Commit failed (exit code {}): {}, continuing",
                        code, detail
                    )
                }
            }
            StepWarning::RetagStepFailed { step, label, code } => write!(
                f,
                "Could not {} '{}' (exit code {})",
                step.describe(),
                label,
                code
            ),
        }
    }
}

/// Result of a retag request.
#[derive(Debug, Clone, PartialEq)]
pub enum RetagReport {
    /// Empty label; nothing was run
    Aborted,
    /// Every step ran; each keeps its own output
    Completed {
        label: String,
        steps: Vec<(RetagStep, GitOutput)>,
    },
}

impl RetagReport {
    /// Steps that exited non-zero.
    pub fn failed_steps(&self) -> Vec<RetagStep> {
        match self {
            RetagReport::Aborted => Vec::new(),
            RetagReport::Completed { steps, .. } => steps
                .iter()
                .filter(|(_, output)| !output.success())
                .map(|(step, _)| *step)
                .collect(),
        }
    }

    /// Exit status of the last step run, 0 when aborted.
    pub fn exit_code(&self) -> i32 {
        match self {
            RetagReport::Aborted => 0,
            RetagReport::Completed { steps, .. } => steps
                .last()
                .map(|(_, output)| output.exit_code())
                .unwrap_or(0),
        }
    }
}

/// Outcome of one dispatcher operation, as seen by the binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Commit(CommitOutcome),
    Push {
        commit: CommitOutcome,
        output: GitOutput,
    },
    Pull {
        output: GitOutput,
    },
    Retag(RetagReport),
}

impl Report {
    /// Exit status of the last git invocation the operation ran.
    pub fn exit_code(&self) -> i32 {
        match self {
            Report::Commit(outcome) => outcome.exit_code(),
            Report::Push { output, .. } | Report::Pull { output } => output.exit_code(),
            Report::Retag(report) => report.exit_code(),
        }
    }
}
