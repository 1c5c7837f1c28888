// tests/git_workflow_test.rs
//
// End-to-end runs against real repositories. The fixtures are built with
// git2; the operations themselves shell out to the git binary, so these
// tests return early when git is not installed.
use std::path::Path;
use std::process::Command;

use git2::{Repository, RepositoryInitOptions};
use git_shortcuts::cli::{Dispatcher, Operation};
use git_shortcuts::config::Config;
use git_shortcuts::git::SystemGit;
use git_shortcuts::outcome::{CommitOutcome, Report, RetagReport};
use git_shortcuts::ui::ScriptedPrompter;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

struct Fixture {
    _root: TempDir,
    work: Repository,
    origin: Repository,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let origin_path = root.path().join("origin.git");
        let work_path = root.path().join("work");

        let origin = Repository::init_bare(&origin_path).unwrap();

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let work = Repository::init_opts(&work_path, &opts).unwrap();
        {
            let mut config = work.config().unwrap();
            config.set_str("user.name", "Shortcut Tester").unwrap();
            config.set_str("user.email", "tester@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
            config.set_bool("tag.gpgsign", false).unwrap();
        }
        work.remote("origin", origin_path.to_str().unwrap()).unwrap();

        Fixture {
            _root: root,
            work,
            origin,
        }
    }

    fn work_dir(&self) -> &Path {
        self.work.workdir().unwrap()
    }

    fn write(&self, name: &str, content: &str) {
        std::fs::write(self.work_dir().join(name), content).unwrap();
    }

    fn dispatcher(&self, answers: &[&str]) -> Dispatcher<SystemGit, ScriptedPrompter> {
        let git = SystemGit::new("git").in_dir(self.work_dir()).quiet();
        Dispatcher::new(git, ScriptedPrompter::new(answers.to_vec()), Config::default())
    }

    fn head_message(&self) -> String {
        let head = self.work.head().unwrap().peel_to_commit().unwrap();
        head.message().unwrap().trim_end().to_string()
    }

    fn tag_target(repo: &Repository, tag: &str) -> Option<git2::Oid> {
        repo.find_reference(&format!("refs/tags/{}", tag))
            .ok()
            .and_then(|r| r.peel_to_commit().ok())
            .map(|c| c.id())
    }
}

#[test]
fn test_commit_defaults_message() {
    if !git_available() {
        return;
    }
    let fx = Fixture::new();
    fx.write("README.md", "hello\n");

    let outcome = fx.dispatcher(&[""]).commit(None).unwrap();

    assert!(outcome.is_committed());
    assert_eq!(fx.head_message(), "No message");
}

#[test]
fn test_commit_twice_reports_nothing_to_commit() {
    if !git_available() {
        return;
    }
    let fx = Fixture::new();
    fx.write("README.md", "hello\n");

    let d = fx.dispatcher(&[]);
    d.commit(Some("Initial import".to_string())).unwrap();
    let second = d.commit(Some("Again".to_string())).unwrap();

    assert_eq!(second, CommitOutcome::NothingToCommit);
    assert_eq!(fx.head_message(), "Initial import");
}

#[test]
fn test_push_then_pull_round_trip() {
    if !git_available() {
        return;
    }
    let fx = Fixture::new();
    fx.write("main.rs", "fn main() {}\n");

    let d = fx.dispatcher(&["Add entry point"]);
    let report = d.run(Operation::Push { message: None }).unwrap();
    assert_eq!(report.exit_code(), 0);

    let local_head = fx.work.head().unwrap().peel_to_commit().unwrap().id();
    let remote_head = fx
        .origin
        .find_reference("refs/heads/master")
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    assert_eq!(local_head, remote_head);

    let pulled = d.run(Operation::Pull).unwrap();
    assert!(matches!(pulled, Report::Pull { ref output } if output.success()));
}

#[test]
fn test_retag_moves_tag_locally_and_remotely() {
    if !git_available() {
        return;
    }
    let fx = Fixture::new();
    fx.write("a.txt", "one\n");

    let d = fx.dispatcher(&[]);
    d.push(Some("First".to_string())).unwrap();

    // First retag: the tag does not exist yet, so both deletes fail
    let first = d.retag(Some("1.0.0".to_string())).unwrap();
    assert_eq!(first.failed_steps().len(), 2);
    assert_eq!(first.exit_code(), 0);

    fx.write("a.txt", "two\n");
    d.push(Some("Second".to_string())).unwrap();

    let second = d.retag(Some("1.0.0".to_string())).unwrap();
    assert!(matches!(second, RetagReport::Completed { .. }));
    assert!(second.failed_steps().is_empty());

    let head = fx.work.head().unwrap().peel_to_commit().unwrap().id();
    assert_eq!(Fixture::tag_target(&fx.work, "1.0.0"), Some(head));
    assert_eq!(Fixture::tag_target(&fx.origin, "1.0.0"), Some(head));
}
