use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_shortcuts::cli::{Dispatcher, Operation};
use git_shortcuts::config;
use git_shortcuts::git::{DryRunGit, GitRunner, SystemGit};
use git_shortcuts::ui::{self, NonInteractivePrompter, Prompter, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "git-shortcuts",
    version,
    about = "Shortcut commands for everyday git chores: commit, push, pull, retag"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Remote to push to and pull from")]
    remote: Option<String>,

    #[arg(long, global = true, help = "Primary branch to push and pull")]
    branch: Option<String>,

    #[arg(short = 'C', global = true, value_name = "DIR", help = "Run git in this directory")]
    directory: Option<PathBuf>,

    #[arg(long, global = true, help = "Print git commands instead of running them")]
    dry_run: bool,

    #[arg(long, global = true, help = "Never prompt; use defaults instead")]
    no_input: bool,

    #[arg(short, long, global = true, help = "Log every git invocation")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Stage all changes and commit them
    Commit {
        #[arg(short, long, help = "Commit message (prompted for when omitted)")]
        message: Option<String>,
    },
    /// Commit, then push the primary branch to the remote
    Push {
        #[arg(short, long, help = "Commit message (prompted for when omitted)")]
        message: Option<String>,
    },
    /// Fetch and merge the primary branch from the remote
    Pull,
    /// Move a tag to the current commit, locally and on the remote
    Retag {
        #[arg(help = "Tag to recreate (prompted for when omitted)")]
        tag: Option<String>,
    },
}

impl From<Command> for Operation {
    fn from(command: Command) -> Self {
        match command {
            Command::Commit { message } => Operation::Commit { message },
            Command::Push { message } => Operation::Push { message },
            Command::Pull => Operation::Pull,
            Command::Retag { tag } => Operation::Retag { label: tag },
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_shortcuts=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(clamp_exit_code(code)),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Builds the dispatcher from the arguments and runs the requested operation.
///
/// Returns the exit status of the last git invocation. Errors are setup
/// failures (configuration) that happen before git is ever run.
fn run(args: Args) -> Result<i32> {
    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_overrides(args.remote, args.branch);
    config.validate()?;

    let git: Box<dyn GitRunner> = if args.dry_run {
        Box::new(DryRunGit::new(config.git.program.clone()))
    } else {
        let system = SystemGit::new(config.git.program.clone());
        match args.directory {
            Some(dir) => Box::new(system.in_dir(dir)),
            None => Box::new(system),
        }
    };

    let prompter: Box<dyn Prompter> = if args.no_input {
        Box::new(NonInteractivePrompter)
    } else {
        Box::new(TerminalPrompter)
    };

    let dispatcher = Dispatcher::new(git, prompter, config);
    match dispatcher.run(args.command.into()) {
        Ok(report) => Ok(report.exit_code()),
        Err(e) => {
            ui::display_error(&e.to_string());
            Ok(e.exit_code())
        }
    }
}

/// Process exit statuses are a single byte on unix.
fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
