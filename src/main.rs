#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::artifacts::removal::RemoveMode;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "legit",
    version = "0.1.0",
    about = "A minimal educational version-control system",
    long_about = "legit models the core of git: a working tree, a staging index and \
    numbered commits on named branches. Commits are whole-file snapshots; there is \
    no content addressing, no deltas and no remotes."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Add files to the index")]
    Add {
        #[arg(required = true, value_name = "FILE", help = "The files to stage")]
        files: Vec<String>,
    },
    #[command(about = "Record the index as a new commit")]
    Commit {
        #[arg(short = 'a', help = "Refresh every index entry from the working tree first")]
        all: bool,
        #[arg(short = 'm', value_name = "MESSAGE", help = "The commit message")]
        message: String,
    },
    #[command(about = "Remove files from the index and the working tree")]
    Rm {
        #[arg(long, help = "Skip the safety checks")]
        force: bool,
        #[arg(long, help = "Remove only from the index")]
        cached: bool,
        #[arg(required = true, value_name = "FILE", help = "The files to remove")]
        files: Vec<String>,
    },
    #[command(about = "Show the status of every known path")]
    Status,
    #[command(about = "List the current branch's commits, tip first")]
    Log,
    #[command(about = "Print a file as of a commit, or from the index")]
    Show {
        #[arg(value_name = "COMMIT:FILE", help = "Commit id and file name; an empty commit part reads the index")]
        target: String,
    },
    #[command(about = "List, create or delete branches")]
    Branch {
        #[arg(value_name = "NAME", conflicts_with = "delete", help = "Create this branch from the current one")]
        name: Option<String>,
        #[arg(short = 'd', value_name = "NAME", help = "Delete this branch")]
        delete: Option<String>,
    },
    #[command(about = "Switch to another branch, preserving local changes")]
    Checkout {
        #[arg(value_name = "BRANCH", help = "The branch to switch to")]
        branch: String,
    },
    #[command(about = "Merge a branch or commit into the current branch")]
    Merge {
        #[arg(value_name = "BRANCH|COMMIT", help = "The branch name or commit id to merge")]
        target: String,
        #[arg(short = 'm', value_name = "MESSAGE", help = "The merge commit message")]
        message: String,
    },
}

impl Commands {
    /// Canonical name of the modeled command suite; diagnostics carry this
    /// prefix so the error stream matches the reference commands.
    fn canonical_name(&self) -> &'static str {
        match self {
            Commands::Init => "git-init",
            Commands::Add { .. } => "git-add",
            Commands::Commit { .. } => "git-commit",
            Commands::Rm { .. } => "git-rm",
            Commands::Status => "git-status",
            Commands::Log => "git-log",
            Commands::Show { .. } => "git-show",
            Commands::Branch { .. } => "git-branch",
            Commands::Checkout { .. } => "git-checkout",
            Commands::Merge { .. } => "git-merge",
        }
    }
}

fn main() {
    // exit 1 on usage errors too; clap defaults to 2
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(1);
    });

    let command_name = cli.command.canonical_name();

    if let Err(err) = run(cli.command) {
        eprintln!("{}: error: {:#}", command_name, err);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    match command {
        Commands::Init => repository.init(),
        Commands::Add { files } => repository.add(&files),
        Commands::Commit { all, message } => repository.commit(&message, all),
        Commands::Rm { force, cached, files } => {
            repository.rm(&files, RemoveMode::from_args(cached, force))
        }
        Commands::Status => repository.status(),
        Commands::Log => repository.log(),
        Commands::Show { target } => repository.show(&target),
        Commands::Branch { name, delete } => repository.branch(name.as_deref(), delete.as_deref()),
        Commands::Checkout { branch } => repository.checkout(&branch),
        Commands::Merge { target, message } => repository.merge(&target, &message),
    }
}
