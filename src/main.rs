use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use vc::areas::repository::Repository;
use vc::artifacts::core::config::Config;
use vc::artifacts::triage::operator::TerminalOperator;
use vc::commands::porcelain::new::NewOptions;
use vc::commands::porcelain::push::PushOptions;

#[derive(Parser)]
#[command(
    name = "vc",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "version control - a wrapper to avoid git exposure and damage",
    long_about = "vc hides git behind a few commands. \
    `vc push` backs up the working directory, asks what to do with every file \
    that is neither tracked nor ignored, commits all changes and publishes them. \
    Answers to the per-file prompt: a (add to repo), i (ignore the file), \
    x (ignore its extension), N (ignore the folder made of the first N parts of its path), \
    d (delete after confirm), p (pass), ? or h (help).",
    arg_required_else_help = true,
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "push",
        about = "Back up, triage unmanaged files, commit and publish",
        long_about = "This command backs up the whole working directory to <root>-backups/<timestamp>/, \
        prompts for what to do with every unmanaged file, commits all changes to tracked files \
        and, after confirmation, pushes to the remote. With `local` it stops after the commit."
    )]
    Push {
        #[arg(index = 1, value_parser = ["local"], help = "Commit to the local repository only")]
        scope: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
        #[arg(short = 'y', long = "yes", help = "Push without asking for confirmation")]
        yes: bool,
    },
    #[command(
        name = "pull",
        about = "Bring in changes from the remote repository",
        long_about = "This command pulls the current branch from the configured remote."
    )]
    Pull,
    #[command(
        name = "checkout",
        about = "Copy a remote repository to this machine",
        long_about = "This command clones the repository at the given URL into a new local directory."
    )]
    Checkout {
        #[arg(index = 1, help = "URL of the remote repository")]
        url: String,
        #[arg(index = 2, help = "Directory to create (defaults to the repository name)")]
        directory: Option<PathBuf>,
    },
    #[command(
        name = "new",
        about = "Create a repository here and populate a new remote from it",
        long_about = "Given a local directory and a newly created remote repository, this command \
        creates a local repository, checks in the local files and publishes them to the remote."
    )]
    New {
        #[arg(long, help = "URL of the remote repository")]
        url: Option<String>,
        #[arg(short, long, help = "The message for the initial commit")]
        message: Option<String>,
        #[arg(short = 'y', long = "yes", help = "Answer yes to every confirmation")]
        yes: bool,
    },
    #[command(
        name = "info",
        about = "Show the remote, the branch and the working tree status"
    )]
    Info,
    #[command(
        name = "move",
        about = "Move or rename a file under version control",
        long_about = "This command moves a tracked file or directory, keeping its history."
    )]
    Move {
        #[arg(index = 1)]
        from: PathBuf,
        #[arg(index = 2)]
        to: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let config = Config::load_from_env();
    let pwd = std::env::current_dir()?;
    let writer = Box::new(std::io::stdout());
    let operator = Box::new(TerminalOperator::stdio());

    match &cli.command {
        Commands::Push {
            scope,
            message,
            yes,
        } => {
            let mut repository = Repository::discover(&pwd, writer, operator, config)?;
            let options = PushOptions::new(scope.is_some(), message.clone(), *yes);

            repository.push(&options)?
        }
        Commands::Pull => {
            let mut repository = Repository::discover(&pwd, writer, operator, config)?;

            repository.pull()?
        }
        Commands::Checkout { url, directory } => {
            let mut repository = Repository::unborn(&pwd, writer, operator, config)?;

            repository.checkout(url, directory.as_deref())?
        }
        Commands::New { url, message, yes } => {
            let mut repository = Repository::unborn(&pwd, writer, operator, config)?;
            let options = NewOptions::new(url.clone(), message.clone(), *yes);

            repository.new_repository(&options)?
        }
        Commands::Info => {
            let mut repository = Repository::discover(&pwd, writer, operator, config)?;

            repository.info()?
        }
        Commands::Move { from, to } => {
            let mut repository = Repository::discover(&pwd, writer, operator, config)?;

            repository.move_path(from, to)?
        }
    }

    Ok(())
}
