use anyhow::{Context, Result};
use bitlog::commands::porcelain::log::DisplayOptions;
use bitlog::{ColorChoice, CommitDisplayFormat, PageOptions, Repository, SearchOptions};
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitlog",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Query the commit history of a git repository",
    long_about = "Read-only history queries over a git object store: paginated logs, \
    message search and the last commit that touched a path.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        long,
        env = "BITLOG_DIR",
        default_value = ".",
        global = true,
        help = "The work tree or bare repository to read"
    )]
    repository: PathBuf,
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DisplayArgs {
    #[arg(long, value_enum, default_value_t = CommitDisplayFormat::Medium)]
    format: CommitDisplayFormat,
    #[arg(long, help = "Shorthand for --format oneline --abbrev-commit")]
    oneline: bool,
    #[arg(long, help = "Show abbreviated commit ids")]
    abbrev_commit: bool,
}

impl DisplayArgs {
    fn options(&self) -> DisplayOptions {
        if self.oneline {
            return DisplayOptions::new(CommitDisplayFormat::OneLine, true);
        }

        DisplayOptions::new(self.format, self.abbrev_commit)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "log",
        about = "Show one page of commit history",
        long_about = "This command lists commits reachable from a revision, newest first, \
        one page at a time. Pages start at 1; page 0 is the same as page 1."
    )]
    Log {
        #[arg(index = 1, default_value = "HEAD")]
        revision: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        size: usize,
        #[arg(long, help = "Only list commits that changed this path")]
        path: Option<PathBuf>,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(
        name = "search",
        about = "Find commits whose message matches a regular expression"
    )]
    Search {
        #[arg(index = 1)]
        pattern: String,
        #[arg(index = 2, default_value = "HEAD")]
        revision: String,
        #[arg(short = 'n', long, default_value_t = 0, help = "Stop after this many matches (0 = all)")]
        max_count: usize,
        #[arg(long)]
        path: Option<PathBuf>,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(
        name = "last-commit",
        about = "Show the most recent commit that changed a path"
    )]
    LastCommit {
        #[arg(index = 1)]
        path: PathBuf,
        #[arg(index = 2, default_value = "HEAD")]
        revision: String,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(name = "show", about = "Show a single commit")]
    Show {
        #[arg(index = 1, default_value = "HEAD")]
        revision: String,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(name = "count", about = "Count the commits reachable from a revision")]
    Count {
        #[arg(index = 1, default_value = "HEAD")]
        revision: String,
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_color(choice: ColorChoice) {
    let enabled = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    init_color(cli.color);

    let repository = Repository::open(&cli.repository)
        .with_context(|| format!("failed to open {}", cli.repository.display()))?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Log {
            revision,
            page,
            size,
            path,
            display,
        } => repository.log(
            &mut stdout,
            revision,
            *page,
            *size,
            &PageOptions { path: path.clone() },
            &display.options(),
        )?,
        Commands::Search {
            pattern,
            revision,
            max_count,
            path,
            display,
        } => repository.search(
            &mut stdout,
            revision,
            pattern,
            &SearchOptions {
                path: path.clone(),
                max_count: *max_count,
            },
            &display.options(),
        )?,
        Commands::LastCommit {
            path,
            revision,
            display,
        } => repository.last_commit(&mut stdout, revision, path, &display.options())?,
        Commands::Show { revision, display } => {
            repository.show(&mut stdout, revision, &display.options())?
        }
        Commands::Count { revision, path } => {
            repository.count(&mut stdout, revision, &PageOptions { path: path.clone() })?
        }
    }

    Ok(())
}
