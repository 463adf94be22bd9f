mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, TargetArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agentkit",
    about = "Link shared commands, agents, skills and hooks into AI assistant config directories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Source repository (default: auto-detect from agentkit.yaml or .git/)
    #[arg(long, global = true, env = "AGENTKIT_SOURCE")]
    source: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log every filesystem operation
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Symlink commands/, agents/, skills/ and hooks/ into the tool's config directory
    Install {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the planned symlink operations without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove links created by install
    Uninstall {
        #[command(flatten)]
        target: TargetArgs,

        /// Print what would be removed without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the state of each link
    Status {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Convert markdown commands into Cursor rules
    Convert {
        /// Directory containing command markdown files
        #[arg(long)]
        input: PathBuf,

        /// Output directory for Cursor rules
        #[arg(long)]
        output: PathBuf,
    },

    /// List the commands, agents, skills and hooks in the source repository
    List,

    /// Inspect and validate agentkit.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    // Usage errors exit 1; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = root::resolve_source(cli.source.as_deref());
    tracing::debug!(source = %source.display(), "resolved source repository");

    let result = match cli.command {
        Commands::Install { target, dry_run } => {
            cmd::install::run(&source, &target, dry_run, cli.json)
        }
        Commands::Uninstall { target, dry_run } => {
            cmd::uninstall::run(&source, &target, dry_run, cli.json)
        }
        Commands::Status { target } => cmd::status::run(&source, &target, cli.json),
        Commands::Convert { input, output } => cmd::convert::run(&input, &output, cli.json),
        Commands::List => cmd::list::run(&source, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&source, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
