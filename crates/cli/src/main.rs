use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use brisk_core::build_manager::{BuildManager, BuildManagerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

/// brisk - A task graph build orchestrator
#[derive(Parser)]
#[command(name = "brisk")]
#[command(about = "Run named build tasks and their dependencies")]
#[command(version)]
struct Cli {
    /// Path to the build root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Build file (defaults to <root>/brisk.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show diagnostic logs (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered tasks
    List,
    /// Show the execution order for a task without running it
    Plan {
        /// Task name, e.g. "elm-bundle"
        task: String,
    },
    /// Run a task after its dependencies
    Run {
        /// Task name, e.g. "elm-bundle"
        task: String,
    },
    /// Show the task dependency graph
    Graph,
    /// Print the JSON schema of the build file
    Schema,
}

fn init_tracing(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::new(if verbose { "debug" } else { "warn" }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // The schema does not need a build file
    if let Commands::Schema = cli.command {
        return commands::schema::execute();
    }

    let manager = BuildManager::new(BuildManagerConfig {
        root: cli.root,
        config_path: cli.config,
    })
    .map_err(|e| anyhow::anyhow!("Failed to load build: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::List => commands::list::execute(&manager),
        Commands::Plan { task } => commands::plan::execute(&manager, &task),
        Commands::Run { task } => commands::run::execute(&manager, &task).await,
        Commands::Graph => commands::graph::execute(&manager),
        Commands::Schema => commands::schema::execute(),
    }
}
