//! promptpush CLI
//!
//! Validates the optimized bug-to-user-story prompt and publishes it to the
//! LangSmith prompt hub. Exits 0 when the prompt was published, 1 otherwise.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, PushCommand};
use promptpush_core::{config::AppConfig, logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// promptpush - publish versioned prompts to the LangSmith hub
#[derive(Parser, Debug)]
#[command(name = "promptpush")]
#[command(about = "Validate and publish prompts to the LangSmith hub", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PROMPTPUSH_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTPUSH_CONFIG")]
    config: Option<PathBuf>,

    /// Prompt YAML file, relative to the workspace
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Top-level key of the prompt inside the file
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Hub API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Hub owner handle ("-" is the API key's own tenant)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the prompt and publish it to the hub (default)
    Push(PushCommand),

    /// Lint prompts locally without publishing
    Check(CheckCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.workspace, cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = config.with_overrides(
        cli.file,
        cli.key,
        cli.endpoint,
        cli.owner,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    if let Err(e) = logging::init_logging(config.log_level.as_deref(), config.no_color) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("promptpush starting");
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Prompt: {} in {:?}", config.prompt.key, config.prompt.file);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Push(PushCommand::default()));

    let command_name = match &command {
        Commands::Push(_) => "push",
        Commands::Check(_) => "check",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match command {
        Commands::Push(cmd) => cmd.execute(&config).await,
        Commands::Check(cmd) => cmd.execute(&config),
    };

    match result {
        Ok(code) => {
            tracing::info!("Command finished");
            code
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
