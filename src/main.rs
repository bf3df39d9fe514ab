//! texsync - CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::io::IsTerminal;
use std::process::ExitCode;
use texsync::cli::{Cli, Commands};
use texsync::config::ConfigManager;
use texsync::error::TexsyncResult;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{} {}", style("Error:").red().bold(), e);
            }
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> TexsyncResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    // 0 = warn, 1 = info, 2+ = debug; the config file can raise the floor to info
    let level = match cli.verbose {
        0 if config.general.verbose => "info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("texsync={level}"));

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Packages(args) => {
            texsync::cli::commands::packages(args, &config, &config_manager).await
        }
        Commands::Cache(args) => texsync::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            texsync::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
