//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// texsync - keep a rendering engine's TeX packages in sync
///
/// Declare which optional packages the renderer should have; texsync
/// installs and removes the difference and manages the render cache.
#[derive(Parser, Debug)]
#[command(name = "texsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TEXSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the optional package set
    Packages(PackagesArgs),

    /// Manage the render cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the packages command
#[derive(Parser, Debug)]
pub struct PackagesArgs {
    /// Subcommand for packages
    #[command(subcommand)]
    pub action: PackagesAction,
}

/// Packages subcommands
#[derive(Subcommand, Debug)]
pub enum PackagesAction {
    /// Show the committed package state
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Replace the package set (enables packages)
    Set {
        /// Package names, space separated (e.g. amsmath pgfplots)
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Enable packages, installing the names from the last `set`
    Enable,

    /// Disable packages, removing everything installed (the names from the
    /// last `set` are kept for `enable`)
    Disable,

    /// Re-read installed packages from the installer
    Sync,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached renders
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove every cached render
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
