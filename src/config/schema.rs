//! Configuration schema for texsync
//!
//! Configuration is stored at `~/.config/texsync/config.toml`

use crate::package::{InstalledPackageSet, PackageName};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Committed package state
    pub packages: PackagesConfig,

    /// Package installer backend
    pub installer: InstallerConfig,

    /// Render cache settings
    pub cache: CacheConfig,

    /// User notification settings
    pub notify: NotifyConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,

    /// Enable audit logging
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
            audit_log: true,
        }
    }
}

/// Committed package settings.
///
/// `installed` is only ever written from an installer query; `declared` is
/// what the user asked for and may differ from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Whether optional packages are enabled at all
    pub enabled: bool,

    /// Names from the last accepted update, kept while disabled so that
    /// enabling again restores them
    pub declared: Vec<PackageName>,

    /// Packages the installer last reported as installed
    pub installed: InstalledPackageSet,
}

/// External installer command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Program to run
    pub program: String,

    /// Arguments for installing; package names are appended
    pub install_args: Vec<String>,

    /// Arguments for removing; package names are appended
    pub uninstall_args: Vec<String>,

    /// Arguments that print installed package names, one per line
    pub list_args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "tlmgr".to_string(),
            install_args: vec!["install".to_string()],
            uninstall_args: vec!["remove".to_string()],
            list_args: vec![
                "info".to_string(),
                "--only-installed".to_string(),
                "--data".to_string(),
                "name".to_string(),
            ],
        }
    }
}

/// Render cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory override (default: `~/.cache/texsync/renders`)
    pub dir: Option<PathBuf>,
}

/// Notification display durations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// How long regular messages stay visible, in milliseconds
    pub duration_ms: u64,

    /// How long failure messages stay visible, in milliseconds
    pub error_duration_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            duration_ms: 4000,
            error_duration_ms: 8000,
        }
    }
}
