//! Error types for texsync
//!
//! All modules use `TexsyncResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for texsync operations
pub type TexsyncResult<T> = Result<T, TexsyncError>;

/// All errors that can occur in texsync
#[derive(Error, Debug)]
pub enum TexsyncError {
    // Package input errors
    #[error("Invalid package list {input:?}: only lowercase letters, digits and spaces are allowed")]
    InvalidCharacters { input: String },

    // Reconciliation errors
    #[error("Failed to install packages: {}", .packages.join(" "))]
    InstallBatchFailed { packages: Vec<String> },

    #[error("Failed to uninstall packages: {}", .packages.join(" "))]
    UninstallBatchFailed { packages: Vec<String> },

    #[error(
        "Failed to update packages (install: {}; uninstall: {})",
        .install.join(" "),
        .uninstall.join(" ")
    )]
    ReconcileFailed {
        install: Vec<String>,
        uninstall: Vec<String>,
    },

    #[error("A package update is already in progress")]
    ReconcileInProgress,

    #[error("Package installer not available: {0}")]
    InstallerUnavailable(String),

    // Cache errors
    #[error("Failed to clear render cache: {message}")]
    CacheClearFailed { message: String },

    #[error("Invalid cache key: {0}")]
    CacheKeyInvalid(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),

    /// An error the user has already been notified about
    #[error(transparent)]
    Reported(Box<TexsyncError>),
}

impl TexsyncError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Mark the error as already shown to the user
    pub fn reported(self) -> Self {
        match self {
            Self::Reported(_) => self,
            other => Self::Reported(Box::new(other)),
        }
    }

    /// Whether the user was already notified, so only the exit status remains
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Reported(inner) => inner.hint(),
            Self::InvalidCharacters { .. } => {
                Some("Separate package names with spaces, e.g.: texsync packages set amsmath pgfplots")
            }
            Self::InstallBatchFailed { .. }
            | Self::UninstallBatchFailed { .. }
            | Self::ReconcileFailed { .. } => {
                Some("Run: texsync packages show to see what is actually installed")
            }
            Self::ReconcileInProgress => Some("Wait for the running update to finish"),
            Self::InstallerUnavailable(_) => Some("Set installer.program in: texsync config path"),
            _ => None,
        }
    }
}
