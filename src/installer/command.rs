//! Command-line package installer
//!
//! Implements the PackageInstaller trait by running an external package
//! manager (tlmgr by default) with configurable arguments.

use crate::config::schema::InstallerConfig;
use crate::error::{TexsyncError, TexsyncResult};
use crate::installer::backend::PackageInstaller;
use crate::package::PackageName;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Installer that shells out to a package manager
pub struct CommandInstaller {
    config: InstallerConfig,
}

impl CommandInstaller {
    /// Create a new command installer
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    /// Execute the installer program and return the output
    async fn exec(&self, args: &[String]) -> TexsyncResult<std::process::Output> {
        debug!("Executing: {} {:?}", self.config.program, args);

        Command::new(&self.config.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                TexsyncError::command_failed(format!("{} {:?}", self.config.program, args), e)
            })
    }

    /// Run a mutating batch command; true only on a zero exit status
    async fn run_batch(&self, base: &[String], batch: &[PackageName]) -> bool {
        let args = batch_args(base, batch);

        match self.exec(&args).await {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    "{} exited with {}: {}",
                    self.config.program,
                    output.status,
                    stderr.trim()
                );
                false
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

#[async_trait]
impl PackageInstaller for CommandInstaller {
    async fn is_available(&self) -> bool {
        Command::new(&self.config.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }

    async fn install(&self, batch: &[PackageName]) -> bool {
        info!("Installing {} package(s)", batch.len());
        self.run_batch(&self.config.install_args, batch).await
    }

    async fn uninstall(&self, batch: &[PackageName]) -> bool {
        info!("Removing {} package(s)", batch.len());
        self.run_batch(&self.config.uninstall_args, batch).await
    }

    async fn query_installed(&self) -> Vec<PackageName> {
        let output = match self.exec(&self.config.list_args).await {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                warn!(
                    "Listing installed packages failed ({}): {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                return vec![];
            }
            Err(e) => {
                warn!("{}", e);
                return vec![];
            }
        };

        parse_package_list(&String::from_utf8_lossy(&output.stdout))
    }

    fn installer_name(&self) -> &str {
        &self.config.program
    }
}

fn batch_args(base: &[String], batch: &[PackageName]) -> Vec<String> {
    base.iter()
        .cloned()
        .chain(batch.iter().map(|name| name.as_str().to_string()))
        .collect()
}

/// Parse one package name per line, skipping blanks and names that are not
/// valid package identifiers (collections, architecture-specific binaries)
fn parse_package_list(stdout: &str) -> Vec<PackageName> {
    let mut skipped = 0usize;
    let names: Vec<PackageName> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match PackageName::parse(line) {
            Ok(name) => Some(name),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!("Ignored {} installed entries with unsupported names", skipped);
    }
    names
}
