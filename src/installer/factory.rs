//! Installer factory
//!
//! Builds the configured package installer.

use crate::config::Config;
use crate::error::{TexsyncError, TexsyncResult};
use crate::installer::backend::PackageInstaller;
use crate::installer::command::CommandInstaller;

/// Create the package installer described by the configuration
///
/// # Returns
/// * `Ok(Box<dyn PackageInstaller>)` - A boxed installer implementation
/// * `Err` - If no installer program is configured
pub fn create_installer(config: &Config) -> TexsyncResult<Box<dyn PackageInstaller>> {
    let program = config.installer.program.trim();
    if program.is_empty() {
        return Err(TexsyncError::InstallerUnavailable(
            "installer.program is empty".to_string(),
        ));
    }

    Ok(Box::new(CommandInstaller::new(config.installer.clone())))
}
