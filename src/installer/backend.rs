//! Package installer abstraction
//!
//! Provides a trait for the component that actually fetches, unpacks and
//! removes packages for the rendering engine.

use crate::package::PackageName;
use async_trait::async_trait;

/// Abstract package installer interface
///
/// Failures are reported as `false` (or an empty list) rather than errors:
/// callers never trust these results as state and always re-query instead.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Check if the installer can be run on this system
    async fn is_available(&self) -> bool;

    /// Install every package in the batch with a single call
    async fn install(&self, batch: &[PackageName]) -> bool;

    /// Remove every package in the batch with a single call
    async fn uninstall(&self, batch: &[PackageName]) -> bool;

    /// Ask the underlying system which packages are installed right now
    async fn query_installed(&self) -> Vec<PackageName>;

    /// Get the human-readable installer name for display
    fn installer_name(&self) -> &str;
}
