//! Package installer backends
//!
//! The reconciler only talks to the `PackageInstaller` trait; the default
//! backend runs an external package manager such as tlmgr.

mod backend;
mod command;
mod factory;

pub use backend::PackageInstaller;
pub use command::CommandInstaller;
pub use factory::create_installer;
