//! CLI command implementations

pub mod cache;
pub mod config;
pub mod packages;

pub use cache::execute as cache;
pub use config::execute as config;
pub use packages::execute as packages;
