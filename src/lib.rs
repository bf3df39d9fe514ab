//! texsync - TeX package set reconciler and render cache
//!
//! Keeps the optional packages available to a rendering engine in line with
//! what the user declared, trusting only what the installer reports back.

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod notify;
pub mod package;
pub mod reconcile;
pub mod ui;

pub use error::{TexsyncError, TexsyncResult};
