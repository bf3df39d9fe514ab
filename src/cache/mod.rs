//! Render cache
//!
//! Rendered diagrams are stored under a content fingerprint of their source
//! and render configuration. Entries are reconstructible, so the cache is
//! only ever invalidated as a whole.

pub mod fingerprint;
pub mod invalidate;
pub mod store;

pub use fingerprint::Fingerprint;
pub use invalidate::CacheInvalidator;
pub use store::{format_bytes, CacheEntry, CacheStore, FsCacheStore};

use crate::config::{Config, ConfigManager};

/// Create the cache store described by the configuration
pub fn create_store(config: &Config) -> FsCacheStore {
    FsCacheStore::new(
        config
            .cache
            .dir
            .clone()
            .unwrap_or_else(ConfigManager::default_cache_dir),
    )
}
