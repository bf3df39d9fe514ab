//! Render cache storage
//!
//! The `CacheStore` trait is all the rest of texsync knows about cache
//! storage. `FsCacheStore` keeps one file per fingerprint in a directory.

use crate::cache::fingerprint::Fingerprint;
use crate::error::{TexsyncError, TexsyncResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File extension of stored artifacts
const ENTRY_EXTENSION: &str = "svg";

/// Format bytes as human-readable size (e.g., "1.5 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// A stored artifact
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: Fingerprint,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

/// Key-value store of rendered artifacts
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up an artifact
    async fn get(&self, key: &Fingerprint) -> TexsyncResult<Option<Vec<u8>>>;

    /// Store an artifact, replacing any previous value
    async fn set(&self, key: &Fingerprint, value: &[u8]) -> TexsyncResult<()>;

    /// Remove every artifact, returning how many were removed
    async fn clear(&self) -> TexsyncResult<usize>;

    /// List stored artifacts
    async fn entries(&self) -> TexsyncResult<Vec<CacheEntry>>;
}

/// Directory-backed cache store
pub struct FsCacheStore {
    dir: PathBuf,
}

impl FsCacheStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &Fingerprint) -> PathBuf {
        self.dir
            .join(format!("{}.{}", key.as_str(), ENTRY_EXTENSION))
    }

    /// Fingerprint for a directory entry, if it is one of ours
    fn entry_key(path: &Path) -> Option<Fingerprint> {
        if path.extension()? != ENTRY_EXTENSION {
            return None;
        }
        Fingerprint::parse(path.file_stem()?.to_str()?).ok()
    }

    /// Paths of all stored entries; a missing directory is an empty cache
    async fn entry_paths(&self) -> TexsyncResult<Vec<(Fingerprint, PathBuf)>> {
        if !self.dir.exists() {
            return Ok(vec![]);
        }

        let mut found = vec![];
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            TexsyncError::io(format!("reading cache directory {}", self.dir.display()), e)
        })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TexsyncError::io("reading cache entry", e))?
        {
            let path = entry.path();
            if let Some(key) = Self::entry_key(&path) {
                found.push((key, path));
            }
        }

        Ok(found)
    }
}

#[async_trait]
impl CacheStore for FsCacheStore {
    async fn get(&self, key: &Fingerprint) -> TexsyncResult<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TexsyncError::io(
                format!("reading cache entry {}", path.display()),
                e,
            )),
        }
    }

    async fn set(&self, key: &Fingerprint, value: &[u8]) -> TexsyncResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            TexsyncError::io(format!("creating cache directory {}", self.dir.display()), e)
        })?;

        // Write then rename so readers never see a half-written artifact
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| TexsyncError::io(format!("writing cache entry {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| TexsyncError::io(format!("writing cache entry {}", path.display()), e))?;

        debug!("Cached {} ({} bytes)", key.short(), value.len());
        Ok(())
    }

    async fn clear(&self) -> TexsyncResult<usize> {
        let mut removed = 0;
        for (key, path) in self.entry_paths().await? {
            fs::remove_file(&path).await.map_err(|e| {
                TexsyncError::io(format!("removing cache entry {}", path.display()), e)
            })?;
            debug!("Removed cache entry {}", key.short());
            removed += 1;
        }
        Ok(removed)
    }

    async fn entries(&self) -> TexsyncResult<Vec<CacheEntry>> {
        let mut entries = vec![];
        for (key, path) in self.entry_paths().await? {
            let meta = fs::metadata(&path).await.map_err(|e| {
                TexsyncError::io(format!("reading metadata of {}", path.display()), e)
            })?;
            let modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            entries.push(CacheEntry {
                key,
                size_bytes: meta.len(),
                modified,
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}
