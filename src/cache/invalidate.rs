//! Bulk invalidation of the render cache

use crate::audit::{events, AuditLog};
use crate::cache::store::CacheStore;
use crate::error::{TexsyncError, TexsyncResult};
use crate::notify::{NotificationFactory, Notifier};
use crate::reconcile::OperationGate;
use std::sync::Arc;
use tracing::{error, info};

/// Clears the whole render cache on request. Never touches package state.
pub struct CacheInvalidator {
    store: Arc<dyn CacheStore>,
    notifier: Arc<dyn Notifier>,
    messages: NotificationFactory,
    audit: Option<AuditLog>,
    gate: OperationGate,
}

impl CacheInvalidator {
    pub fn new(
        store: Arc<dyn CacheStore>,
        notifier: Arc<dyn Notifier>,
        messages: NotificationFactory,
    ) -> Self {
        Self {
            store,
            notifier,
            messages,
            audit: None,
            gate: OperationGate::new(),
        }
    }

    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Issue a single clear-all against the store
    pub async fn clear_all(&self) -> TexsyncResult<usize> {
        let _guard = self.gate.try_begin()?;

        match self.store.clear().await {
            Ok(removed) => {
                info!("Cleared {} cached render(s)", removed);
                self.notifier.notify(
                    &self
                        .messages
                        .success(format!("Render cache cleared ({} entries)", removed)),
                );
                if let Some(audit) = &self.audit {
                    audit
                        .log(events::CACHE_CLEARED, &serde_json::json!({ "removed": removed }))
                        .await;
                }
                Ok(removed)
            }
            Err(err) => {
                let message = err.to_string();
                error!("Failed to clear render cache: {}", message);
                self.notifier.notify(&self.messages.error(message.clone()));
                if let Some(audit) = &self.audit {
                    audit
                        .log(
                            events::CACHE_CLEAR_FAILED,
                            &serde_json::json!({ "error": message }),
                        )
                        .await;
                }
                Err(TexsyncError::CacheClearFailed { message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fingerprint::Fingerprint;
    use crate::cache::store::{CacheEntry, FsCacheStore};
    use crate::notify::BufferedNotifier;
    use crate::notify::NotifyLevel;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Store whose clear always fails
    #[derive(Default)]
    struct BrokenStore {
        clears: AtomicUsize,
    }

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &Fingerprint) -> TexsyncResult<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn set(&self, _key: &Fingerprint, _value: &[u8]) -> TexsyncResult<()> {
            Ok(())
        }

        async fn clear(&self) -> TexsyncResult<usize> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Err(TexsyncError::io(
                "removing cache entry",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        async fn entries(&self) -> TexsyncResult<Vec<CacheEntry>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn clears_and_notifies() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FsCacheStore::new(temp.path().to_path_buf()));
        store.set(&Fingerprint::of("a", b""), b"<svg/>").await.unwrap();
        let notifier = Arc::new(BufferedNotifier::new());
        let invalidator =
            CacheInvalidator::new(store.clone(), notifier.clone(), NotificationFactory::default());

        assert_eq!(invalidator.clear_all().await.unwrap(), 1);
        assert!(store.entries().await.unwrap().is_empty());

        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotifyLevel::Success);
    }

    #[tokio::test]
    async fn failure_surfaces_underlying_message() {
        let store = Arc::new(BrokenStore::default());
        let notifier = Arc::new(BufferedNotifier::new());
        let invalidator =
            CacheInvalidator::new(store.clone(), notifier.clone(), NotificationFactory::default());

        let err = invalidator.clear_all().await.unwrap_err();

        assert_eq!(store.clears.load(Ordering::SeqCst), 1);
        assert!(matches!(err, TexsyncError::CacheClearFailed { ref message } if message.contains("removing cache entry")));
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotifyLevel::Error);
        assert_eq!(notes[0].message, "IO error: removing cache entry");
    }

    #[tokio::test]
    async fn audits_clear() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("audit.log");
        let invalidator = CacheInvalidator::new(
            Arc::new(FsCacheStore::new(temp.path().join("renders"))),
            Arc::new(BufferedNotifier::new()),
            NotificationFactory::default(),
        )
        .with_audit(AuditLog::with_path(log_path.clone()));

        invalidator.clear_all().await.unwrap();

        let content = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert!(content.contains(events::CACHE_CLEARED));
    }
}
