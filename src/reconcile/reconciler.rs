//! Package set reconciliation
//!
//! Turns the user's draft into install/uninstall batches, applies them, and
//! then asks the installer what is really installed. Only that answer is ever
//! committed to settings.

use crate::audit::{events, AuditLog};
use crate::config::{Config, SettingsStore};
use crate::error::{TexsyncError, TexsyncResult};
use crate::installer::PackageInstaller;
use crate::notify::{NotificationFactory, Notifier};
use crate::package::{DesiredPackageSet, InstalledPackageSet, PackageName, ReconciliationPlan};
use crate::reconcile::gate::{OperationGate, OperationState};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Outcome of one reconciliation attempt
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    /// Identifier written to the audit log
    pub run_id: Uuid,
    /// What was attempted
    pub plan: ReconciliationPlan,
    /// Result of the uninstall batch (true when skipped)
    pub uninstall_ok: bool,
    /// Result of the install batch (true when skipped)
    pub install_ok: bool,
    /// Installed set re-queried after the attempt
    pub installed: InstalledPackageSet,
}

impl ReconcileReport {
    /// Whether both batches succeeded
    pub fn is_success(&self) -> bool {
        self.install_ok && self.uninstall_ok
    }

    /// The aggregated error for a failed attempt, if any
    pub fn failure(&self) -> Option<TexsyncError> {
        let install = names(&self.plan.to_install);
        let uninstall = names(&self.plan.to_uninstall);

        match (self.install_ok, self.uninstall_ok) {
            (true, true) => None,
            (false, true) => Some(TexsyncError::InstallBatchFailed { packages: install }),
            (true, false) => Some(TexsyncError::UninstallBatchFailed {
                packages: uninstall,
            }),
            (false, false) => Some(TexsyncError::ReconcileFailed { install, uninstall }),
        }
    }

    /// Convert a failed attempt into its aggregated error
    pub fn into_result(self) -> TexsyncResult<Self> {
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

fn names(set: &BTreeSet<PackageName>) -> Vec<String> {
    set.iter().map(|n| n.as_str().to_string()).collect()
}

fn describe(installed: &InstalledPackageSet) -> String {
    if installed.is_empty() {
        "none".to_string()
    } else {
        installed.display()
    }
}

/// Owns the committed package state and is its only writer
pub struct Reconciler {
    installer: Arc<dyn PackageInstaller>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    messages: NotificationFactory,
    audit: Option<AuditLog>,
    gate: OperationGate,
    committed: RwLock<Config>,
}

impl Reconciler {
    /// Create a reconciler starting from the last committed settings
    pub fn new(
        config: Config,
        installer: Arc<dyn PackageInstaller>,
        settings: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            installer,
            settings,
            notifier,
            messages: NotificationFactory::new(&config.notify),
            audit: None,
            gate: OperationGate::new(),
            committed: RwLock::new(config),
        }
    }

    /// Record every operation in the audit log
    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Whether an operation is running
    pub fn state(&self) -> OperationState {
        self.gate.state()
    }

    /// The last committed installed set
    pub fn installed(&self) -> InstalledPackageSet {
        self.read_committed().packages.installed.clone()
    }

    /// The last committed toggle state
    pub fn enabled(&self) -> bool {
        self.read_committed().packages.enabled
    }

    /// The last committed settings
    pub fn settings(&self) -> Config {
        self.read_committed().clone()
    }

    /// Validate raw input and reconcile towards it.
    ///
    /// Invalid input is rejected before any installer call and leaves the
    /// committed settings, including the toggle, untouched.
    pub async fn update(&self, enabled: bool, raw: &str) -> TexsyncResult<ReconcileReport> {
        let _guard = self.gate.try_begin()?;

        let draft = match DesiredPackageSet::from_input(enabled, raw) {
            Ok(draft) => draft,
            Err(err) => {
                debug!("Rejected package input: {}", err);
                self.notifier.notify(&self.messages.error(err.to_string()));
                self.record(events::PACKAGES_REJECTED, serde_json::json!({ "input": raw }))
                    .await;
                return Err(err);
            }
        };

        self.reconcile(draft).await
    }

    /// Reconcile towards an already validated draft
    pub async fn apply(&self, draft: DesiredPackageSet) -> TexsyncResult<ReconcileReport> {
        let _guard = self.gate.try_begin()?;
        self.reconcile(draft).await
    }

    /// Re-query the installer and commit its answer without changing anything
    pub async fn refresh(&self) -> TexsyncResult<InstalledPackageSet> {
        let _guard = self.gate.try_begin()?;

        let installed = self.query().await;
        let mut next = self.settings();
        next.packages.installed = installed.clone();
        self.commit(next).await?;

        self.notifier.notify(
            &self
                .messages
                .info(format!("Installed packages: {}", describe(&installed))),
        );
        self.record(
            events::PACKAGES_REFRESHED,
            serde_json::json!({ "installed": installed }),
        )
        .await;

        Ok(installed)
    }

    async fn reconcile(&self, draft: DesiredPackageSet) -> TexsyncResult<ReconcileReport> {
        let run_id = Uuid::new_v4();
        let plan = ReconciliationPlan::diff(&self.installed(), draft.effective());

        info!(
            "Reconciling packages: {} to install, {} to remove",
            plan.to_install.len(),
            plan.to_uninstall.len()
        );

        // Removal first so a package being replaced is gone before reinstall.
        // An uninstall failure does not stop the install batch.
        let uninstall_ok = if plan.to_uninstall.is_empty() {
            true
        } else {
            let ok = self.installer.uninstall(&plan.uninstall_batch()).await;
            if !ok {
                debug!("Uninstall batch reported failure");
            }
            ok
        };

        let install_ok = if plan.to_install.is_empty() {
            true
        } else {
            let ok = self.installer.install(&plan.install_batch()).await;
            if !ok {
                debug!("Install batch reported failure");
            }
            ok
        };

        let installed = self.query().await;

        let mut next = self.settings();
        next.packages.installed = installed.clone();
        next.packages.enabled = draft.enabled();
        next.packages.declared = draft.names().to_vec();
        self.commit(next).await?;

        let report = ReconcileReport {
            run_id,
            plan,
            uninstall_ok,
            install_ok,
            installed,
        };

        let notification = match report.failure() {
            Some(err) => self.messages.error(format!(
                "{}. Installed now: {}",
                err,
                describe(&report.installed)
            )),
            None if report.plan.is_noop() => self.messages.info("Packages already up to date"),
            None => self.messages.success(format!(
                "Packages updated. Installed now: {}",
                describe(&report.installed)
            )),
        };
        self.notifier.notify(&notification);

        self.record(
            events::PACKAGES_RECONCILED,
            serde_json::json!({
                "run_id": report.run_id,
                "enabled": draft.enabled(),
                "to_install": names(&report.plan.to_install),
                "to_uninstall": names(&report.plan.to_uninstall),
                "install_ok": report.install_ok,
                "uninstall_ok": report.uninstall_ok,
                "installed": report.installed,
            }),
        )
        .await;

        Ok(report)
    }

    async fn query(&self) -> InstalledPackageSet {
        let installed = InstalledPackageSet::from_query(self.installer.query_installed().await);
        debug!("{} reports {} installed package(s)", self.installer.installer_name(), installed.len());
        installed
    }

    /// Persist, then publish to readers. Readers never see a value that
    /// failed to persist.
    async fn commit(&self, next: Config) -> TexsyncResult<()> {
        if let Err(err) = self.settings.save(&next).await {
            error!("Failed to save package settings: {}", err);
            self.notifier.notify(
                &self
                    .messages
                    .error(format!("Failed to save package settings: {}", err)),
            );
            return Err(err);
        }

        *self
            .committed
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    fn read_committed(&self) -> std::sync::RwLockReadGuard<'_, Config> {
        self.committed.read().unwrap_or_else(PoisonError::into_inner)
    }

    async fn record(&self, event: &str, data: serde_json::Value) {
        if let Some(audit) = &self.audit {
            audit.log(event, &data).await;
        }
    }
}
