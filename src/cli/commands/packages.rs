//! Packages command - show and reconcile the optional package set

use crate::audit::AuditLog;
use crate::cli::args::{OutputFormat, PackagesAction, PackagesArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{TexsyncError, TexsyncResult};
use crate::installer::create_installer;
use crate::notify::{BufferedNotifier, ConsoleNotifier};
use crate::package::join_names;
use crate::reconcile::Reconciler;
use crate::ui::{self, UiContext};
use std::sync::Arc;

/// Execute the packages command
pub async fn execute(args: PackagesArgs, config: &Config, manager: &ConfigManager) -> TexsyncResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        PackagesAction::Show { format } => show(&ctx, config, format),
        PackagesAction::Set { names } => {
            update(&ctx, config, manager, true, names.join(" ")).await
        }
        PackagesAction::Enable => update(&ctx, config, manager, true, declared(config)).await,
        PackagesAction::Disable => update(&ctx, config, manager, false, declared(config)).await,
        PackagesAction::Sync => sync(&ctx, config, manager).await,
    }
}

/// Names the user last asked for; settings written before these were kept
/// fall back to what is installed
fn declared(config: &Config) -> String {
    let packages = &config.packages;
    if packages.declared.is_empty() {
        packages.installed.display()
    } else {
        join_names(&packages.declared)
    }
}

fn show(ctx: &UiContext, config: &Config, format: OutputFormat) -> TexsyncResult<()> {
    let packages = &config.packages;

    match format {
        OutputFormat::Table => {
            ui::key_value(ctx, "enabled", if packages.enabled { "yes" } else { "no" });
            ui::key_value(ctx, "installer", &config.installer.program);
            if !packages.declared.is_empty() {
                ui::key_value(ctx, "declared", &join_names(&packages.declared));
            }
            let installed = if packages.installed.is_empty() {
                "(none)".to_string()
            } else {
                packages.installed.display()
            };
            ui::key_value(ctx, "installed", &installed);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "enabled": packages.enabled,
                "declared": packages.declared,
                "installed": packages.installed,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => {
            for name in packages.installed.iter() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Reconciler wired to the configured installer; notifications are buffered
/// so they print after the spinner is gone
async fn reconciler(
    config: &Config,
    manager: &ConfigManager,
    buffer: Arc<BufferedNotifier>,
) -> TexsyncResult<Reconciler> {
    let installer = create_installer(config)?;
    // An unreachable installer would list nothing and wipe the committed set
    if !installer.is_available().await {
        return Err(TexsyncError::InstallerUnavailable(
            installer.installer_name().to_string(),
        ));
    }
    let settings = Arc::new(ConfigManager::with_path(manager.path().to_path_buf()));

    Ok(
        Reconciler::new(config.clone(), Arc::from(installer), settings, buffer)
            .with_audit(AuditLog::new(config)),
    )
}

async fn update(
    ctx: &UiContext,
    config: &Config,
    manager: &ConfigManager,
    enabled: bool,
    raw: String,
) -> TexsyncResult<()> {
    let buffer = Arc::new(BufferedNotifier::new());
    let reconciler = reconciler(config, manager, buffer.clone()).await?;

    let result = ui::with_spinner(ctx, "Updating packages...", reconciler.update(enabled, &raw)).await;
    let reported = buffer.flush_to(&ConsoleNotifier::new(ctx.clone()));

    result
        .and_then(|report| report.into_result())
        .map(|_| ())
        .map_err(|e| if reported { e.reported() } else { e })
}

async fn sync(ctx: &UiContext, config: &Config, manager: &ConfigManager) -> TexsyncResult<()> {
    let buffer = Arc::new(BufferedNotifier::new());
    let reconciler = reconciler(config, manager, buffer.clone()).await?;

    let result = ui::with_spinner(ctx, "Checking installed packages...", reconciler.refresh()).await;
    let reported = buffer.flush_to(&ConsoleNotifier::new(ctx.clone()));

    result
        .map(|_| ())
        .map_err(|e| if reported { e.reported() } else { e })
}
