//! Cache command - inspect and clear the render cache

use crate::audit::AuditLog;
use crate::cache::{self, format_bytes, CacheEntry, CacheInvalidator, CacheStore};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::TexsyncResult;
use crate::notify::{BufferedNotifier, ConsoleNotifier, NotificationFactory};
use crate::ui::{self, UiContext};
use std::sync::Arc;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> TexsyncResult<()> {
    let store = Arc::new(cache::create_store(config));

    match args.action {
        CacheAction::List { format } => list(&*store, format).await,
        CacheAction::Clear { yes } => clear(store, config, yes).await,
    }
}

async fn list(store: &dyn CacheStore, format: OutputFormat) -> TexsyncResult<()> {
    let entries = store.entries().await?;

    match format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.key);
            }
        }
    }

    Ok(())
}

fn print_table(entries: &[CacheEntry]) {
    if entries.is_empty() {
        println!("Render cache is empty.");
        return;
    }

    println!("{:<14} {:>10} {:<20}", "KEY", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(46));

    let mut total = 0;
    for entry in entries {
        total += entry.size_bytes;
        println!(
            "{:<14} {:>10} {:<20}",
            entry.key.short(),
            format_bytes(entry.size_bytes),
            entry.modified.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
    println!("Total: {} render(s), {}", entries.len(), format_bytes(total));
}

fn print_json(entries: &[CacheEntry]) -> TexsyncResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson<'a> {
        key: &'a str,
        size_bytes: u64,
        modified: String,
    }

    let json: Vec<EntryJson<'_>> = entries
        .iter()
        .map(|e| EntryJson {
            key: e.key.as_str(),
            size_bytes: e.size_bytes,
            modified: e.modified.to_rfc3339(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn clear(store: Arc<cache::FsCacheStore>, config: &Config, yes: bool) -> TexsyncResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    let count = store.entries().await?.len();
    if !ui::confirm_removal(&ctx, &format!("{} cached render(s)", count)).await? {
        ui::warn_hint(&ctx, "Cache not cleared", "Pass --yes to skip the prompt");
        return Ok(());
    }

    let buffer = Arc::new(BufferedNotifier::new());
    let invalidator = CacheInvalidator::new(
        store,
        buffer.clone(),
        NotificationFactory::new(&config.notify),
    )
    .with_audit(AuditLog::new(config));

    let result = ui::with_spinner(&ctx, "Clearing render cache...", invalidator.clear_all()).await;
    let reported = buffer.flush_to(&ConsoleNotifier::new(ctx));

    result
        .map(|_| ())
        .map_err(|e| if reported { e.reported() } else { e })
}
