//! Confirmation before destructive actions

use super::context::UiContext;
use crate::error::{TexsyncError, TexsyncResult};

/// Ask before removing `what`.
///
/// `--yes` always proceeds. Without a terminal nothing is removed.
pub async fn confirm_removal(ctx: &UiContext, what: &str) -> TexsyncResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(false);
    }

    // cliclack reads stdin synchronously
    let prompt = format!("Remove {}?", what);
    tokio::task::spawn_blocking(move || cliclack::confirm(prompt).initial_value(false).interact())
        .await
        .map_err(|e| TexsyncError::Internal(format!("Prompt task failed: {}", e)))?
        .map_err(|e| TexsyncError::User(format!("Prompt failed: {}", e)))
}
