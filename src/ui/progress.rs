//! Spinner around long-running operations, with CI fallback

use super::context::UiContext;
use console::style;
use std::future::Future;

/// Await `task` behind a spinner.
///
/// The spinner is gone by the time this returns, so the caller can print the
/// outcome without it being overdrawn.
pub async fn with_spinner<F: Future>(ctx: &UiContext, message: &str, task: F) -> F::Output {
    if !ctx.use_fancy_output() {
        println!("{} {}", style("...").dim(), message);
        return task.await;
    }

    let spinner = cliclack::spinner();
    spinner.start(message);
    let output = task.await;
    spinner.clear();
    output
}
