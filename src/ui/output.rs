//! Terminal rendering of notifications and command results

use super::context::UiContext;
use crate::notify::{Notification, NotifyLevel};
use console::{style, StyledObject};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Ok,
    Info,
    Warn,
    Fail,
}

impl Mark {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Mark::Ok => style("[OK]").green(),
            Mark::Info => style("[INFO]").cyan(),
            Mark::Warn => style("[WARN]").yellow(),
            Mark::Fail => style("[FAIL]").red(),
        }
    }
}

impl From<NotifyLevel> for Mark {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => Mark::Info,
            NotifyLevel::Success => Mark::Ok,
            NotifyLevel::Error => Mark::Fail,
        }
    }
}

fn status_line(ctx: &UiContext, mark: Mark, text: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", mark.tag(), text);
        return;
    }

    let _ = match mark {
        Mark::Ok => cliclack::log::success(text),
        Mark::Info => cliclack::log::info(text),
        Mark::Warn => cliclack::log::warning(text),
        Mark::Fail => cliclack::log::error(text),
    };
}

/// Show a notification as one status line.
///
/// Terminal lines stay on screen, so the display duration only matters to
/// surfaces that dismiss messages on their own.
pub fn notification(ctx: &UiContext, notification: &Notification) {
    status_line(ctx, notification.level.into(), &notification.message);
}

/// Success line with a dimmed detail, e.g. the file that was written
pub fn ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    let detail = if ctx.use_fancy_output() {
        style(detail).dim().to_string()
    } else {
        detail.to_string()
    };
    status_line(ctx, Mark::Ok, &format!("{} ({})", message, detail));
}

/// Warning line telling the user how to proceed
pub fn warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    let hint = if ctx.use_fancy_output() {
        style(hint).dim().to_string()
    } else {
        hint.to_string()
    };
    status_line(ctx, Mark::Warn, &format!("{} - {}", message, hint));
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}
