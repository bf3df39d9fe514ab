//! User-facing notifications
//!
//! Fire-and-forget messages with a display duration. The CLI prints them
//! through the `ui` helpers; embedders can route them to their own surface.

use crate::config::schema::NotifyConfig;
use crate::ui::{self, UiContext};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// A single message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub duration: Duration,
}

/// Message channel to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Builds notifications with the configured display durations
#[derive(Debug, Clone)]
pub struct NotificationFactory {
    duration: Duration,
    error_duration: Duration,
}

impl NotificationFactory {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            error_duration: Duration::from_millis(config.error_duration_ms),
        }
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.build(message, NotifyLevel::Info, self.duration)
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.build(message, NotifyLevel::Success, self.duration)
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.build(message, NotifyLevel::Error, self.error_duration)
    }

    fn build(&self, message: impl Into<String>, level: NotifyLevel, duration: Duration) -> Notification {
        Notification {
            message: message.into(),
            level,
            duration,
        }
    }
}

impl Default for NotificationFactory {
    fn default() -> Self {
        Self::new(&NotifyConfig::default())
    }
}

/// Prints notifications to the terminal
pub struct ConsoleNotifier {
    ctx: UiContext,
}

impl ConsoleNotifier {
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        ui::notification(&self.ctx, notification);
    }
}

/// Holds notifications until the caller is ready to show them, e.g. after a
/// spinner has been cleared
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    pending: Mutex<Vec<Notification>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification received so far, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Forward everything received so far to another notifier.
    ///
    /// Returns whether an error was among them, i.e. whether the user has
    /// already been told about a failure.
    pub fn flush_to(&self, target: &dyn Notifier) -> bool {
        let mut had_error = false;
        for notification in self.drain() {
            had_error |= notification.level == NotifyLevel::Error;
            target.notify(&notification);
        }
        had_error
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&self, notification: &Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
