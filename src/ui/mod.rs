//! Terminal UI helpers
//!
//! Uses `cliclack` for spinners and prompts, with automatic fallback to plain
//! output in CI/non-interactive environments.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{key_value, notification, ok_detail, warn_hint};
pub use progress::with_spinner;
pub use prompts::confirm_removal;
