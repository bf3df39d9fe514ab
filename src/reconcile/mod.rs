//! Package set reconciliation
//!
//! # Flow
//!
//! | Step | Action | On failure |
//! |------|--------|------------|
//! | 0 | Gate Idle -> Pending, validate input | reject, nothing called |
//! | 1 | Uninstall batch (skipped when empty) | recorded, continue |
//! | 2 | Install batch (skipped when empty) | recorded, continue |
//! | 3 | Query installed packages | empty list |
//! | 4 | Persist queried set | error returned |
//! | 5 | One notification for the whole attempt | - |

mod gate;
mod reconciler;

pub use gate::{OperationGate, OperationGuard, OperationState};
pub use reconciler::{ReconcileReport, Reconciler};
