//! Idle/Pending guard for mutating operations
//!
//! Only one package operation may be in flight at a time. A second caller is
//! rejected, not queued.

use crate::error::{TexsyncError, TexsyncResult};
use std::sync::{Mutex, PoisonError};

/// Whether an operation is currently running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Idle,
    Pending,
}

/// Entry guard shared by all mutating operations
#[derive(Debug, Default)]
pub struct OperationGate {
    state: Mutex<OperationState>,
}

impl OperationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> OperationState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move Idle -> Pending, or fail if an operation is already running.
    ///
    /// The returned guard moves the gate back to Idle when dropped.
    pub fn try_begin(&self) -> TexsyncResult<OperationGuard<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            OperationState::Pending => Err(TexsyncError::ReconcileInProgress),
            OperationState::Idle => {
                *state = OperationState::Pending;
                Ok(OperationGuard { gate: self })
            }
        }
    }
}

/// Held for the duration of one operation
#[derive(Debug)]
pub struct OperationGuard<'a> {
    gate: &'a OperationGate,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        *self.gate.state.lock().unwrap_or_else(PoisonError::into_inner) = OperationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(OperationGate::new().state(), OperationState::Idle);
    }

    #[test]
    fn second_begin_is_rejected() {
        let gate = OperationGate::new();
        let guard = gate.try_begin().unwrap();
        assert_eq!(gate.state(), OperationState::Pending);

        assert!(matches!(
            gate.try_begin(),
            Err(TexsyncError::ReconcileInProgress)
        ));

        drop(guard);
        assert_eq!(gate.state(), OperationState::Idle);
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn guard_resets_on_early_return() {
        fn failing(gate: &OperationGate) -> TexsyncResult<()> {
            let _guard = gate.try_begin()?;
            Err(TexsyncError::Internal("boom".to_string()))
        }

        let gate = OperationGate::new();
        assert!(failing(&gate).is_err());
        assert_eq!(gate.state(), OperationState::Idle);
    }
}
