//! Programmer-contract violations
//!
//! These are not recoverable errors. A violation leaves the store in an
//! inconsistent state, so it is never handed back as a `Result`: calling
//! [`InvariantViolation::raise`] logs the diagnostic and panics.

use thiserror::Error;

/// A broken store invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A dispatch reached the reducer while another dispatch was still
    /// reducing or notifying subscribers.
    #[error(
        "ConcurrentMutationError: action {action} was dispatched while the store was reducing \
         or notifying subscribers. Reducers and subscribers must not dispatch synchronously, and \
         the store must not be driven from several threads without external serialization"
    )]
    ConcurrentDispatch { action: String },
}

impl InvariantViolation {
    /// Log the violation and abort the current dispatch by panicking
    #[track_caller]
    pub fn raise(self) -> ! {
        log::error!("{}", self);
        panic!("{}", self)
    }
}
