//! Error types for machine actions.

use thiserror::Error;

/// Returned by machine actions that were rejected without touching state.
///
/// Domain faults (out of stock, declined card, ...) are not errors here: they
/// become an `Error` status the user can see and recover from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("action '{action}' called in invalid state: {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}
