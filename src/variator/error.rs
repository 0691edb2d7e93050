//! Error taxonomy and the numeric status codes of the PISA protocol.

use crate::benchmark::EvalError;
use crate::population::Id;

use super::config::ConfigError;
use super::handoff::HandoffError;

/// Status code every state-transition entry point reports to the outer
/// driving loop.
///
/// The numeric values are fixed by the PISA protocol; the driver decides
/// whether a non-zero code aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StatusCode {
    /// Transition completed.
    Success = 0,
    /// General fault: precondition violation, invalid configuration,
    /// operator or evaluator failure.
    UnspecifiedError = 1,
    /// Parameter or hand-off file missing or malformed.
    FileReadError = 2,
}

impl StatusCode {
    /// The protocol integer for this code.
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// Any failure surfaced by a state transition.
///
/// There is no internal retry: every error propagates immediately and the
/// run is considered halted unless the driver decides otherwise.
#[derive(Debug, thiserror::Error)]
pub enum VariatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("expected {expected} selected parents, got {got}")]
    WrongParentCount { expected: usize, got: usize },

    #[error("selected parent {0} is not in the population")]
    UnknownParent(Id),

    #[error("invalid transition to state {state}: {reason}")]
    InvalidTransition { state: u32, reason: &'static str },
}

impl VariatorError {
    /// Maps this error onto the protocol status code.
    pub fn status(&self) -> StatusCode {
        match self {
            VariatorError::Config(e) => e.status(),
            VariatorError::Handoff(_) => StatusCode::FileReadError,
            VariatorError::Eval(_)
            | VariatorError::WrongParentCount { .. }
            | VariatorError::UnknownParent(_)
            | VariatorError::InvalidTransition { .. } => StatusCode::UnspecifiedError,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
