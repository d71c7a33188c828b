//! Definition-time errors for state graphs.

use thiserror::Error;

/// Errors raised while defining or validating a state graph.
///
/// These indicate a mistake in a flow's static definition and are fatal to
/// the construction call that raised them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("State '{state}' is already defined")]
    DuplicateState { state: String },

    #[error("Transition on '{event}' from state '{state}' points to undefined state '{destination}'")]
    DanglingTransition {
        state: String,
        event: String,
        destination: String,
    },

    #[error("Terminal state '{state}' must not define transitions")]
    TerminalHasTransitions { state: String },

    #[error("Transition on '{event}' from state '{state}' reduces a '{expected}' payload")]
    PayloadKindMismatch {
        state: String,
        event: String,
        expected: String,
    },
}
