//! Errors raised by the interpreter.

use crate::core::ReduceError;
use crate::interpreter::FlowId;
use thiserror::Error;

/// Errors raised while starting a flow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Initial state '{state}' is not defined in the graph")]
    UnknownInitialState { state: String },
}

/// Errors raised by a dispatch. A failed dispatch never changes the flow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Reducer for '{event}' in state '{state}' failed: {source}")]
    ReducerFailed {
        state: String,
        event: String,
        #[source]
        source: ReduceError,
    },

    #[error("Dispatch of '{event}' rejected: flow {flow} is already dispatching")]
    Reentrant { flow: FlowId, event: String },
}
