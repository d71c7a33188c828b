//! Transitions: where an event leads and how it reshapes the context.

use super::event::Event;
use super::guard::Guard;
use super::state::State;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a reducer that cannot produce a next context.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ReduceError {
    message: String,
}

impl ReduceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrap any error raised inside a reducer.
    pub fn from_error<E: std::error::Error>(error: E) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Pure function from `(context, event)` to the next context.
///
/// Reducers receive the context by reference and return a new value; they
/// never modify the context they were given.
pub type Reducer<C, E> = Box<dyn Fn(&C, &E) -> Result<C, ReduceError> + Send + Sync>;

/// A rule moving a flow from one state to `destination`.
pub struct Transition<S: State, E: Event, C> {
    pub(crate) destination: S,
    pub(crate) guard: Option<Guard<C, E>>,
    pub(crate) reducer: Option<Reducer<C, E>>,
    pub(crate) payload_kind: Option<E::Kind>,
}

impl<S: State, E: Event, C> Transition<S, E, C> {
    pub fn destination(&self) -> &S {
        &self.destination
    }

    /// Check the guard, if any (pure).
    pub fn can_execute(&self, context: &C, event: &E) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(context, event))
    }

    /// Payload kind the reducer was written against, when it was built with
    /// a typed payload reducer.
    pub fn payload_kind(&self) -> Option<E::Kind> {
        self.payload_kind
    }

    /// Compute the next context.
    ///
    /// Without a reducer the current context is returned as-is, sharing the
    /// same allocation.
    pub fn apply(&self, context: &Arc<C>, event: &E) -> Result<Arc<C>, ReduceError> {
        match &self.reducer {
            Some(reduce) => reduce(context, event).map(Arc::new),
            None => Ok(Arc::clone(context)),
        }
    }
}

impl<S: State, E: Event, C> fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("destination", &self.destination)
            .field("guarded", &self.guard.is_some())
            .field("reduces", &self.reducer.is_some())
            .field("payload_kind", &self.payload_kind)
            .finish()
    }
}
