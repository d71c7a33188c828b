//! Definition of a single state before it is registered in a graph.

use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State, Transition};

/// The events one state accepts and whether it ends the flow.
pub struct StateDef<S: State, E: Event, C> {
    pub(crate) transitions: Vec<(E::Kind, Transition<S, E, C>)>,
    pub(crate) terminal: bool,
}

impl<S: State, E: Event, C: 'static> StateDef<S, E, C> {
    /// A non-terminal state with no transitions yet.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            terminal: false,
        }
    }

    /// A terminal state. Terminal states accept no events.
    pub fn terminal() -> Self {
        Self {
            transitions: Vec::new(),
            terminal: true,
        }
    }

    /// React to events of `kind` with the given transition.
    ///
    /// Calling `on` several times with the same kind registers alternatives
    /// tried in order; guards decide which one applies.
    pub fn on(mut self, kind: E::Kind, transition: TransitionBuilder<S, E, C>) -> Self {
        self.transitions.push((kind, transition.build()));
        self
    }
}

impl<S: State, E: Event, C: 'static> Default for StateDef<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
