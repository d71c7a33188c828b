//! The validated, immutable state graph of a flow.

use super::event::{Event, EventKind};
use super::state::State;
use super::transition::Transition;
use std::collections::HashMap;
use std::fmt;

/// One registered state and the events it accepts.
pub struct StateNode<S: State, E: Event, C> {
    pub(crate) transitions: Vec<(E::Kind, Transition<S, E, C>)>,
    pub(crate) terminal: bool,
}

impl<S: State, E: Event, C> StateNode<S, E, C> {
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Transitions in definition order, keyed by event kind.
    pub fn transitions(&self) -> impl Iterator<Item = (E::Kind, &Transition<S, E, C>)> {
        self.transitions.iter().map(|(kind, t)| (*kind, t))
    }
}

/// Static description of a flow: states, accepted events and destinations.
///
/// A `StateGraph` can only be obtained from
/// [`StateGraphBuilder::build`](crate::builder::StateGraphBuilder::build), so
/// every graph in circulation has passed validation. It holds no mutable
/// state and is meant to be shared behind an `Arc` by every flow started
/// from it.
pub struct StateGraph<S: State, E: Event, C> {
    pub(crate) order: Vec<S>,
    pub(crate) states: HashMap<S, StateNode<S, E, C>>,
}

impl<S: State, E: Event, C> StateGraph<S, E, C> {
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    pub fn node(&self, state: &S) -> Option<&StateNode<S, E, C>> {
        self.states.get(state)
    }

    pub fn is_terminal(&self, state: &S) -> bool {
        self.states.get(state).is_some_and(|node| node.terminal)
    }

    /// Registered states in definition order.
    pub fn states(&self) -> &[S] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct event kinds `state` reacts to, in definition order.
    pub fn accepted_events(&self, state: &S) -> Vec<E::Kind> {
        let mut kinds: Vec<E::Kind> = Vec::new();
        if let Some(node) = self.states.get(state) {
            for (kind, _) in &node.transitions {
                if !kinds.contains(kind) {
                    kinds.push(*kind);
                }
            }
        }
        kinds
    }

    /// Pick the transition `event` triggers from `state` (pure).
    ///
    /// The first transition registered for the event's kind whose guard
    /// passes wins. `None` means the event is ignored in this state.
    pub fn select(&self, state: &S, context: &C, event: &E) -> Option<&Transition<S, E, C>> {
        let kind = event.kind();
        self.states.get(state).and_then(|node| {
            node.transitions
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, t)| t)
                .find(|t| t.can_execute(context, event))
        })
    }
}

impl<S: State, E: Event, C> fmt::Debug for StateGraph<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for state in &self.order {
            let events: Vec<&'static str> = self
                .accepted_events(state)
                .iter()
                .map(|kind| kind.name())
                .collect();
            map.entry(&state.name(), &events);
        }
        map.finish()
    }
}
