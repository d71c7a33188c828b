//! Interpreter running one flow over a shared state graph.

use crate::config::MachineConfig;
use crate::core::{Event, EventKind, State, StateGraph, StateHistory, StateTransition};
use crate::interpreter::error::{DispatchError, MachineError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of one flow instance, used to correlate log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(Uuid);

impl FlowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FlowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Current state and context of a flow, always taken together.
#[derive(Debug)]
pub struct Snapshot<S, C> {
    pub state: S,
    pub context: Arc<C>,
}

impl<S: Clone, C> Clone for Snapshot<S, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            context: Arc::clone(&self.context),
        }
    }
}

impl<S: PartialEq, C> Snapshot<S, C> {
    /// Same state and the very same context value.
    pub fn same_as(&self, other: &Self) -> bool {
        self.state == other.state && Arc::ptr_eq(&self.context, &other.context)
    }
}

/// Outcome of a successful dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatched<S> {
    /// The flow moved (possibly back to the same state)
    Transitioned { from: S, to: S },

    /// The current state does not react to this event
    Ignored,
}

impl<S> Dispatched<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Interpreter for one flow.
///
/// Owns the flow's context exclusively; every transition replaces it with
/// the value produced by the transition's reducer. Dispatch takes
/// `&mut self`, so dispatches on one machine are serialized by construction.
/// Use [`FlowHandle`](crate::interpreter::FlowHandle) to share a machine.
pub struct Machine<S: State, E: Event, C> {
    id: FlowId,
    graph: Arc<StateGraph<S, E, C>>,
    current: S,
    context: Arc<C>,
    history: StateHistory<S>,
    config: MachineConfig,
}

impl<S: State, E: Event, C> Machine<S, E, C> {
    /// Start a flow in `initial` with a context built by `context`.
    ///
    /// The factory runs exactly once, so one graph can start any number of
    /// independent flows.
    pub fn create<F>(
        graph: Arc<StateGraph<S, E, C>>,
        initial: S,
        context: F,
    ) -> Result<Self, MachineError>
    where
        F: FnOnce() -> C,
    {
        Self::with_config(graph, initial, context, MachineConfig::default())
    }

    /// Like [`Machine::create`], with explicit configuration.
    pub fn with_config<F>(
        graph: Arc<StateGraph<S, E, C>>,
        initial: S,
        context: F,
        config: MachineConfig,
    ) -> Result<Self, MachineError>
    where
        F: FnOnce() -> C,
    {
        if !graph.contains(&initial) {
            return Err(MachineError::UnknownInitialState {
                state: initial.name().to_string(),
            });
        }

        let id = FlowId::new();
        tracing::debug!(flow = %id, state = initial.name(), "flow started");

        Ok(Self {
            id,
            graph,
            current: initial,
            context: Arc::new(context()),
            history: StateHistory::new(),
            config,
        })
    }

    pub fn id(&self) -> FlowId {
        self.id
    }

    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Snapshot of state and context (pure).
    pub fn current(&self) -> Snapshot<S, C> {
        Snapshot {
            state: self.current.clone(),
            context: Arc::clone(&self.context),
        }
    }

    /// Whether the flow reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.graph.is_terminal(&self.current)
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn graph(&self) -> &Arc<StateGraph<S, E, C>> {
        &self.graph
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Feed one event to the flow.
    ///
    /// Events the current state does not accept are ignored without error.
    /// When a transition applies, its reducer runs first and the state and
    /// context are replaced together only if it succeeds.
    pub fn dispatch(&mut self, event: &E) -> Result<Dispatched<S>, DispatchError> {
        let kind = event.kind();
        let graph = Arc::clone(&self.graph);

        let Some(transition) = graph.select(&self.current, &self.context, event) else {
            if self.config.log_ignored_events {
                tracing::debug!(flow = %self.id, state = self.current.name(), event = kind.name(), "event ignored");
            } else {
                tracing::trace!(flow = %self.id, state = self.current.name(), event = kind.name(), "event ignored");
            }
            return Ok(Dispatched::Ignored);
        };

        let next_context = transition.apply(&self.context, event).map_err(|source| {
            tracing::warn!(
                flow = %self.id,
                state = self.current.name(),
                event = kind.name(),
                error = %source,
                "reducer failed, flow unchanged"
            );
            DispatchError::ReducerFailed {
                state: self.current.name().to_string(),
                event: kind.name().to_string(),
                source,
            }
        })?;

        let to = transition.destination().clone();
        let from = std::mem::replace(&mut self.current, to.clone());
        self.context = next_context;

        self.history = self.history.record_bounded(
            StateTransition {
                from: from.clone(),
                to: to.clone(),
                event: kind.name().to_string(),
                timestamp: Utc::now(),
            },
            self.config.history_limit,
        );

        tracing::debug!(flow = %self.id, from = from.name(), to = to.name(), event = kind.name(), "transitioned");

        Ok(Dispatched::Transitioned { from, to })
    }
}

impl<S: State, E: Event, C> fmt::Debug for Machine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("transitions", &self.history.len())
            .finish()
    }
}
