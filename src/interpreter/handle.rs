//! Shareable handle around a running flow.

use crate::core::{Event, EventKind, State, StateGraph};
use crate::interpreter::error::DispatchError;
use crate::interpreter::machine::{Dispatched, FlowId, Machine, Snapshot};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;

type ChangeListener<S, C> = Arc<dyn Fn(&Snapshot<S, C>) + Send + Sync>;
type OnEvent<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Committed snapshots waiting for delivery to listeners.
///
/// Snapshots are queued in commit order while the flow is locked. One caller
/// at a time drains the queue; any other dispatch only enqueues.
struct Outbox<S, C> {
    pending: VecDeque<Snapshot<S, C>>,
    draining: bool,
}

/// Cloneable, thread-safe handle to one flow.
///
/// View units hold a handle to read the current snapshot and to dispatch
/// events, including completions of their own asynchronous work. Only one
/// dispatch may run at a time: an overlapping dispatch, whether re-entered
/// from a reducer or issued concurrently from another thread, is rejected
/// with [`DispatchError::Reentrant`] and has no effect.
pub struct FlowHandle<S: State, E: Event, C> {
    id: FlowId,
    graph: Arc<StateGraph<S, E, C>>,
    machine: Arc<Mutex<Machine<S, E, C>>>,
    published: Arc<RwLock<Snapshot<S, C>>>,
    listeners: Arc<Mutex<Vec<ChangeListener<S, C>>>>,
    outbox: Arc<Mutex<Outbox<S, C>>>,
    on_event: Option<OnEvent<E>>,
}

impl<S: State, E: Event, C> Clone for FlowHandle<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            graph: Arc::clone(&self.graph),
            machine: Arc::clone(&self.machine),
            published: Arc::clone(&self.published),
            listeners: Arc::clone(&self.listeners),
            outbox: Arc::clone(&self.outbox),
            on_event: self.on_event.clone(),
        }
    }
}

impl<S: State, E: Event, C> FlowHandle<S, E, C> {
    pub fn new(machine: Machine<S, E, C>) -> Self {
        let published = machine.current();
        Self {
            id: machine.id(),
            graph: Arc::clone(machine.graph()),
            machine: Arc::new(Mutex::new(machine)),
            published: Arc::new(RwLock::new(published)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            outbox: Arc::new(Mutex::new(Outbox {
                pending: VecDeque::new(),
                draining: false,
            })),
            on_event: None,
        }
    }

    /// Install the host's side channel for events that leave the flow.
    pub fn with_on_event<F>(mut self, on_event: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.on_event = Some(Arc::new(on_event));
        self
    }

    pub fn id(&self) -> FlowId {
        self.id
    }

    /// The latest committed snapshot.
    ///
    /// Never blocks on a running dispatch; readers see the snapshot from
    /// before it until it commits.
    pub fn current(&self) -> Snapshot<S, C> {
        self.published.read().clone()
    }

    /// Whether the latest committed state is terminal.
    pub fn is_done(&self) -> bool {
        self.graph.is_terminal(&self.published.read().state)
    }

    /// Register a listener called with the new snapshot after each
    /// transition.
    ///
    /// Listeners run after the dispatch has released the flow, so they may
    /// dispatch again. Every listener sees snapshots in commit order. A
    /// dispatch that commits while another caller is still notifying returns
    /// right away, and its snapshot is delivered by that caller once the
    /// earlier ones are done.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Snapshot<S, C>) + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Dispatch an event into the flow.
    pub fn dispatch(&self, event: &E) -> Result<Dispatched<S>, DispatchError> {
        let Some(mut machine) = self.machine.try_lock() else {
            let kind = event.kind();
            tracing::warn!(flow = %self.id, event = kind.name(), "overlapping dispatch rejected");
            return Err(DispatchError::Reentrant {
                flow: self.id,
                event: kind.name().to_string(),
            });
        };

        let outcome = machine.dispatch(event)?;
        if !outcome.is_transition() {
            return Ok(outcome);
        }

        let snapshot = machine.current();
        *self.published.write() = snapshot.clone();
        let drain = {
            let mut outbox = self.outbox.lock();
            outbox.pending.push_back(snapshot);
            !std::mem::replace(&mut outbox.draining, true)
        };
        drop(machine);

        if drain {
            self.notify();
        }

        Ok(outcome)
    }

    fn notify(&self) {
        loop {
            let snapshot = {
                let mut outbox = self.outbox.lock();
                match outbox.pending.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        outbox.draining = false;
                        return;
                    }
                }
            };

            let listeners = self.listeners.lock().clone();
            for listener in &listeners {
                listener(&snapshot);
            }
        }
    }

    /// Forward an event to the host without touching the flow.
    ///
    /// Used for notifications meant for the embedding application, such as
    /// a flow reaching its end.
    pub fn emit(&self, event: &E) {
        match &self.on_event {
            Some(on_event) => on_event(event),
            None => {
                tracing::debug!(flow = %self.id, event = event.kind().name(), "no host listener for emitted event")
            }
        }
    }
}
