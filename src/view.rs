//! View binding: which renderable unit a flow state shows.
//!
//! The engine never renders anything. A context carries an opaque view
//! descriptor (an identifier plus associated data) set by the reducers of
//! the transitions entering a state, and the host resolves it into whatever
//! its UI toolkit needs.

use crate::core::State;
use crate::interpreter::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque descriptor of a renderable unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewUnit {
    /// Identifier the host maps to a concrete component
    pub id: String,
    /// Data handed to the component as-is
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ViewUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// The unit a state renders plus an optional footer rendered in a separate
/// region of the host page (e.g. a modal body and its fixed action bar).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBinding<V = ViewUnit> {
    pub component: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<V>,
}

impl<V> ViewBinding<V> {
    pub fn new(component: V) -> Self {
        Self {
            component,
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: V) -> Self {
        self.footer = Some(footer);
        self
    }
}

/// A flow context that carries the active view binding.
pub trait ViewContext {
    type View: Clone;

    fn view(&self) -> Option<&ViewBinding<Self::View>>;

    /// Replace the binding. Only called on a fresh copy owned by a reducer.
    fn set_view(&mut self, binding: ViewBinding<Self::View>);
}

/// Host-side lookup table from state to view binding.
///
/// The table is keyed by state only; it never special-cases particular
/// view units.
#[derive(Clone, Debug)]
pub struct ViewTable<S: State, V = ViewUnit> {
    bindings: HashMap<S, ViewBinding<V>>,
}

impl<S: State, V> Default for ViewTable<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, V> ViewTable<S, V> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `state` to a view, replacing any previous binding.
    pub fn bind(mut self, state: S, binding: ViewBinding<V>) -> Self {
        self.bindings.insert(state, binding);
        self
    }

    pub fn get(&self, state: &S) -> Option<&ViewBinding<V>> {
        self.bindings.get(state)
    }

    /// The binding to render for a snapshot: the one carried in context if
    /// any, else the table entry for the snapshot's state.
    pub fn resolve<'a, C>(&'a self, snapshot: &'a Snapshot<S, C>) -> Option<&'a ViewBinding<V>>
    where
        C: ViewContext<View = V>,
    {
        snapshot
            .context
            .view()
            .or_else(|| self.bindings.get(&snapshot.state))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
