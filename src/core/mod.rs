//! Core flow types and logic.
//!
//! This module contains the pure part of the engine:
//! - State identifiers via the `State` trait
//! - The event catalog (`Event`, `EventKind`, `Payload`)
//! - Guards, transitions and the validated `StateGraph`
//! - Immutable transition history
//!
//! Nothing in here performs I/O or holds mutable state.

mod event;
mod graph;
mod guard;
mod history;
mod state;
mod transition;

pub use event::{decode_event, Event, EventError, EventKind, Payload};
pub use graph::{StateGraph, StateNode};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
pub use transition::{ReduceError, Reducer, Transition};
