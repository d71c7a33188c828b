//! Builder API for state graph construction.
//!
//! This module provides fluent builders and macros for declaring flows
//! with minimal boilerplate while keeping them type-checked. Graphs are
//! validated when built, so definition mistakes surface before any flow
//! starts.

pub mod error;
pub mod graph;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::GraphError;
pub use graph::StateGraphBuilder;
pub use state::StateDef;
pub use transition::TransitionBuilder;
