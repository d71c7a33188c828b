//! The stateful shell around the pure core.
//!
//! - **Machine**: owns one flow's state and context and applies events
//! - **FlowHandle**: shares a machine between view units and threads,
//!   rejecting overlapping dispatches and notifying change listeners
//!
//! The interpreter performs no I/O and never suspends. Asynchronous work
//! lives in the host and comes back as ordinary events; a completion that
//! arrives after the flow has moved on is simply ignored.

mod error;
mod handle;
mod machine;

pub use error::{DispatchError, MachineError};
pub use handle::FlowHandle;
pub use machine::{Dispatched, FlowId, Machine, Snapshot};
