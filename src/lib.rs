//! Flowkit: a typed state machine engine for multi-screen flows
//!
//! Flowkit sequences wizards such as company onboarding, employee
//! onboarding or document signing. A flow is a declarative graph of states;
//! events move the flow between states and reducers thread an
//! application-defined context through every transition. The host renders
//! whatever view unit the current context points at.
//!
//! # Core Concepts
//!
//! - **State graph**: validated, immutable, shared by every flow started from it
//! - **Events**: a closed, typed catalog per flow (see [`event_catalog!`])
//! - **Machine**: owns one flow's state and context; unknown events are no-ops
//! - **Breadcrumbs**: root-first navigation trails derived from parent links
//!
//! # Example
//!
//! ```rust
//! use flowkit::builder::{StateDef, StateGraphBuilder, TransitionBuilder};
//! use flowkit::interpreter::{Dispatched, Machine};
//! use flowkit::{event_catalog, flow_states};
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! flow_states! {
//!     pub enum EmployeeStep {
//!         List,
//!         Profile,
//!         Done,
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! pub struct EmployeeRef {
//!     pub employee_id: String,
//! }
//!
//! event_catalog! {
//!     pub enum EmployeeEvent: EmployeeEventKind {
//!         Edit(EmployeeRef),
//!         Saved,
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct Ctx {
//!     employee_id: Option<String>,
//! }
//!
//! let graph = StateGraphBuilder::<EmployeeStep, EmployeeEvent, Ctx>::new()
//!     .define_state(
//!         EmployeeStep::List,
//!         StateDef::new().on(
//!             EmployeeEventKind::Edit,
//!             TransitionBuilder::to(EmployeeStep::Profile).reduce_with(
//!                 |_: &Ctx, employee: &EmployeeRef| Ctx {
//!                     employee_id: Some(employee.employee_id.clone()),
//!                 },
//!             ),
//!         ),
//!     )?
//!     .define_state(
//!         EmployeeStep::Profile,
//!         StateDef::new().on(EmployeeEventKind::Saved, TransitionBuilder::to(EmployeeStep::Done)),
//!     )?
//!     .define_state(EmployeeStep::Done, StateDef::terminal())?
//!     .build()?;
//!
//! let mut flow = Machine::create(Arc::new(graph), EmployeeStep::List, Ctx::default)?;
//!
//! // List ignores events it does not react to
//! assert_eq!(flow.dispatch(&EmployeeEvent::Saved)?, Dispatched::Ignored);
//!
//! flow.dispatch(&EmployeeEvent::Edit(EmployeeRef { employee_id: "e-42".into() }))?;
//! assert_eq!(flow.state(), &EmployeeStep::Profile);
//! assert_eq!(flow.context().employee_id.as_deref(), Some("e-42"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod breadcrumbs;
pub mod builder;
pub mod config;
pub mod core;
pub mod interpreter;
pub mod view;

// Re-export commonly used types
pub use breadcrumbs::{build_breadcrumbs, BreadcrumbNode, Breadcrumbs};
pub use builder::{StateDef, StateGraphBuilder, TransitionBuilder};
pub use core::{Event, EventKind, Payload, State, StateGraph};
pub use interpreter::{Dispatched, FlowHandle, Machine, Snapshot};
pub use view::{ViewBinding, ViewContext, ViewUnit};
