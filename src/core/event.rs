//! Event model: the typed catalog of what a flow can react to.
//!
//! Each flow declares a closed enum of events. Every variant is one event
//! kind and carries at most one payload value. The kind enum mirrors the
//! variants without payloads and is what transitions are keyed on.

use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Identifier of an event kind, independent of its payload.
pub trait EventKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Stable name used in errors, logs and history.
    fn name(&self) -> &'static str;
}

/// A flow event: a kind plus an optional payload.
///
/// Events are transient. They are borrowed for the duration of one dispatch
/// and never stored by the interpreter.
pub trait Event: Debug + Send + Sync + 'static {
    type Kind: EventKind;

    fn kind(&self) -> Self::Kind;
}

/// Catalog entry tying a payload type to the single event kind that carries it.
///
/// Lets a reducer be written against the payload shape of its event kind
/// instead of matching on the whole event enum.
pub trait Payload<E: Event>: Sized {
    /// The kind whose events carry this payload.
    fn kind() -> E::Kind;

    /// Borrow the payload out of an event, `None` for any other kind.
    fn extract(event: &E) -> Option<&Self>;
}

/// Errors raised while decoding events from an untyped boundary.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode an event from its `{ "kind": ..., "payload": ... }` JSON form.
///
/// Unknown kinds and payloads of the wrong shape are rejected with a
/// descriptive error before they reach the interpreter.
///
/// # Example
///
/// ```rust
/// use flowkit::core::{decode_event, Event, EventKind};
/// use flowkit::event_catalog;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// pub struct Selection {
///     pub employee_id: String,
/// }
///
/// event_catalog! {
///     pub enum ListEvent: ListEventKind {
///         Selected(Selection),
///         Cancel,
///     }
/// }
///
/// let event: ListEvent =
///     decode_event(r#"{"kind": "Selected", "payload": {"employee_id": "e-1"}}"#).unwrap();
/// assert_eq!(event.kind().name(), "Selected");
///
/// assert!(decode_event::<ListEvent>(r#"{"kind": "Selected", "payload": {}}"#).is_err());
/// ```
pub fn decode_event<E>(json: &str) -> Result<E, EventError>
where
    E: Event + DeserializeOwned,
{
    Ok(serde_json::from_str(json)?)
}
