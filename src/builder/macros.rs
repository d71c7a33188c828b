//! Macros for declaring flow states and event catalogs.

/// Generate a state enum and its `State` implementation.
///
/// # Example
///
/// ```
/// use flowkit::core::State;
/// use flowkit::flow_states;
///
/// flow_states! {
///     pub enum SignerState {
///         DocumentList,
///         SignForm,
///         Done,
///     }
/// }
///
/// assert_eq!(SignerState::SignForm.name(), "SignForm");
/// ```
#[macro_export]
macro_rules! flow_states {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate a flow's event catalog: the event enum, its kind enum, and one
/// `Payload` implementation per payload-carrying variant.
///
/// Each variant carries at most one payload value. `Payload` is implemented on
/// the payload type itself, so payload types must be distinct across
/// variants; two events carrying the same data get a newtype each (see the
/// second example). Events serialize as
/// `{ "kind": "<Variant>", "payload": <value> }`.
///
/// # Example
///
/// ```
/// use flowkit::core::{Event, EventKind, Payload};
/// use flowkit::event_catalog;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// pub struct EmployeeRef {
///     pub employee_id: String,
/// }
///
/// event_catalog! {
///     pub enum EmployeeEvent: EmployeeEventKind {
///         Created(EmployeeRef),
///         Cancelled,
///     }
/// }
///
/// let event = EmployeeEvent::Created(EmployeeRef { employee_id: "e-1".into() });
/// assert_eq!(event.kind(), EmployeeEventKind::Created);
/// assert_eq!(EmployeeEventKind::Cancelled.name(), "Cancelled");
/// assert_eq!(
///     EmployeeRef::extract(&event).map(|r| r.employee_id.as_str()),
///     Some("e-1")
/// );
/// ```
///
/// Two variants that both carry an employee id:
///
/// ```
/// use flowkit::core::{Event, Payload};
/// use flowkit::event_catalog;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// pub struct Hired(pub String);
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// pub struct Terminated(pub String);
///
/// event_catalog! {
///     pub enum StaffEvent: StaffEventKind {
///         Hire(Hired),
///         Terminate(Terminated),
///     }
/// }
///
/// let event = StaffEvent::Terminate(Terminated("e-7".into()));
/// assert_eq!(<Terminated as Payload<StaffEvent>>::kind(), event.kind());
/// assert!(Hired::extract(&event).is_none());
/// assert_eq!(Terminated::extract(&event).map(|t| t.0.as_str()), Some("e-7"));
/// ```
#[macro_export]
macro_rules! event_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $payload:ty ) )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(tag = "kind", content = "payload")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $( ($payload) )?
            ),*
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $kind {
            $($variant),*
        }

        impl $crate::core::EventKind for $kind {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl $crate::core::Event for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant { .. } => $kind::$variant),*
                }
            }
        }

        $($(
            impl $crate::core::Payload<$name> for $payload {
                fn kind() -> $kind {
                    $kind::$variant
                }

                #[allow(unreachable_patterns)]
                fn extract(event: &$name) -> ::core::option::Option<&Self> {
                    match event {
                        $name::$variant(payload) => ::core::option::Option::Some(payload),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        )?)*
    };
}
