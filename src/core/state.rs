//! State identifiers for flow graphs.
//!
//! A state is a named point in a flow. States are plain values (usually a
//! unit-only enum) so that transition destinations are checked by the
//! compiler, while graph membership is checked when the graph is built.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for flow state identifiers.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: states key the graph, the breadcrumb table and
///   the host's view table
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: state names appear in JSON breadcrumb
///   tables and transition history
///
/// # Example
///
/// ```rust
/// use flowkit::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum SignerStep {
///     List,
///     Sign,
///     Done,
/// }
///
/// impl State for SignerStep {
///     fn name(&self) -> &str {
///         match self {
///             Self::List => "List",
///             Self::Sign => "Sign",
///             Self::Done => "Done",
///         }
///     }
/// }
///
/// assert_eq!(SignerStep::Sign.name(), "Sign");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The state's unique name, used in errors, logs and ordering.
    fn name(&self) -> &str;
}
