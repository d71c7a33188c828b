//! Transition history of a running flow.
//!
//! History is a value: recording a transition returns a new history and
//! leaves the old one untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single transition taken by a flow.
///
/// # Example
///
/// ```rust
/// use flowkit::core::StateTransition;
/// use flowkit::flow_states;
/// use chrono::Utc;
///
/// flow_states! {
///     enum Step {
///         Profile,
///         Address,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Step::Profile,
///     to: Step::Address,
///     event: "ProfileSaved".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "ProfileSaved");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Name of the event kind that caused the transition
    pub event: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions, optionally capped to the most recent ones.
///
/// # Example
///
/// ```rust
/// use flowkit::core::{StateHistory, StateTransition};
/// use flowkit::flow_states;
/// use chrono::Utc;
///
/// flow_states! {
///     enum Step {
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Step::Start,
///         to: Step::Middle,
///         event: "Next".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Step::Middle,
///         to: Step::End,
///         event: "Next".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path(), vec![&Step::Start, &Step::Middle, &Step::End]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        self.record_bounded(transition, None)
    }

    /// Record a transition, keeping at most `limit` of the most recent ones.
    ///
    /// A limit of `Some(0)` keeps nothing.
    pub fn record_bounded(&self, transition: StateTransition<S>, limit: Option<usize>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained transition, then the `to`
    /// of every transition in order. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Landing,
        Profile,
        Taxes,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Landing => "Landing",
                Self::Profile => "Profile",
                Self::Taxes => "Taxes",
                Self::Done => "Done",
            }
        }
    }

    fn step(from: TestState, to: TestState) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: "Next".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step(TestState::Landing, TestState::Profile));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(TestState::Landing, TestState::Profile))
            .record(step(TestState::Profile, TestState::Done));

        assert_eq!(
            history.get_path(),
            vec![&TestState::Landing, &TestState::Profile, &TestState::Done]
        );
    }

    #[test]
    fn record_bounded_drops_oldest() {
        let history = StateHistory::new()
            .record_bounded(step(TestState::Landing, TestState::Profile), Some(2))
            .record_bounded(step(TestState::Profile, TestState::Taxes), Some(2))
            .record_bounded(step(TestState::Taxes, TestState::Done), Some(2));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&TestState::Profile, &TestState::Taxes, &TestState::Done]
        );
        assert_eq!(history.last().map(|t| t.to), Some(TestState::Done));
    }

    #[test]
    fn record_bounded_zero_keeps_nothing() {
        let history =
            StateHistory::new().record_bounded(step(TestState::Landing, TestState::Profile), Some(0));
        assert!(history.is_empty());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(step(TestState::Landing, TestState::Profile));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(TestState::Landing, TestState::Profile));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.transitions()[0].event, "Next");
        assert_eq!(deserialized.transitions()[0].to, TestState::Profile);
    }
}
