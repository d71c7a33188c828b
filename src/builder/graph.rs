//! Builder for constructing and validating state graphs.

use crate::builder::error::GraphError;
use crate::builder::state::StateDef;
use crate::core::{Event, EventKind, State, StateGraph, StateNode};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing state graphs with a fluent API.
///
/// # Example
///
/// ```rust
/// use flowkit::builder::{StateDef, StateGraphBuilder, TransitionBuilder};
/// use flowkit::{event_catalog, flow_states};
///
/// flow_states! {
///     pub enum Step {
///         Form,
///         Done,
///     }
/// }
///
/// event_catalog! {
///     pub enum StepEvent: StepEventKind {
///         Submitted,
///     }
/// }
///
/// let graph = StateGraphBuilder::<Step, StepEvent, ()>::new()
///     .define_state(
///         Step::Form,
///         StateDef::new().on(StepEventKind::Submitted, TransitionBuilder::to(Step::Done)),
///     )?
///     .define_state(Step::Done, StateDef::terminal())?
///     .build()?;
///
/// assert!(graph.is_terminal(&Step::Done));
/// # Ok::<(), flowkit::builder::GraphError>(())
/// ```
pub struct StateGraphBuilder<S: State, E: Event, C> {
    order: Vec<S>,
    states: HashMap<S, StateNode<S, E, C>>,
}

impl<S: State, E: Event, C: 'static> StateGraphBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Register a state.
    /// Returns an error if a state with the same name is already registered.
    pub fn define_state(mut self, name: S, def: StateDef<S, E, C>) -> Result<Self, GraphError> {
        if self.states.contains_key(&name) {
            return Err(GraphError::DuplicateState {
                state: name.name().to_string(),
            });
        }

        self.order.push(name.clone());
        self.states.insert(
            name,
            StateNode {
                transitions: def.transitions,
                terminal: def.terminal,
            },
        );
        Ok(self)
    }

    /// Check every state, accumulating all problems in definition order.
    pub fn check(&self) -> Validation<(), NonEmptyVec<GraphError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<GraphError>>> = Vec::new();

        for name in &self.order {
            let Some(node) = self.states.get(name) else {
                continue;
            };

            if node.terminal && !node.transitions.is_empty() {
                checks.push(Validation::fail(GraphError::TerminalHasTransitions {
                    state: name.name().to_string(),
                }));
            }

            for (kind, transition) in &node.transitions {
                if !self.states.contains_key(&transition.destination) {
                    checks.push(Validation::fail(GraphError::DanglingTransition {
                        state: name.name().to_string(),
                        event: kind.name().to_string(),
                        destination: transition.destination.name().to_string(),
                    }));
                }

                if let Some(expected) = transition.payload_kind {
                    if expected != *kind {
                        checks.push(Validation::fail(GraphError::PayloadKindMismatch {
                            state: name.name().to_string(),
                            event: kind.name().to_string(),
                            expected: expected.name().to_string(),
                        }));
                    }
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate the graph, failing with the first problem in definition order.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self.check() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => Err(errors.head().clone()),
        }
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<StateGraph<S, E, C>, GraphError> {
        self.validate()?;

        tracing::debug!(states = self.order.len(), "state graph built");

        Ok(StateGraph {
            order: self.order,
            states: self.states,
        })
    }
}

impl<S: State, E: Event, C: 'static> Default for StateGraphBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransitionBuilder;
    use crate::core::Guard;
    use crate::{event_catalog, flow_states};
    use serde::{Deserialize, Serialize};

    flow_states! {
        enum Step {
            Landing,
            Profile,
            Address,
            Done,
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AddressForm {
        street: String,
    }

    event_catalog! {
        enum StepEvent: StepEventKind {
            Start,
            ProfileSaved,
            AddressSaved(AddressForm),
        }
    }

    type Builder = StateGraphBuilder<Step, StepEvent, u32>;

    fn next(to: Step) -> TransitionBuilder<Step, StepEvent, u32> {
        TransitionBuilder::to(to)
    }

    #[test]
    fn builds_valid_graph() {
        let graph = Builder::new()
            .define_state(Step::Landing, StateDef::new().on(StepEventKind::Start, next(Step::Profile)))
            .unwrap()
            .define_state(
                Step::Profile,
                StateDef::new().on(StepEventKind::ProfileSaved, next(Step::Done)),
            )
            .unwrap()
            .define_state(Step::Done, StateDef::terminal())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(graph.states(), &[Step::Landing, Step::Profile, Step::Done]);
        assert!(graph.contains(&Step::Profile));
        assert!(!graph.contains(&Step::Address));
        assert!(graph.is_terminal(&Step::Done));
        assert!(!graph.is_terminal(&Step::Landing));
        assert_eq!(graph.accepted_events(&Step::Landing), vec![StepEventKind::Start]);
        assert!(graph.accepted_events(&Step::Done).is_empty());
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let result = Builder::new()
            .define_state(Step::Landing, StateDef::new())
            .unwrap()
            .define_state(Step::Landing, StateDef::new());

        assert!(matches!(
            result,
            Err(GraphError::DuplicateState { state }) if state == "Landing"
        ));
    }

    #[test]
    fn dangling_transition_names_state_and_event() {
        let builder = Builder::new()
            .define_state(
                Step::Profile,
                StateDef::new().on(StepEventKind::ProfileSaved, next(Step::Address)),
            )
            .unwrap();

        assert_eq!(
            builder.validate(),
            Err(GraphError::DanglingTransition {
                state: "Profile".to_string(),
                event: "ProfileSaved".to_string(),
                destination: "Address".to_string(),
            })
        );
        assert!(builder.build().is_err());
    }

    #[test]
    fn terminal_state_with_transitions_is_rejected() {
        let builder = Builder::new()
            .define_state(Step::Landing, StateDef::new())
            .unwrap()
            .define_state(
                Step::Done,
                StateDef::terminal().on(StepEventKind::Start, next(Step::Landing)),
            )
            .unwrap();

        assert_eq!(
            builder.validate(),
            Err(GraphError::TerminalHasTransitions {
                state: "Done".to_string()
            })
        );
    }

    #[test]
    fn payload_reducer_under_wrong_kind_is_rejected() {
        let builder = Builder::new()
            .define_state(
                Step::Address,
                StateDef::new().on(
                    StepEventKind::ProfileSaved,
                    next(Step::Address).reduce_with(|n: &u32, _: &AddressForm| n + 1),
                ),
            )
            .unwrap();

        assert_eq!(
            builder.validate(),
            Err(GraphError::PayloadKindMismatch {
                state: "Address".to_string(),
                event: "ProfileSaved".to_string(),
                expected: "AddressSaved".to_string(),
            })
        );
    }

    #[test]
    fn check_accumulates_every_problem_in_order() {
        let builder = Builder::new()
            .define_state(Step::Landing, StateDef::new().on(StepEventKind::Start, next(Step::Profile)))
            .unwrap()
            .define_state(
                Step::Done,
                StateDef::terminal().on(StepEventKind::Start, next(Step::Address)),
            )
            .unwrap();

        match builder.check() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(matches!(&errors[0], GraphError::DanglingTransition { state, .. } if state == "Landing"));
                assert!(matches!(&errors[1], GraphError::TerminalHasTransitions { .. }));
                assert!(matches!(&errors[2], GraphError::DanglingTransition { destination, .. } if destination == "Address"));
                assert_eq!(builder.validate(), Err(errors.head().clone()));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validation_is_deterministic() {
        let make = || {
            Builder::new()
                .define_state(Step::Address, StateDef::new().on(StepEventKind::Start, next(Step::Done)))
                .unwrap()
                .define_state(Step::Landing, StateDef::new().on(StepEventKind::Start, next(Step::Profile)))
                .unwrap()
        };

        let first = make().validate();
        for _ in 0..10 {
            assert_eq!(make().validate(), first);
        }
        assert!(matches!(first, Err(GraphError::DanglingTransition { state, .. }) if state == "Address"));
    }

    #[test]
    fn select_prefers_first_passing_guard() {
        let graph = Builder::new()
            .define_state(
                Step::Landing,
                StateDef::new()
                    .on(
                        StepEventKind::Start,
                        next(Step::Address).guard(Guard::new(|n: &u32, _: &StepEvent| *n > 10)),
                    )
                    .on(StepEventKind::Start, next(Step::Profile)),
            )
            .unwrap()
            .define_state(Step::Profile, StateDef::new())
            .unwrap()
            .define_state(Step::Address, StateDef::new())
            .unwrap()
            .build()
            .unwrap();

        let low = graph.select(&Step::Landing, &1, &StepEvent::Start);
        let high = graph.select(&Step::Landing, &11, &StepEvent::Start);
        let other = graph.select(&Step::Landing, &11, &StepEvent::ProfileSaved);

        assert_eq!(low.map(|t| *t.destination()), Some(Step::Profile));
        assert_eq!(high.map(|t| *t.destination()), Some(Step::Address));
        assert!(other.is_none());
        assert_eq!(graph.accepted_events(&Step::Landing), vec![StepEventKind::Start]);

        let landing = graph.node(&Step::Landing).unwrap();
        assert_eq!(landing.transitions().count(), 2);
        assert!(!landing.is_terminal());
        assert!(graph.node(&Step::Done).is_none());
    }
}
