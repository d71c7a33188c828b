use flowkit::breadcrumbs::{build_breadcrumbs, BreadcrumbError, BreadcrumbNode};
use flowkit::builder::{StateDef, StateGraphBuilder, TransitionBuilder};
use flowkit::core::{Event, ReduceError, State, StateGraph};
use flowkit::interpreter::{Dispatched, Machine};
use flowkit::{event_catalog, flow_states};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

flow_states! {
    enum Step {
        Idle,
        Editing,
        Review,
        Done,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Delta(u32);

event_catalog! {
    enum StepEvent: StepEventKind {
        Begin,
        Edit(Delta),
        Submit,
        Reopen,
        Finish,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Counter {
    total: u32,
    edits: u32,
}

fn graph() -> Arc<StateGraph<Step, StepEvent, Counter>> {
    let graph = StateGraphBuilder::<Step, StepEvent, Counter>::new()
        .define_state(
            Step::Idle,
            StateDef::new().on(
                StepEventKind::Begin,
                TransitionBuilder::to(Step::Editing).reduce(|_: &Counter, _| Counter::default()),
            ),
        )
        .unwrap()
        .define_state(
            Step::Editing,
            StateDef::new()
                .on(
                    StepEventKind::Edit,
                    TransitionBuilder::to(Step::Editing).reduce_with(|ctx: &Counter, d: &Delta| {
                        Counter {
                            total: ctx.total.wrapping_add(d.0),
                            edits: ctx.edits + 1,
                        }
                    }),
                )
                .on(StepEventKind::Submit, TransitionBuilder::to(Step::Review)),
        )
        .unwrap()
        .define_state(
            Step::Review,
            StateDef::new()
                .on(
                    StepEventKind::Reopen,
                    TransitionBuilder::to(Step::Editing).try_reduce(|ctx: &Counter, _| {
                        if ctx.total % 2 == 1 {
                            Err(ReduceError::new("odd totals cannot be reopened"))
                        } else {
                            Ok(ctx.clone())
                        }
                    }),
                )
                .on(StepEventKind::Finish, TransitionBuilder::to(Step::Done)),
        )
        .unwrap()
        .define_state(Step::Done, StateDef::terminal())
        .unwrap()
        .build()
        .unwrap();
    Arc::new(graph)
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> Step {
        match variant {
            0 => Step::Idle,
            1 => Step::Editing,
            2 => Step::Review,
            _ => Step::Done,
        }
    }
}

fn arbitrary_event() -> impl Strategy<Value = StepEvent> {
    prop_oneof![
        Just(StepEvent::Begin),
        (0..10u32).prop_map(|d| StepEvent::Edit(Delta(d))),
        Just(StepEvent::Submit),
        Just(StepEvent::Reopen),
        Just(StepEvent::Finish),
    ]
}

prop_compose! {
    fn arbitrary_counter()(total in 0..50u32, edits in 0..5u32) -> Counter {
        Counter { total, edits }
    }
}

proptest! {
    #[test]
    fn every_dispatch_upholds_transition_contract(
        start in arbitrary_state(),
        events in prop::collection::vec(arbitrary_event(), 0..30)
    ) {
        let graph = graph();
        let mut machine = Machine::create(Arc::clone(&graph), start, Counter::default).unwrap();

        for event in &events {
            let before = machine.current();
            let accepted = graph.accepted_events(&before.state).contains(&event.kind());

            match machine.dispatch(event) {
                Ok(Dispatched::Ignored) => {
                    prop_assert!(!accepted);
                    prop_assert!(machine.current().same_as(&before));
                }
                Ok(Dispatched::Transitioned { from, to }) => {
                    let transition = graph.select(&before.state, &before.context, event).unwrap();
                    let expected = transition.apply(&before.context, event).unwrap();

                    prop_assert_eq!(from, before.state);
                    prop_assert_eq!(to, *transition.destination());
                    prop_assert_eq!(machine.state(), &to);
                    prop_assert_eq!(machine.context(), expected.as_ref());
                }
                Err(_) => {
                    prop_assert!(accepted);
                    prop_assert!(machine.current().same_as(&before));
                }
            }
        }
    }

    #[test]
    fn terminal_state_never_moves(events in prop::collection::vec(arbitrary_event(), 0..20)) {
        let mut machine = Machine::create(graph(), Step::Done, Counter::default).unwrap();
        let before = machine.current();

        for event in &events {
            prop_assert_eq!(machine.dispatch(event).unwrap(), Dispatched::Ignored);
        }
        prop_assert!(machine.current().same_as(&before));
        prop_assert!(machine.is_done());
    }

    #[test]
    fn reducers_are_pure(ctx in arbitrary_counter(), event in arbitrary_event(), state in arbitrary_state()) {
        let graph = graph();
        let ctx = Arc::new(ctx);

        let before = ctx.as_ref().clone();

        if let Some(transition) = graph.select(&state, &ctx, &event) {
            let first = transition.apply(&ctx, &event);
            let second = transition.apply(&ctx, &event);

            prop_assert_eq!(first.as_deref(), second.as_deref());
        }
        prop_assert_eq!(ctx.as_ref(), &before);
    }

    #[test]
    fn history_tracks_every_transition(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut machine = Machine::create(graph(), Step::Idle, Counter::default).unwrap();
        let mut transitions = 0;

        for event in &events {
            if let Ok(Dispatched::Transitioned { .. }) = machine.dispatch(event) {
                transitions += 1;
            }
        }

        prop_assert_eq!(machine.history().len(), transitions);
        if let Some(last) = machine.history().last() {
            prop_assert_eq!(&last.to, machine.state());
        }
    }
}

flow_states! {
    enum Node {
        N0,
        N1,
        N2,
        N3,
        N4,
        N5,
        N6,
        N7,
        N8,
        N9,
    }
}

const NODES: [Node; 10] = [
    Node::N0,
    Node::N1,
    Node::N2,
    Node::N3,
    Node::N4,
    Node::N5,
    Node::N6,
    Node::N7,
    Node::N8,
    Node::N9,
];

prop_compose! {
    // Parents always point at an earlier node, so the table is a forest.
    fn arbitrary_forest()(links in prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 1..10))
        -> Vec<Option<usize>>
    {
        links
            .iter()
            .enumerate()
            .map(|(i, (root, index))| if i == 0 || *root { None } else { Some(index.index(i)) })
            .collect()
    }
}

fn table(parents: &[Option<usize>]) -> HashMap<Node, BreadcrumbNode<Node, String>> {
    parents
        .iter()
        .enumerate()
        .map(|(i, parent)| {
            let item = format!("item-{i}");
            let node = match parent {
                Some(p) => BreadcrumbNode::child(NODES[*p], item),
                None => BreadcrumbNode::root(item),
            };
            (NODES[i], node)
        })
        .collect()
}

proptest! {
    #[test]
    fn breadcrumb_trails_follow_parent_links(parents in arbitrary_forest()) {
        let nodes = table(&parents);
        let trails = build_breadcrumbs(&nodes).unwrap();

        prop_assert_eq!(trails.len(), parents.len());
        for (i, parent) in parents.iter().enumerate() {
            let mut expected = vec![format!("item-{i}")];
            let mut cursor = *parent;
            while let Some(p) = cursor {
                expected.insert(0, format!("item-{p}"));
                cursor = parents[p];
            }
            prop_assert_eq!(&trails[&NODES[i]], &expected);
        }
    }

    #[test]
    fn root_trail_is_single_item(parents in arbitrary_forest()) {
        let nodes = table(&parents);
        let trails = build_breadcrumbs(&nodes).unwrap();

        for (i, parent) in parents.iter().enumerate() {
            if parent.is_none() {
                prop_assert_eq!(&trails[&NODES[i]], &vec![format!("item-{i}")]);
            }
        }
    }

    #[test]
    fn breadcrumbs_leave_input_untouched_and_are_order_independent(parents in arbitrary_forest()) {
        let nodes = table(&parents);
        let snapshot = nodes.clone();

        let first = build_breadcrumbs(&nodes).unwrap();
        let mut entries: Vec<_> = nodes.clone().into_iter().collect();
        entries.reverse();
        let reordered: HashMap<_, _> = entries.into_iter().collect();
        let second = build_breadcrumbs(&reordered).unwrap();

        prop_assert_eq!(&nodes, &snapshot);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn dropping_a_parent_breaks_its_children(parents in arbitrary_forest()) {
        let mut nodes = table(&parents);
        let orphaned = parents.iter().position(|p| p.is_some());

        if let Some(child) = orphaned {
            let missing = parents[child].unwrap();
            nodes.remove(&NODES[missing]);

            match build_breadcrumbs(&nodes) {
                Err(BreadcrumbError::BrokenParentReference { node, parent }) => {
                    let orphans: Vec<String> = parents
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| **p == Some(missing))
                        .map(|(i, _)| NODES[i].name().to_string())
                        .collect();

                    prop_assert_eq!(parent, NODES[missing].name());
                    prop_assert!(orphans.contains(&node));
                }
                other => prop_assert!(false, "expected broken parent reference, got {:?}", other),
            }
        }
    }
}
