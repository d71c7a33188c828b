//! Document Signing
//!
//! This example walks a signer through a small document-signing flow.
//!
//! Key concepts:
//! - A validated state graph shared behind `Arc`
//! - Typed event payloads via `event_catalog!`
//! - View bindings carried in context, with a footer
//! - Breadcrumb trails derived from parent links
//! - Change listeners on a `FlowHandle`
//!
//! Run with: cargo run --example document_signing

use flowkit::breadcrumbs::{BreadcrumbNode, Breadcrumbs};
use flowkit::builder::{StateDef, StateGraphBuilder, TransitionBuilder};
use flowkit::core::State;
use flowkit::interpreter::{FlowHandle, Machine};
use flowkit::view::{ViewBinding, ViewContext, ViewTable, ViewUnit};
use flowkit::{event_catalog, flow_states};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

flow_states! {
    enum Signing {
        DocumentList,
        SignForm,
        Signed,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct DocumentPicked {
    document_id: String,
}

event_catalog! {
    enum SigningEvent: SigningEventKind {
        Pick(DocumentPicked),
        Sign,
        Cancel,
    }
}

#[derive(Clone, Debug, Default)]
struct SigningContext {
    document_id: Option<String>,
    view: Option<ViewBinding>,
}

impl ViewContext for SigningContext {
    type View = ViewUnit;

    fn view(&self) -> Option<&ViewBinding> {
        self.view.as_ref()
    }

    fn set_view(&mut self, binding: ViewBinding) {
        self.view = Some(binding);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Document Signing Flow ===\n");

    let graph = StateGraphBuilder::<Signing, SigningEvent, SigningContext>::new()
        .define_state(
            Signing::DocumentList,
            StateDef::new().on(
                SigningEventKind::Pick,
                TransitionBuilder::to(Signing::SignForm)
                    .reduce_with(|ctx: &SigningContext, picked: &DocumentPicked| SigningContext {
                        document_id: Some(picked.document_id.clone()),
                        ..ctx.clone()
                    })
                    .renders(
                        ViewBinding::new(ViewUnit::new("sign-form"))
                            .with_footer(ViewUnit::new("sign-actions")),
                    ),
            ),
        )?
        .define_state(
            Signing::SignForm,
            StateDef::new()
                .on(
                    SigningEventKind::Sign,
                    TransitionBuilder::to(Signing::Signed)
                        .renders(ViewBinding::new(ViewUnit::new("signed"))),
                )
                .on(
                    SigningEventKind::Cancel,
                    TransitionBuilder::to(Signing::DocumentList)
                        .update(|ctx: &mut SigningContext, _| *ctx = SigningContext::default()),
                ),
        )?
        .define_state(Signing::Signed, StateDef::terminal())?
        .build()?;

    println!("States: {:?}\n", graph.states());

    let views = ViewTable::new().bind(
        Signing::DocumentList,
        ViewBinding::new(ViewUnit::new("document-list").with_data(json!({"pending": 2}))),
    );

    let crumbs = Breadcrumbs::build(&HashMap::from([
        (Signing::DocumentList, BreadcrumbNode::root("Documents")),
        (Signing::SignForm, BreadcrumbNode::child(Signing::DocumentList, "Sign")),
    ]))?;

    let machine = Machine::create(Arc::new(graph), Signing::DocumentList, SigningContext::default)?;
    let flow = FlowHandle::new(machine);
    flow.subscribe(|snapshot| println!("  [Listener] now in {}", snapshot.state.name()));

    let events = [
        SigningEvent::Sign,
        SigningEvent::Pick(DocumentPicked {
            document_id: "doc-17".to_string(),
        }),
        SigningEvent::Cancel,
        SigningEvent::Pick(DocumentPicked {
            document_id: "doc-18".to_string(),
        }),
        SigningEvent::Sign,
    ];

    for event in &events {
        let outcome = flow.dispatch(event)?;
        let snapshot = flow.current();
        let view = views
            .resolve(&snapshot)
            .map(|binding| binding.component.id.as_str())
            .unwrap_or("-");
        let trail = crumbs
            .trail(&snapshot.state)
            .map(|items| items.join(" > "))
            .unwrap_or_default();

        println!("{:?} -> {:?}", event, outcome);
        println!("  view: {view}, breadcrumbs: {trail}");
        println!("  document: {:?}\n", snapshot.context.document_id);
    }

    println!("Flow done: {}", flow.is_done());

    println!("\nKey Takeaways:");
    println!("- Events a state does not accept are ignored");
    println!("- Reducers build a new context; the old one is never mutated");
    println!("- The view to render travels with the context");

    println!("\n=== Example Complete ===");
    Ok(())
}
