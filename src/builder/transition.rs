//! Builder for constructing transitions.

use crate::core::{Event, EventKind, Guard, Payload, ReduceError, Reducer, State, Transition};
use crate::view::{ViewBinding, ViewContext};

/// Builder for constructing transitions with a fluent API.
///
/// Every reducing call (`reduce`, `try_reduce`, `update`, `reduce_with`,
/// `renders`) appends a stage; stages run left to right, each one seeing the
/// context produced by the previous one. A transition with no stage keeps
/// the context unchanged.
pub struct TransitionBuilder<S: State, E: Event, C> {
    destination: S,
    guard: Option<Guard<C, E>>,
    reducer: Option<Reducer<C, E>>,
    payload_kind: Option<E::Kind>,
}

impl<S: State, E: Event, C: 'static> TransitionBuilder<S, E, C> {
    /// Start a transition leading to `destination`.
    pub fn to(destination: S) -> Self {
        Self {
            destination,
            guard: None,
            reducer: None,
            payload_kind: None,
        }
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Append an infallible reducer stage.
    pub fn reduce<F>(self, reduce: F) -> Self
    where
        F: Fn(&C, &E) -> C + Send + Sync + 'static,
    {
        self.stage(move |ctx: &C, event: &E| Ok(reduce(ctx, event)))
    }

    /// Append a reducer stage that may fail. A failure aborts the dispatch
    /// and leaves the flow where it was.
    pub fn try_reduce<F>(self, reduce: F) -> Self
    where
        F: Fn(&C, &E) -> Result<C, ReduceError> + Send + Sync + 'static,
    {
        self.stage(reduce)
    }

    /// Append a stage that edits a fresh copy of the context.
    pub fn update<F>(self, update: F) -> Self
    where
        C: Clone,
        F: Fn(&mut C, &E) + Send + Sync + 'static,
    {
        self.stage(move |ctx: &C, event: &E| {
            let mut next = ctx.clone();
            update(&mut next, event);
            Ok(next)
        })
    }

    /// Append a stage written against the payload `P` of its event kind.
    ///
    /// The transition remembers the payload's kind so that graph validation
    /// rejects registering it under any other event.
    pub fn reduce_with<P, F>(mut self, reduce: F) -> Self
    where
        P: Payload<E> + 'static,
        F: Fn(&C, &P) -> C + Send + Sync + 'static,
    {
        let expected = P::kind();
        self.payload_kind = Some(expected);
        self.stage(move |ctx: &C, event: &E| match P::extract(event) {
            Some(payload) => Ok(reduce(ctx, payload)),
            None => Err(ReduceError::new(format!(
                "event '{}' does not carry a '{}' payload",
                event.kind().name(),
                expected.name()
            ))),
        })
    }

    /// Append a stage binding the view unit (and optional footer) that the
    /// destination state renders.
    pub fn renders(self, binding: ViewBinding<C::View>) -> Self
    where
        C: ViewContext + Clone,
        C::View: Send + Sync + 'static,
    {
        self.stage(move |ctx: &C, _: &E| {
            let mut next = ctx.clone();
            next.set_view(binding.clone());
            Ok(next)
        })
    }

    fn stage<F>(mut self, reduce: F) -> Self
    where
        F: Fn(&C, &E) -> Result<C, ReduceError> + Send + Sync + 'static,
    {
        let next: Reducer<C, E> = match self.reducer.take() {
            None => Box::new(reduce),
            Some(previous) => Box::new(move |ctx: &C, event: &E| {
                let intermediate = previous(ctx, event)?;
                reduce(&intermediate, event)
            }),
        };
        self.reducer = Some(next);
        self
    }

    pub(crate) fn build(self) -> Transition<S, E, C> {
        Transition {
            destination: self.destination,
            guard: self.guard,
            reducer: self.reducer,
            payload_kind: self.payload_kind,
        }
    }
}
