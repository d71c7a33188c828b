//! Guard predicates for choosing between transitions.
//!
//! Guards are pure boolean functions over the current context and the
//! incoming event. When a state holds several transitions for one event
//! kind, the first transition whose guard passes is taken.

use std::fmt;

/// Pure predicate that decides whether a transition applies.
///
/// # Example
///
/// ```rust
/// use flowkit::core::Guard;
///
/// #[derive(Debug)]
/// struct Ctx {
///     has_bank_account: bool,
/// }
///
/// let needs_bank_account = Guard::new(|ctx: &Ctx, _event: &()| !ctx.has_bank_account);
///
/// assert!(needs_bank_account.check(&Ctx { has_bank_account: false }, &()));
/// assert!(!needs_bank_account.check(&Ctx { has_bank_account: true }, &()));
/// ```
pub struct Guard<C, E> {
    predicate: Box<dyn Fn(&C, &E) -> bool + Send + Sync>,
}

impl<C, E> Guard<C, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe, since one graph
    /// is shared by every flow started from it.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, context: &C, event: &E) -> bool {
        (self.predicate)(context, event)
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
