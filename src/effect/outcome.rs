//! Step results for effect evaluation.
//!
//! Invoking an [`Effect`] against a state produces an [`Outcome`]. The first
//! question an outcome answers is whether the step finished: [`Outcome::Completed`]
//! carries the result value together with the state as it stood after the step.
//! Everything else lives under [`Outcome::Incomplete`], which splits into the
//! two ways a step can fall short:
//!
//! - [`Incomplete::Failed`] is terminal. The error is final and there is
//!   nothing to resume.
//! - [`Incomplete::Suspended`] is a yield. It carries a snapshot of the state
//!   at the moment of suspension plus the continuation effect to invoke on the
//!   next tick. The caller decides when (and with which state) to resume.
//!
//! Code that only cares about "done or not" matches on [`Outcome`];
//! schedulers that must distinguish a dead computation from a paused one
//! descend into [`Incomplete`].
//!
//! # Examples
//!
//! ```rust
//! use morae::effect::{Effect, Incomplete, Outcome};
//!
//! let pause = Effect::<i32, String, ()>::suspend();
//! match pause.step(7) {
//!     Outcome::Completed(_, _) => unreachable!("suspend never completes in one step"),
//!     Outcome::Incomplete(Incomplete::Failed(_)) => unreachable!("suspend cannot fail"),
//!     Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
//!         assert_eq!(snapshot, 7);
//!         assert!(continuation.step(8).is_completed());
//!     }
//! }
//! ```

use std::fmt;

use super::step::Effect;

// =============================================================================
// Outcome
// =============================================================================

/// The result of invoking an [`Effect`] once against a state.
///
/// See the [module documentation](self) for the shape rationale.
///
/// # Examples
///
/// ```rust
/// use morae::effect::{Effect, Outcome};
///
/// let effect = Effect::<i32, String, i32>::succeed(10);
/// assert_eq!(effect.step(3).completed(), Some((10, 3)));
///
/// let failing = Effect::<i32, String, i32>::fail("boom".to_string());
/// assert_eq!(failing.step(3).failure(), Some("boom".to_string()));
/// ```
pub enum Outcome<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// The step finished. Carries the result value and the post-step state.
    Completed(A, S),
    /// The step did not finish. See [`Incomplete`] for the reason.
    Incomplete(Incomplete<S, E, A>),
}

/// The ways a step can end without completing.
pub enum Incomplete<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Terminal failure. Nothing remains to resume.
    Failed(E),
    /// A voluntary yield: the state snapshot at suspension time and the
    /// continuation to invoke on the next tick.
    Suspended(S, Effect<S, E, A>),
}

impl<S, E, A> Outcome<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Wraps an error as a terminal, non-resumable outcome.
    pub fn failed(error: E) -> Self {
        Self::Incomplete(Incomplete::Failed(error))
    }

    /// Wraps a state snapshot and a continuation as a suspended outcome.
    pub fn suspended(snapshot: S, continuation: Effect<S, E, A>) -> Self {
        Self::Incomplete(Incomplete::Suspended(snapshot, continuation))
    }

    /// Returns `true` if the step finished with a value.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_, _))
    }

    /// Returns `true` if the step ended in a terminal failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Incomplete(Incomplete::Failed(_)))
    }

    /// Returns `true` if the step yielded a continuation.
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        matches!(self, Self::Incomplete(Incomplete::Suspended(_, _)))
    }

    /// Extracts the result value and post-step state, if the step completed.
    pub fn completed(self) -> Option<(A, S)> {
        match self {
            Self::Completed(value, state) => Some((value, state)),
            Self::Incomplete(_) => None,
        }
    }

    /// Extracts the terminal error, if the step failed.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Incomplete(Incomplete::Failed(error)) => Some(error),
            _ => None,
        }
    }

    /// Extracts the state snapshot and continuation, if the step suspended.
    pub fn suspension(self) -> Option<(S, Effect<S, E, A>)> {
        match self {
            Self::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
                Some((snapshot, continuation))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<S, E, A> fmt::Debug for Outcome<S, E, A>
where
    S: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
    A: fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(value, state) => formatter
                .debug_tuple("Completed")
                .field(value)
                .field(state)
                .finish(),
            Self::Incomplete(incomplete) => fmt::Debug::fmt(incomplete, formatter),
        }
    }
}

impl<S, E, A> fmt::Debug for Incomplete<S, E, A>
where
    S: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
    A: fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(error) => formatter.debug_tuple("Failed").field(error).finish(),
            // The continuation is an opaque closure, shown as a placeholder.
            Self::Suspended(snapshot, _) => write!(formatter, "Suspended({snapshot:?}, <Effect>)"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
