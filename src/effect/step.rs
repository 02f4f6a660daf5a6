//! The effect core: a deferred, re-invocable step over a threaded state.
//!
//! An [`Effect<S, E, A>`] wraps a step function `S -> Outcome<S, E, A>`.
//! Nothing runs at construction time. Invoking [`Effect::step`] with a state
//! performs exactly one tick of work and reports back through [`Outcome`]:
//! completed with a value and a new state, failed with a terminal error, or
//! suspended with a snapshot and a continuation to resume on the next tick.
//!
//! # Note on Re-Invocation
//!
//! An effect is a recipe, not a running computation. The same effect value can
//! be stepped any number of times, against any states, and each invocation
//! runs the step function fresh. Progress is made only by invoking: a
//! suspended outcome hands back a continuation, and nothing happens until the
//! caller steps that continuation. This puts the caller in charge of pacing,
//! which is what makes cooperative scheduling patterns such as [`race`]
//! expressible on top of plain function calls.
//!
//! [`race`]: Effect::race
//!
//! # Suspension Push-Through
//!
//! Sequencing respects suspensions. Mapping or binding over an effect that
//! suspends does not force it: the pending transformation is folded into the
//! returned continuation, so it applies after resumption, however many ticks
//! later that happens.
//!
//! # Laws
//!
//! Sequencing satisfies the usual functor and monad laws, where equivalence
//! means identical observable outcomes under any sequence of drives:
//!
//! - `effect.map(identity)` is equivalent to `effect`
//! - `effect.map(f).map(g)` is equivalent to `effect.map(|value| g(f(value)))`
//! - `Effect::succeed(value).flat_map(f)` is equivalent to `f(value)`
//! - `effect.flat_map(Effect::succeed)` is equivalent to `effect`
//! - `effect.flat_map(f).flat_map(g)` is equivalent to
//!   `effect.flat_map(|value| f(value).flat_map(g))`
//!
//! # Examples
//!
//! ```rust
//! use morae::effect::Effect;
//!
//! // Yield once, then report the observed state.
//! let effect = Effect::<u32, String, ()>::suspend().then(Effect::compute(|count: &u32| *count));
//!
//! let (snapshot, continuation) = effect.step(10).suspension().unwrap();
//! assert_eq!(snapshot, 10);
//! assert_eq!(continuation.step(11).completed(), Some((11, 11)));
//! ```

#![forbid(unsafe_code)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use crate::control::Either;

use super::error::CapturedPanic;
use super::outcome::{Incomplete, Outcome};

// =============================================================================
// Effect
// =============================================================================

/// A deferred computation that advances one tick per invocation.
///
/// # Type Parameters
///
/// - `S`: the state threaded through every step
/// - `E`: the terminal error type
/// - `A`: the result value type
///
/// # Examples
///
/// ```rust
/// use morae::effect::Effect;
///
/// let doubled = Effect::<i32, String, i32>::compute(|count| count * 2);
/// assert_eq!(doubled.step(21).completed(), Some((42, 21)));
/// ```
pub struct Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// The wrapped step function. `Rc` so that effects clone cheaply and
    /// combinators can hold several handles to the same step.
    step_function: Rc<dyn Fn(S) -> Outcome<S, E, A>>,
}

// Static assertions to verify Effect is not Send/Sync (Rc-backed).
static_assertions::assert_not_impl_any!(Effect<i32, String, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(Effect<(), String, ()>: Send, Sync);

// =============================================================================
// Construction and Stepping
// =============================================================================

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Creates an effect from a raw step function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::{Effect, Outcome};
    ///
    /// let increment =
    ///     Effect::<i32, String, i32>::new(|state| Outcome::Completed(state + 1, state + 1));
    /// assert_eq!(increment.step(4).completed(), Some((5, 5)));
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S) -> Outcome<S, E, A> + 'static,
    {
        Self {
            step_function: Rc::new(function),
        }
    }

    /// Invokes the effect once against `state`, performing one tick of work.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let pause = Effect::<i32, String, ()>::suspend();
    ///
    /// let (snapshot, continuation) = pause.step(7).suspension().unwrap();
    /// assert_eq!(snapshot, 7);
    /// assert_eq!(continuation.step(8).completed(), Some(((), 8)));
    /// ```
    pub fn step(&self, state: S) -> Outcome<S, E, A> {
        (self.step_function)(state)
    }

    /// Creates an effect that completes immediately with `value`, leaving the
    /// state untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, i32>::succeed(42);
    /// assert_eq!(effect.step(7).completed(), Some((42, 7)));
    ///
    /// // Re-invocation runs the step again from whatever state is supplied.
    /// assert_eq!(effect.step(9).completed(), Some((42, 9)));
    /// ```
    pub fn succeed(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |state| Outcome::Completed(value.clone(), state))
    }

    /// Alias for [`Effect::succeed`], under the name conventional for monadic
    /// lifting.
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::succeed(value)
    }

    /// Creates an effect that fails immediately with `error`.
    ///
    /// A failed outcome is terminal: there is no continuation to resume.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let denied = Effect::<i32, String, i32>::fail("denied".to_string());
    /// assert_eq!(denied.step(0).failure(), Some("denied".to_string()));
    /// ```
    pub fn fail(error: E) -> Self
    where
        E: Clone,
    {
        Self::new(move |_| Outcome::failed(error.clone()))
    }

    /// Creates an effect that derives a value from the current state without
    /// modifying it.
    ///
    /// A panic raised by `function` is captured and surfaced as a failed
    /// outcome via [`CapturedPanic`], rather than unwinding through the
    /// caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let doubled = Effect::<i32, String, i32>::compute(|count| count * 2);
    /// assert_eq!(doubled.step(21).completed(), Some((42, 21)));
    /// ```
    pub fn compute<F>(function: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
        E: From<CapturedPanic>,
    {
        Self::new(move |state| {
            match catch_unwind(AssertUnwindSafe(|| function(&state))) {
                Ok(value) => Outcome::Completed(value, state),
                Err(payload) => {
                    Outcome::failed(E::from(CapturedPanic::from_panic_payload(payload.as_ref())))
                }
            }
        })
    }

    /// Lifts an [`Either`] into an effect: `Right` completes, `Left` fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    /// use morae::effect::Effect;
    ///
    /// let ok: Effect<u8, String, i32> = Effect::from_either(Either::Right(3));
    /// assert_eq!(ok.step(0).completed(), Some((3, 0)));
    ///
    /// let bad: Effect<u8, String, i32> = Effect::from_either(Either::Left("no".to_string()));
    /// assert_eq!(bad.step(0).failure(), Some("no".to_string()));
    /// ```
    pub fn from_either(either: Either<E, A>) -> Self
    where
        A: Clone,
        E: Clone,
    {
        match either {
            Either::Left(error) => Self::fail(error),
            Either::Right(value) => Self::succeed(value),
        }
    }

    /// Lifts a [`Result`] into an effect: `Ok` completes, `Err` fails.
    pub fn from_result(result: Result<A, E>) -> Self
    where
        A: Clone,
        E: Clone,
    {
        Self::from_either(Either::from(result))
    }
}

// =============================================================================
// Specialized Constructors
// =============================================================================

impl<S, E> Effect<S, E, S>
where
    S: Clone + 'static,
    E: 'static,
{
    /// Creates an effect that replaces the state with `function(state)` and
    /// completes with the new state as its value.
    ///
    /// A panic raised by `function` is captured as with [`Effect::compute`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
    /// assert_eq!(bump.step(4).completed(), Some((5, 5)));
    /// ```
    pub fn transform<F>(function: F) -> Self
    where
        F: Fn(S) -> S + 'static,
        E: From<CapturedPanic>,
    {
        Self::new(move |state| {
            match catch_unwind(AssertUnwindSafe(|| function(state))) {
                Ok(new_state) => Outcome::Completed(new_state.clone(), new_state),
                Err(payload) => {
                    Outcome::failed(E::from(CapturedPanic::from_panic_payload(payload.as_ref())))
                }
            }
        })
    }
}

impl<E, A> Effect<(), E, A>
where
    E: 'static,
    A: 'static,
{
    /// Defers a thunk as a stateless effect, capturing panics as with
    /// [`Effect::compute`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<(), String, i32>::from_fn(|| 6 * 7);
    /// assert_eq!(effect.step(()).completed(), Some((42, ())));
    /// ```
    pub fn from_fn<F>(function: F) -> Self
    where
        F: Fn() -> A + 'static,
        E: From<CapturedPanic>,
    {
        Self::compute(move |_| function())
    }
}

impl<S, A> Effect<S, (), A>
where
    S: 'static,
    A: 'static,
{
    /// Lifts an [`Option`] into an effect: `Some` completes, `None` fails
    /// with the unit error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let present: Effect<i32, (), i32> = Effect::from_option(Some(3));
    /// assert_eq!(present.step(0).completed(), Some((3, 0)));
    ///
    /// let absent: Effect<i32, (), i32> = Effect::from_option(None);
    /// assert!(absent.step(0).is_failed());
    /// ```
    pub fn from_option(option: Option<A>) -> Self
    where
        A: Clone,
    {
        match option {
            Some(value) => Self::succeed(value),
            None => Self::fail(()),
        }
    }
}

impl<S, E> Effect<S, E, ()>
where
    S: 'static,
    E: 'static,
{
    /// Creates an effect that yields exactly once.
    ///
    /// The first invocation suspends, snapshotting the state unchanged. The
    /// continuation completes with `()` on the next tick.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let pause = Effect::<i32, String, ()>::suspend();
    ///
    /// let (snapshot, continuation) = pause.step(7).suspension().unwrap();
    /// assert_eq!(snapshot, 7);
    /// assert_eq!(continuation.step(8).completed(), Some(((), 8)));
    /// ```
    #[must_use]
    pub fn suspend() -> Self {
        Self::new(|state| Outcome::suspended(state, Self::succeed(())))
    }
}

// =============================================================================
// Sequencing
// =============================================================================

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Transforms the result value, leaving state handling and errors alone.
    ///
    /// If the source suspends, the transformation is folded into the
    /// continuation and applies after resumption. Errors pass through
    /// untouched; `function` is never applied to them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, i32>::succeed(5).map(|value| value * 10);
    /// assert_eq!(effect.step(0).completed(), Some((50, 0)));
    /// ```
    pub fn map<B, F>(self, function: F) -> Effect<S, E, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        self.map_shared(Rc::new(function))
    }

    // Shared-function variant so the recursive push-through re-wraps without
    // re-boxing the closure on every suspension.
    fn map_shared<B>(self, function: Rc<dyn Fn(A) -> B>) -> Effect<S, E, B>
    where
        B: 'static,
    {
        let source = self.step_function;

        Effect::new(move |state| match (source)(state) {
            Outcome::Completed(value, new_state) => Outcome::Completed(function(value), new_state),
            Outcome::Incomplete(Incomplete::Failed(error)) => Outcome::failed(error),
            Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
                Outcome::suspended(snapshot, continuation.map_shared(function.clone()))
            }
        })
    }

    /// Sequences a dependent effect: once `self` completes, feeds its value
    /// to `function` and invokes the produced effect with the post-step state
    /// in the same tick.
    ///
    /// `function` is not called while `self` is suspended or after it fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, i32>::transform(|count| count + 1)
    ///     .flat_map(|new_count| Effect::succeed(new_count * 100));
    /// assert_eq!(effect.step(0).completed(), Some((100, 1)));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Effect<S, E, B>
    where
        F: Fn(A) -> Effect<S, E, B> + 'static,
        B: 'static,
    {
        self.map(function).join()
    }

    /// Alias for [`Effect::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> Effect<S, E, B>
    where
        F: Fn(A) -> Effect<S, E, B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences `next` after `self`, discarding the first result value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, i32>::transform(|count| count + 1)
    ///     .then(Effect::succeed("done"));
    /// assert_eq!(effect.step(0).completed(), Some(("done", 1)));
    /// ```
    #[must_use]
    pub fn then<B>(self, next: Effect<S, E, B>) -> Effect<S, E, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }

    /// Runs `self` then `other`, pairing their results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect =
    ///     Effect::<i32, String, i32>::succeed(1).zip(Effect::succeed("one"));
    /// assert_eq!(effect.step(0).completed(), Some(((1, "one"), 0)));
    /// ```
    #[must_use]
    pub fn zip<B>(self, other: Effect<S, E, B>) -> Effect<S, E, (A, B)>
    where
        A: Clone,
        B: 'static,
    {
        self.flat_map(move |first| other.clone().map(move |second| (first.clone(), second)))
    }
}

impl<S, E, A> Effect<S, E, Effect<S, E, A>>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Flattens one level of nesting.
    ///
    /// Once the outer effect completes with an inner effect, the inner effect
    /// is invoked with the post-step state in the same tick. Outer
    /// suspensions re-wrap: the flattening is folded into the continuation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let nested: Effect<i32, String, Effect<i32, String, i32>> =
    ///     Effect::succeed(Effect::succeed(9));
    /// assert_eq!(nested.join().step(1).completed(), Some((9, 1)));
    /// ```
    pub fn join(self) -> Effect<S, E, A> {
        let source = self.step_function;

        Effect::new(move |state| match (source)(state) {
            Outcome::Completed(inner, new_state) => inner.step(new_state),
            Outcome::Incomplete(Incomplete::Failed(error)) => Outcome::failed(error),
            Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
                Outcome::suspended(snapshot, continuation.join())
            }
        })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<S, E, A> Clone for Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            step_function: self.step_function.clone(),
        }
    }
}

impl<S, E, A> std::fmt::Display for Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Effect>")
    }
}

// =============================================================================
// Tests
// =============================================================================
