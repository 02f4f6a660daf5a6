//! Schedulers built on the step protocol: repetition, collection, recovery,
//! pacing, and racing.
//!
//! Everything here is expressed through [`Effect::step`] alone. The
//! combinators never run anything eagerly; they return new effects whose step
//! functions drive their sources one tick at a time, which is what lets
//! racing and interleaving work without threads or an executor.
//!
//! # Examples
//!
//! Racing two timers, driving by hand until one of them finishes:
//!
//! ```rust
//! use morae::control::Either;
//! use morae::effect::{Effect, Incomplete, Outcome};
//!
//! let slow = Effect::<u32, String, ()>::wait(5).map(|()| "slow");
//! let quick = Effect::<u32, String, ()>::wait(2).map(|()| "quick");
//!
//! let mut drives = 1;
//! let mut outcome = slow.race(&quick).step(0);
//! let winner = loop {
//!     match outcome {
//!         Outcome::Completed(value, _) => break value,
//!         Outcome::Incomplete(Incomplete::Failed(error)) => panic!("unexpected: {error}"),
//!         Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
//!             drives += 1;
//!             outcome = continuation.step(snapshot);
//!         }
//!     }
//! };
//!
//! assert_eq!(winner, Either::Right("quick"));
//! assert_eq!(drives, 3);
//! ```

use std::rc::Rc;

use crate::control::Either;
use crate::persistent::PersistentList;

use super::outcome::{Incomplete, Outcome};
use super::step::Effect;

// =============================================================================
// Repetition and Collection
// =============================================================================

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Runs the effect `times` times in sequence, discarding each result
    /// value and completing with `()`.
    ///
    /// `repeat(0)` completes immediately without invoking the effect. A
    /// failure in any iteration is terminal for the whole repetition, and a
    /// suspension pauses it mid-sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
    /// assert_eq!(bump.repeat(3).step(0).completed(), Some(((), 3)));
    /// ```
    #[must_use]
    pub fn repeat(&self, times: usize) -> Effect<S, E, ()> {
        if times == 0 {
            return Effect::succeed(());
        }

        let source = self.clone();
        Effect::new(move |state| source.clone().then(source.repeat(times - 1)).step(state))
    }

    /// Runs the effect as long as `predicate` holds for the current state.
    ///
    /// The predicate is checked before each run, so a state that fails it up
    /// front completes immediately with `()`. Between ticks of a suspended
    /// run the predicate is not consulted; it only decides whether another
    /// full run starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
    /// assert_eq!(bump.repeat_while(|count| *count < 5).step(0).completed(), Some(((), 5)));
    /// ```
    #[must_use]
    pub fn repeat_while<P>(&self, predicate: P) -> Effect<S, E, ()>
    where
        P: Fn(&S) -> bool + 'static,
    {
        self.repeat_while_shared(Rc::new(predicate))
    }

    fn repeat_while_shared(&self, predicate: Rc<dyn Fn(&S) -> bool>) -> Effect<S, E, ()> {
        let source = self.clone();
        Effect::new(move |state| {
            if predicate(&state) {
                source
                    .clone()
                    .then(source.repeat_while_shared(predicate.clone()))
                    .step(state)
            } else {
                Outcome::Completed((), state)
            }
        })
    }

    /// Runs the effect until `predicate` holds for the current state.
    ///
    /// Equivalent to [`Effect::repeat_while`] with the predicate negated,
    /// including the up-front check.
    #[must_use]
    pub fn repeat_until<P>(&self, predicate: P) -> Effect<S, E, ()>
    where
        P: Fn(&S) -> bool + 'static,
    {
        self.repeat_while(move |state| !predicate(state))
    }

    /// Runs the effect as long as `predicate` holds, gathering each result
    /// value in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    /// use morae::persistent::PersistentList;
    ///
    /// let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
    /// let (gathered, state) = bump
    ///     .collect_while(|count| *count < 4)
    ///     .step(0)
    ///     .completed()
    ///     .unwrap();
    ///
    /// assert_eq!(gathered, PersistentList::from_iter([1, 2, 3]));
    /// assert_eq!(state, 3);
    /// ```
    #[must_use]
    pub fn collect_while<P>(&self, predicate: P) -> Effect<S, E, PersistentList<A>>
    where
        A: Clone,
        P: Fn(&S) -> bool + 'static,
    {
        self.collect_while_shared(Rc::new(predicate), PersistentList::new())
    }

    // Accumulates in reverse by consing, reversing once on completion.
    fn collect_while_shared(
        &self,
        predicate: Rc<dyn Fn(&S) -> bool>,
        accumulated: PersistentList<A>,
    ) -> Effect<S, E, PersistentList<A>>
    where
        A: Clone,
    {
        let source = self.clone();
        Effect::new(move |state| {
            if predicate(&state) {
                let next_source = source.clone();
                let next_predicate = predicate.clone();
                let gathered = accumulated.clone();

                source
                    .clone()
                    .flat_map(move |value| {
                        next_source
                            .collect_while_shared(next_predicate.clone(), gathered.cons(value))
                    })
                    .step(state)
            } else {
                Outcome::Completed(accumulated.reverse(), state)
            }
        })
    }

    /// Runs the effect until `predicate` holds, gathering each result value
    /// in iteration order.
    #[must_use]
    pub fn collect_until<P>(&self, predicate: P) -> Effect<S, E, PersistentList<A>>
    where
        A: Clone,
        P: Fn(&S) -> bool + 'static,
    {
        self.collect_while(move |state| !predicate(state))
    }

    /// Produces `count` independent handles to this effect.
    ///
    /// Clones share the underlying step function, so this is cheap at any
    /// `count`.
    #[must_use]
    pub fn replicate(&self, count: usize) -> PersistentList<Self> {
        (0..count).map(|_| self.clone()).collect()
    }
}

// =============================================================================
// Recovery
// =============================================================================

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Re-invokes the effect from the same initial state on terminal failure,
    /// up to `attempts` retries.
    ///
    /// The effect is invoked at most `attempts + 1` times per drive; if every
    /// invocation fails, the last error surfaces. A suspension is not a
    /// failure: it passes through as-is, and the remaining attempts do not
    /// follow into the continuation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use morae::effect::{Effect, Outcome};
    ///
    /// let invocations = Rc::new(Cell::new(0));
    /// let tracker = invocations.clone();
    /// let flaky = Effect::<i32, String, i32>::new(move |state| {
    ///     tracker.set(tracker.get() + 1);
    ///     if tracker.get() < 3 {
    ///         Outcome::failed(format!("attempt {} failed", tracker.get()))
    ///     } else {
    ///         Outcome::Completed(tracker.get(), state)
    ///     }
    /// });
    ///
    /// assert_eq!(flaky.retry(5).step(0).completed(), Some((3, 0)));
    /// assert_eq!(invocations.get(), 3);
    /// ```
    #[must_use]
    pub fn retry(&self, attempts: usize) -> Self
    where
        S: Clone,
    {
        let source = self.clone();
        Effect::new(move |state: S| {
            let mut remaining = attempts;
            loop {
                match source.step(state.clone()) {
                    Outcome::Incomplete(Incomplete::Failed(error)) => {
                        if remaining == 0 {
                            return Outcome::failed(error);
                        }
                        remaining -= 1;
                    }
                    outcome => return outcome,
                }
            }
        })
    }

    /// Falls back to `alternative` if the effect fails terminally.
    ///
    /// The alternative is invoked from the same initial state and its outcome
    /// replaces the failure. On completion the alternative is never invoked.
    /// A suspension passes through unchanged, and its continuation runs
    /// without the fallback.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let primary = Effect::<i32, String, i32>::fail("unavailable".to_string());
    /// let effect = primary.or_else(&Effect::succeed(7));
    ///
    /// assert_eq!(effect.step(1).completed(), Some((7, 1)));
    /// ```
    #[must_use]
    pub fn or_else(&self, alternative: &Self) -> Self
    where
        S: Clone,
    {
        let source = self.clone();
        let fallback = alternative.clone();
        Effect::new(move |state: S| match source.step(state.clone()) {
            Outcome::Incomplete(Incomplete::Failed(_)) => fallback.step(state),
            outcome => outcome,
        })
    }
}

// =============================================================================
// Pacing
// =============================================================================

impl<S, E> Effect<S, E, ()>
where
    S: 'static,
    E: 'static,
{
    /// Creates an effect that yields exactly `ticks` times before completing
    /// with `()`.
    ///
    /// Each suspension snapshots the state unchanged, so driving to
    /// completion takes exactly `ticks + 1` invocations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, ()>::wait(1);
    ///
    /// let (snapshot, continuation) = effect.step(5).suspension().unwrap();
    /// assert_eq!(snapshot, 5);
    /// assert_eq!(continuation.step(6).completed(), Some(((), 6)));
    /// ```
    #[must_use]
    pub fn wait(ticks: usize) -> Self {
        if ticks == 0 {
            Self::succeed(())
        } else {
            Self::new(move |state| Outcome::suspended(state, Self::wait(ticks - 1)))
        }
    }

    /// Alias for [`Effect::wait`].
    #[must_use]
    pub fn delay(ticks: usize) -> Self {
        Self::wait(ticks)
    }
}

// =============================================================================
// Racing and Interleaving
// =============================================================================

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Races this effect against `other`, completing with whichever side
    /// finishes first.
    ///
    /// On every tick both sides are stepped from the same state, this side
    /// first. The rules, in order:
    ///
    /// - A failure on either side is terminal for the race, even if the
    ///   other side completed this tick. When both fail, this side's error
    ///   surfaces.
    /// - If this side completes, the race completes with
    ///   [`Either::Left`] and this side's post-step state; a simultaneous
    ///   completion on the other side is discarded.
    /// - If only `other` completes, the race completes with
    ///   [`Either::Right`] and the other side's post-step state.
    /// - If both suspend, the race suspends with this side's snapshot and
    ///   races the two continuations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    /// use morae::effect::Effect;
    ///
    /// let slow = Effect::<i32, String, ()>::wait(2).map(|()| "slow");
    /// let quick = Effect::<i32, String, &str>::succeed("quick");
    ///
    /// assert_eq!(
    ///     slow.race(&quick).step(0).completed(),
    ///     Some((Either::Right("quick"), 0)),
    /// );
    /// ```
    #[must_use]
    pub fn race<B>(&self, other: &Effect<S, E, B>) -> Effect<S, E, Either<A, B>>
    where
        S: Clone,
        B: 'static,
    {
        let left = self.clone();
        let right = other.clone();

        Effect::new(
            move |state: S| match (left.step(state.clone()), right.step(state)) {
                (Outcome::Incomplete(Incomplete::Failed(error)), _)
                | (_, Outcome::Incomplete(Incomplete::Failed(error))) => Outcome::failed(error),
                (Outcome::Completed(value, new_state), _) => {
                    Outcome::Completed(Either::Left(value), new_state)
                }
                (
                    Outcome::Incomplete(Incomplete::Suspended(_, _)),
                    Outcome::Completed(value, new_state),
                ) => Outcome::Completed(Either::Right(value), new_state),
                (
                    Outcome::Incomplete(Incomplete::Suspended(snapshot, left_continuation)),
                    Outcome::Incomplete(Incomplete::Suspended(_, right_continuation)),
                ) => Outcome::suspended(snapshot, left_continuation.race(&right_continuation)),
            },
        )
    }

    /// Interleaves this effect with `other`, completing once both have,
    /// with the pair of results.
    ///
    /// On every tick both pending sides are stepped from the same state,
    /// this side first. A failure on either side is terminal, this side's
    /// error winning a tie. A side that completes early holds its value
    /// while the other is driven to completion. When both complete on the
    /// same tick, this side's post-step state is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let patient = Effect::<i32, String, ()>::wait(1).map(|()| "patient");
    /// let eager = Effect::<i32, String, &str>::succeed("eager");
    ///
    /// let effect = patient.in_parallel_with(&eager);
    /// let (snapshot, continuation) = effect.step(3).suspension().unwrap();
    ///
    /// assert_eq!(
    ///     continuation.step(snapshot).completed(),
    ///     Some((("patient", "eager"), 3)),
    /// );
    /// ```
    #[must_use]
    pub fn in_parallel_with<B>(&self, other: &Effect<S, E, B>) -> Effect<S, E, (A, B)>
    where
        S: Clone,
        A: Clone,
        B: Clone + 'static,
    {
        let left = self.clone();
        let right = other.clone();

        Effect::new(
            move |state: S| match (left.step(state.clone()), right.step(state)) {
                (Outcome::Incomplete(Incomplete::Failed(error)), _)
                | (_, Outcome::Incomplete(Incomplete::Failed(error))) => Outcome::failed(error),
                (Outcome::Completed(first, new_state), Outcome::Completed(second, _)) => {
                    Outcome::Completed((first, second), new_state)
                }
                (
                    Outcome::Completed(first, _),
                    Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)),
                ) => Outcome::suspended(
                    snapshot,
                    Effect::succeed(first).in_parallel_with(&continuation),
                ),
                (
                    Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)),
                    Outcome::Completed(second, _),
                ) => Outcome::suspended(
                    snapshot,
                    continuation.in_parallel_with(&Effect::succeed(second)),
                ),
                (
                    Outcome::Incomplete(Incomplete::Suspended(snapshot, left_continuation)),
                    Outcome::Incomplete(Incomplete::Suspended(_, right_continuation)),
                ) => Outcome::suspended(
                    snapshot,
                    left_continuation.in_parallel_with(&right_continuation),
                ),
            },
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rstest::rstest;

    use super::*;

    /// Drives an effect to completion, resuming each suspension with its own
    /// snapshot, and reports how many suspensions occurred along the way.
    fn drive<S, E, A>(effect: &Effect<S, E, A>, initial: S) -> (A, S, usize)
    where
        S: 'static,
        E: 'static,
        A: 'static,
    {
        let mut suspensions = 0;
        let mut outcome = effect.step(initial);
        loop {
            match outcome {
                Outcome::Completed(value, state) => return (value, state, suspensions),
                Outcome::Incomplete(Incomplete::Failed(_)) => {
                    panic!("effect failed while being driven")
                }
                Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
                    suspensions += 1;
                    outcome = continuation.step(snapshot);
                }
            }
        }
    }

    // ===== Repetition Tests =====

    #[rstest]
    fn repeat_zero_completes_without_running() {
        let calls = Rc::new(Cell::new(0));
        let tracker = calls.clone();
        let effect = Effect::<i32, String, i32>::compute(move |count| {
            tracker.set(tracker.get() + 1);
            *count
        });

        assert_eq!(effect.repeat(0).step(9).completed(), Some(((), 9)));
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    fn repeat_runs_the_effect_the_exact_number_of_times() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);

        assert_eq!(bump.repeat(3).step(0).completed(), Some(((), 3)));
    }

    #[rstest]
    fn repeat_stops_at_the_first_failure() {
        let effect = Effect::<i32, String, i32>::new(|state| {
            if state >= 2 {
                Outcome::failed("too far".to_string())
            } else {
                Outcome::Completed(state + 1, state + 1)
            }
        });

        assert_eq!(effect.repeat(5).step(0).failure(), Some("too far".to_string()));
    }

    #[rstest]
    fn repeat_suspends_between_iterations_of_a_yielding_effect() {
        let effect = Effect::<i32, String, ()>::suspend().repeat(2);

        let ((), state, suspensions) = drive(&effect, 0);
        assert_eq!(state, 0);
        assert_eq!(suspensions, 2);
    }

    #[rstest]
    fn repeat_while_runs_until_the_predicate_fails() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);

        assert_eq!(
            bump.repeat_while(|count| *count < 5).step(0).completed(),
            Some(((), 5)),
        );
    }

    #[rstest]
    fn repeat_while_completes_immediately_when_the_predicate_is_false() {
        let calls = Rc::new(Cell::new(0));
        let tracker = calls.clone();
        let effect = Effect::<i32, String, i32>::compute(move |count| {
            tracker.set(tracker.get() + 1);
            *count
        });

        assert_eq!(effect.repeat_while(|_| false).step(9).completed(), Some(((), 9)));
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    fn repeat_until_mirrors_repeat_while() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);

        assert_eq!(
            bump.repeat_until(|count| *count >= 5).step(0).completed(),
            Some(((), 5)),
        );
    }

    // ===== Collection Tests =====

    #[rstest]
    fn collect_while_gathers_values_in_iteration_order() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
        let (gathered, state) = bump
            .collect_while(|count| *count < 4)
            .step(0)
            .completed()
            .unwrap();

        assert_eq!(gathered, PersistentList::from_iter([1, 2, 3]));
        assert_eq!(state, 3);
    }

    #[rstest]
    fn collect_while_yields_an_empty_list_when_the_predicate_is_false() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
        let (gathered, state) = bump
            .collect_while(|_| false)
            .step(9)
            .completed()
            .unwrap();

        assert!(gathered.is_empty());
        assert_eq!(state, 9);
    }

    #[rstest]
    fn collect_until_mirrors_collect_while() {
        let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
        let (gathered, _) = bump
            .collect_until(|count| *count >= 4)
            .step(0)
            .completed()
            .unwrap();

        assert_eq!(gathered, PersistentList::from_iter([1, 2, 3]));
    }

    #[rstest]
    fn collect_while_surfaces_failure_mid_collection() {
        let effect = Effect::<i32, String, i32>::new(|state| {
            if state >= 2 {
                Outcome::failed("too far".to_string())
            } else {
                Outcome::Completed(state + 1, state + 1)
            }
        });

        assert_eq!(
            effect.collect_while(|_| true).step(0).failure(),
            Some("too far".to_string()),
        );
    }

    // ===== Replication Tests =====

    #[rstest]
    fn replicate_produces_independent_handles() {
        let effect = Effect::<i32, String, i32>::succeed(42);
        let handles = effect.replicate(3);

        assert_eq!(handles.len(), 3);
        for handle in &handles {
            assert_eq!(handle.clone().step(1).completed(), Some((42, 1)));
        }
    }

    #[rstest]
    fn replicate_zero_is_empty() {
        let effect = Effect::<i32, String, i32>::succeed(42);

        assert!(effect.replicate(0).is_empty());
    }

    // ===== Recovery Tests =====

    #[rstest]
    fn retry_succeeds_once_an_attempt_goes_through() {
        let invocations = Rc::new(Cell::new(0));
        let tracker = invocations.clone();
        let flaky = Effect::<i32, String, i32>::new(move |state| {
            tracker.set(tracker.get() + 1);
            if tracker.get() < 3 {
                Outcome::failed(format!("attempt {} failed", tracker.get()))
            } else {
                Outcome::Completed(tracker.get(), state)
            }
        });

        assert_eq!(flaky.retry(5).step(0).completed(), Some((3, 0)));
        assert_eq!(invocations.get(), 3);
    }

    #[rstest]
    fn retry_exhausts_attempts_and_surfaces_the_last_error() {
        let invocations = Rc::new(Cell::new(0));
        let tracker = invocations.clone();
        let doomed = Effect::<i32, String, i32>::new(move |_| {
            tracker.set(tracker.get() + 1);
            Outcome::failed(format!("attempt {} failed", tracker.get()))
        });

        assert_eq!(
            doomed.retry(2).step(0).failure(),
            Some("attempt 3 failed".to_string()),
        );
        assert_eq!(invocations.get(), 3);
    }

    #[rstest]
    fn retry_passes_suspension_through() {
        let effect =
            Effect::<i32, String, i32>::new(|state| Outcome::suspended(state, Effect::succeed(9)));

        let (snapshot, continuation) = effect.retry(3).step(0).suspension().unwrap();
        assert_eq!(snapshot, 0);
        assert_eq!(continuation.step(1).completed(), Some((9, 1)));
    }

    #[rstest]
    fn or_else_recovers_from_terminal_failure() {
        let primary = Effect::<i32, String, i32>::fail("unavailable".to_string());

        assert_eq!(
            primary.or_else(&Effect::succeed(7)).step(1).completed(),
            Some((7, 1)),
        );
    }

    #[rstest]
    fn or_else_ignores_the_alternative_on_success() {
        let calls = Rc::new(Cell::new(0));
        let tracker = calls.clone();
        let alternative = Effect::<i32, String, i32>::compute(move |count| {
            tracker.set(tracker.get() + 1);
            *count
        });

        let effect = Effect::<i32, String, i32>::succeed(1).or_else(&alternative);
        assert_eq!(effect.step(0).completed(), Some((1, 0)));
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    fn or_else_passes_suspension_through_unchanged() {
        let primary = Effect::<i32, String, ()>::suspend();
        let effect = primary.or_else(&Effect::succeed(()));

        let (snapshot, continuation) = effect.step(4).suspension().unwrap();
        assert_eq!(snapshot, 4);
        assert_eq!(continuation.step(5).completed(), Some(((), 5)));
    }

    #[rstest]
    fn or_else_surfaces_the_alternative_error_when_both_fail() {
        let primary = Effect::<i32, String, i32>::fail("primary down".to_string());
        let alternative = Effect::<i32, String, i32>::fail("alternative down".to_string());

        assert_eq!(
            primary.or_else(&alternative).step(0).failure(),
            Some("alternative down".to_string()),
        );
    }

    // ===== Pacing Tests =====

    #[rstest]
    fn wait_zero_completes_immediately() {
        let effect = Effect::<i32, String, ()>::wait(0);

        assert_eq!(effect.step(3).completed(), Some(((), 3)));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(10)]
    fn wait_suspends_exactly_the_requested_number_of_times(#[case] ticks: usize) {
        let effect = Effect::<i32, String, ()>::wait(ticks);

        let ((), state, suspensions) = drive(&effect, 7);
        assert_eq!(state, 7);
        assert_eq!(suspensions, ticks);
    }

    #[rstest]
    fn delay_matches_wait() {
        let effect = Effect::<i32, String, ()>::delay(2);

        let (_, _, suspensions) = drive(&effect, 0);
        assert_eq!(suspensions, 2);
    }

    // ===== Racing Tests =====

    #[rstest]
    fn race_completes_left_when_it_finishes_first() {
        let quick = Effect::<i32, String, &str>::succeed("quick");
        let slow = Effect::<i32, String, ()>::wait(2).map(|()| "slow");

        assert_eq!(
            quick.race(&slow).step(0).completed(),
            Some((Either::Left("quick"), 0)),
        );
    }

    #[rstest]
    fn race_completes_right_when_it_finishes_first() {
        let slow = Effect::<i32, String, ()>::wait(2).map(|()| "slow");
        let quick = Effect::<i32, String, &str>::succeed("quick");

        assert_eq!(
            slow.race(&quick).step(0).completed(),
            Some((Either::Right("quick"), 0)),
        );
    }

    #[rstest]
    fn race_prefers_left_on_simultaneous_completion() {
        let left = Effect::<i32, String, i32>::transform(|count| count + 1);
        let right = Effect::<i32, String, i32>::transform(|count| count + 100);

        // Both complete on the first tick; the left value and state win.
        assert_eq!(
            left.race(&right).step(0).completed(),
            Some((Either::Left(1), 1)),
        );
    }

    #[rstest]
    fn race_failure_preempts_completion_on_the_other_side() {
        let failing = Effect::<i32, String, i32>::fail("broken".to_string());
        let completing = Effect::<i32, String, i32>::succeed(1);

        assert_eq!(
            failing.race(&completing).step(0).failure(),
            Some("broken".to_string()),
        );
        assert_eq!(
            completing.race(&failing).step(0).failure(),
            Some("broken".to_string()),
        );
    }

    #[rstest]
    fn race_prefers_the_left_error_when_both_fail() {
        let left = Effect::<i32, String, i32>::fail("left down".to_string());
        let right = Effect::<i32, String, i32>::fail("right down".to_string());

        assert_eq!(
            left.race(&right).step(0).failure(),
            Some("left down".to_string()),
        );
    }

    #[rstest]
    fn race_suspends_with_the_left_snapshot_while_both_yield() {
        let left = Effect::<i32, String, i32>::new(|state| {
            Outcome::suspended(state + 1, Effect::succeed(1))
        });
        let right = Effect::<i32, String, i32>::new(|state| {
            Outcome::suspended(state + 2, Effect::succeed(2))
        });

        let (snapshot, _) = left.race(&right).step(0).suspension().unwrap();
        assert_eq!(snapshot, 1);
    }

    #[rstest]
    fn race_resumes_both_sides_until_one_finishes() {
        let slow = Effect::<i32, String, ()>::wait(5).map(|()| "slow");
        let quick = Effect::<i32, String, ()>::wait(3).map(|()| "quick");

        let (winner, _, suspensions) = drive(&slow.race(&quick), 0);
        assert_eq!(winner, Either::Right("quick"));
        assert_eq!(suspensions, 3);
    }

    // ===== Interleaving Tests =====

    #[rstest]
    fn in_parallel_with_pairs_simultaneous_completions() {
        let left = Effect::<i32, String, i32>::transform(|count| count + 1);
        let right = Effect::<i32, String, i32>::transform(|count| count * 10);

        // Both step from 4; the left post-step state is kept.
        assert_eq!(
            left.in_parallel_with(&right).step(4).completed(),
            Some(((5, 40), 5)),
        );
    }

    #[rstest]
    fn in_parallel_with_waits_for_the_slower_side() {
        let patient = Effect::<i32, String, ()>::wait(2).map(|()| "patient");
        let eager = Effect::<i32, String, &str>::succeed("eager");

        let (pair, state, suspensions) = drive(&patient.in_parallel_with(&eager), 3);
        assert_eq!(pair, ("patient", "eager"));
        assert_eq!(state, 3);
        assert_eq!(suspensions, 2);
    }

    #[rstest]
    fn in_parallel_with_holds_an_early_left_completion() {
        let eager = Effect::<i32, String, &str>::succeed("eager");
        let patient = Effect::<i32, String, ()>::wait(1).map(|()| "patient");

        let (pair, _, suspensions) = drive(&eager.in_parallel_with(&patient), 0);
        assert_eq!(pair, ("eager", "patient"));
        assert_eq!(suspensions, 1);
    }

    #[rstest]
    fn in_parallel_with_fails_as_soon_as_either_side_fails() {
        let failing = Effect::<i32, String, i32>::fail("broken".to_string());
        let healthy = Effect::<i32, String, i32>::succeed(1);

        assert_eq!(
            healthy.in_parallel_with(&failing).step(0).failure(),
            Some("broken".to_string()),
        );
    }

    #[rstest]
    fn in_parallel_with_prefers_the_left_error_when_both_fail() {
        let left = Effect::<i32, String, i32>::fail("left down".to_string());
        let right = Effect::<i32, String, i32>::fail("right down".to_string());

        assert_eq!(
            left.in_parallel_with(&right).step(0).failure(),
            Some("left down".to_string()),
        );
    }
}
