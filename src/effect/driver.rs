//! Drivers that invoke effects from outside the step protocol.
//!
//! The library never drives an effect on its own; every tick is an explicit
//! call made by the embedding code. [`Effect::run_once`] is the building
//! block for such drive loops, folding the outcome into an [`Either`] so the
//! loop can thread continuations without matching on [`Outcome`] variants.
//! [`Effect::run_and_extract`] is the short form for effects expected to
//! finish in a single tick, which is the common case in tests and samples.
//!
//! Both drivers treat terminal failure as a programming error and panic. Use
//! [`Effect::step`] directly when failure is an outcome the caller wants to
//! handle.

use crate::control::Either;

use super::outcome::{Incomplete, Outcome};
use super::step::Effect;

impl<S, E, A> Effect<S, E, A>
where
    S: 'static,
    E: 'static,
    A: 'static,
{
    /// Invokes the effect once, splitting the outcome for drive loops.
    ///
    /// A suspension becomes `Left(continuation)`; completion becomes
    /// `Right((value, state))`. The suspension snapshot is discarded, since
    /// the driver chooses the state for the next tick.
    ///
    /// # Panics
    ///
    /// Panics if the step fails terminally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    /// use morae::effect::Effect;
    ///
    /// let effect = Effect::<i32, String, ()>::wait(1).map(|()| "done");
    ///
    /// let continuation = match effect.run_once(3) {
    ///     Either::Left(continuation) => continuation,
    ///     Either::Right(_) => unreachable!("the first tick suspends"),
    /// };
    /// assert_eq!(continuation.run_and_extract(4), ("done", 4));
    /// ```
    pub fn run_once(&self, state: S) -> Either<Self, (A, S)>
    where
        E: std::fmt::Debug,
    {
        match self.step(state) {
            Outcome::Completed(value, new_state) => Either::Right((value, new_state)),
            Outcome::Incomplete(Incomplete::Failed(error)) => panic!("effect failed: {error:?}"),
            Outcome::Incomplete(Incomplete::Suspended(_, continuation)) => {
                Either::Left(continuation)
            }
        }
    }

    /// Invokes an effect expected to finish in a single tick and extracts
    /// its value and post-step state.
    ///
    /// # Panics
    ///
    /// Panics if the step fails terminally or suspends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::effect::Effect;
    ///
    /// let bump = Effect::<i32, String, i32>::transform(|count| count + 1);
    /// assert_eq!(bump.run_and_extract(4), (5, 5));
    /// ```
    pub fn run_and_extract(&self, state: S) -> (A, S)
    where
        E: std::fmt::Debug,
    {
        match self.run_once(state) {
            Either::Right(pair) => pair,
            Either::Left(_) => panic!("effect did not complete in a single step"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn run_once_completes_with_value_and_state() {
        let effect = Effect::<i32, String, i32>::transform(|count| count + 1);

        assert_eq!(effect.run_once(4).right(), Some((5, 5)));
    }

    #[rstest]
    fn run_once_hands_back_the_continuation() {
        let effect = Effect::<i32, String, ()>::wait(1).map(|()| "done");

        let continuation = match effect.run_once(3) {
            Either::Left(continuation) => continuation,
            Either::Right(_) => panic!("the first tick should suspend"),
        };
        assert_eq!(continuation.run_and_extract(4), ("done", 4));
    }

    #[rstest]
    #[should_panic(expected = "effect failed")]
    fn run_once_panics_on_terminal_failure() {
        let effect = Effect::<i32, String, i32>::fail("broken".to_string());

        let _ = effect.run_once(0);
    }

    #[rstest]
    fn run_once_supports_an_external_drive_loop() {
        let effect = Effect::<i32, String, ()>::wait(3).map(|()| "finished");

        let mut pending = effect;
        let mut state = 0;
        let mut ticks = 0;
        let completed = loop {
            match pending.run_once(state) {
                Either::Left(continuation) => {
                    pending = continuation;
                    state += 1;
                    ticks += 1;
                }
                Either::Right(pair) => break pair,
            }
        };

        assert_eq!(completed, ("finished", 3));
        assert_eq!(ticks, 3);
    }

    #[rstest]
    fn run_and_extract_returns_the_pair() {
        let effect = Effect::<i32, String, i32>::succeed(42);

        assert_eq!(effect.run_and_extract(7), (42, 7));
    }

    #[rstest]
    #[should_panic(expected = "did not complete in a single step")]
    fn run_and_extract_panics_when_the_effect_suspends() {
        let effect = Effect::<i32, String, ()>::suspend();

        let _ = effect.run_and_extract(0);
    }

    #[rstest]
    #[should_panic(expected = "effect failed")]
    fn run_and_extract_panics_on_terminal_failure() {
        let effect = Effect::<i32, String, i32>::fail("broken".to_string());

        let _ = effect.run_and_extract(0);
    }
}
