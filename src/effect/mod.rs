//! Deferred, resumable, fallible computations driven one tick at a time.
//!
//! The module is built around a single protocol: an [`Effect<S, E, A>`]
//! wraps a step function from a state `S` to an [`Outcome`], and every
//! invocation performs exactly one tick of work. An outcome either completes
//! with a value and a new state, or is [`Incomplete`]: failed with a terminal
//! `E`, or suspended with a state snapshot and a continuation effect. The
//! caller resumes suspensions whenever, and with whatever state, it likes.
//!
//! # Components
//!
//! - [`Effect`]: the step protocol, constructors such as
//!   [`Effect::succeed`], [`Effect::compute`] and [`Effect::suspend`], and
//!   monadic sequencing via [`Effect::map`], [`Effect::flat_map`] and
//!   [`Effect::join`].
//! - [`Outcome`] and [`Incomplete`]: the two-level step result.
//! - Schedulers on [`Effect`]: [`Effect::repeat`], [`Effect::collect_while`],
//!   [`Effect::retry`], [`Effect::or_else`], [`Effect::wait`],
//!   [`Effect::race`] and [`Effect::in_parallel_with`].
//! - Drivers: [`Effect::run_once`] and [`Effect::run_and_extract`] for
//!   embedding code that steps effects from the outside.
//! - [`CapturedPanic`]: panics raised inside [`Effect::compute`] and friends,
//!   converted into ordinary failures.
//!
//! # Single-Threaded
//!
//! Effects share their step functions through [`Rc`](std::rc::Rc), so they
//! clone cheaply and are neither `Send` nor `Sync`. Cooperation happens by
//! interleaved stepping on one thread, not by parallel execution.
//!
//! # Quick Start
//!
//! ```rust
//! use morae::effect::Effect;
//!
//! let effect = Effect::<i32, String, i32>::transform(|count| count + 1)
//!     .flat_map(|bumped| Effect::succeed(bumped * 10));
//!
//! assert_eq!(effect.run_and_extract(4), (50, 5));
//! ```

mod combinators;
mod driver;
mod error;
mod outcome;
mod step;

// ===== Step Protocol =====
pub use outcome::{Incomplete, Outcome};
pub use step::Effect;

// ===== Errors =====
pub use error::CapturedPanic;
