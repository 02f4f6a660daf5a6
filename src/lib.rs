//! # morae
//!
//! A functional effect library for Rust providing resumable, stateful,
//! fallible computations driven one tick at a time.
//!
//! ## Overview
//!
//! The heart of this library is [`effect::Effect`], a deferred, re-invocable
//! unit of work: invoking it once with a state produces exactly one
//! [`effect::Outcome`]: the computation completed, suspended itself with a
//! continuation, or failed. An external driver (a game loop, an interval
//! timer, a test harness) decides when the continuation runs next. The
//! library includes:
//!
//! - **Effect Core**: constructors (`succeed`, `fail`, `suspend`, `compute`,
//!   `transform`, ...) and the one-tick step protocol
//! - **Sequencing Algebra**: `map`, `flat_map`, `join` composed through
//!   arbitrarily deep suspension chains
//! - **Control Combinators**: repetition, accumulation, retry, fallback,
//!   racing, parallel pairing, tick-based delay
//! - **Control Structures**: [`control::Either`] for two-way branching
//! - **Persistent Data Structures**: [`persistent::PersistentList`], an
//!   immutable cons list with structural sharing
//!
//! ## Feature Flags
//!
//! - `control`: Control structures (`Either`)
//! - `persistent`: Persistent data structures (`PersistentList`)
//! - `effect`: The effect system (implies `control` and `persistent`)
//! - `full`: Enable all features (default)
//!
//! ## Example
//!
//! ```rust
//! use morae::effect::Effect;
//!
//! // A computation that reads the state without changing it.
//! let doubled = Effect::<i32, String, i32>::compute(|count| count * 2);
//!
//! let outcome = doubled.step(21);
//! assert_eq!(outcome.completed(), Some((42, 21)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use morae::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "effect")]
pub mod effect;
