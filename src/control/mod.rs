//! Control structures for functional programming.
//!
//! This module provides the branching primitive the rest of the crate is
//! built against:
//!
//! - [`Either`]: a value that is one of two types (used by the effect
//!   driver and the racing combinator)
//!
//! # Examples
//!
//! ```rust
//! use morae::control::Either;
//!
//! let tagged: Either<u32, &str> = Either::Right("ready");
//! let described = tagged.fold(|n| n.to_string(), |s| s.to_uppercase());
//! assert_eq!(described, "READY");
//! ```

mod either;

pub use either::Either;
