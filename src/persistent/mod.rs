//! Persistent (immutable) data structures.
//!
//! This module provides the immutable sequence the effect combinators
//! accumulate into:
//!
//! - [`PersistentList`]: persistent singly-linked list with structural
//!   sharing
//!
//! # Structural Sharing
//!
//! Every operation returns a new list; `cons` shares all existing nodes
//! with the original, so building a list one element per driver tick costs
//! O(1) per tick.
//!
//! # Examples
//!
//! ```rust
//! use morae::persistent::PersistentList;
//!
//! let ticks = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(ticks.head(), Some(&1));
//!
//! let extended = ticks.cons(0);
//! assert_eq!(ticks.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4);  // New list
//! ```

mod list;

pub use list::{PersistentList, PersistentListIntoIterator, PersistentListIterator};
