//! An immutable cons list with structural sharing.
//!
//! [`PersistentList`] is the crate's ordered immutable sequence. The effect
//! combinators use it where an ordered collection crosses the API: the
//! collecting loops accumulate one element per iteration (prepending, then
//! reversing once on completion).
//!
//! # Structural Sharing
//!
//! Prepending never copies the existing nodes:
//!
//! ```text
//! ticks:         1 -> 2 -> 3 -> nil
//! ticks.cons(0): 0 -> [1 -> 2 -> 3 -> nil]   // shares all three nodes
//! ```
//!
//! This makes `cons` O(1) in time and additional space, which is what keeps
//! per-iteration accumulation cheap.
//!
//! # Examples
//!
//! ```rust
//! use morae::persistent::PersistentList;
//!
//! let ticks = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(ticks.head(), Some(&1));
//! assert_eq!(ticks.len(), 3);
//!
//! // The original is never modified.
//! let extended = ticks.cons(0);
//! assert_eq!(ticks.len(), 3);
//! assert_eq!(extended.len(), 4);
//!
//! // Build from an iterator, front to back.
//! let collected: PersistentList<i32> = (1..=5).collect();
//! assert_eq!(collected.iter().sum::<i32>(), 15);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::rc::Rc;

/// Shared spine of the list; `None` marks its end.
type Link<T> = Option<Rc<Node<T>>>;

/// One element and the rest of the spine behind it.
struct Node<T>(T, Link<T>);

/// An immutable singly-linked list whose tails are shared between handles.
///
/// `cons`, `head`, `tail` and `len` are O(1); anything that walks the spine
/// (`get`, `reverse`, iteration) is O(n). The length is cached on the
/// handle, so it never has to be recounted.
///
/// # Examples
///
/// ```rust
/// use morae::persistent::PersistentList;
///
/// let gathered = PersistentList::singleton("last").cons("first");
/// assert_eq!(gathered.head(), Some(&"first"));
/// ```
#[derive(Clone)]
pub struct PersistentList<T> {
    front: Link<T>,
    length: usize,
}

impl<T> PersistentList<T> {
    /// Returns the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::persistent::PersistentList;
    ///
    /// let empty: PersistentList<i32> = PersistentList::new();
    /// assert!(empty.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            front: None,
            length: 0,
        }
    }

    /// Returns a one-element list.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Prepends `element`, sharing the entire existing spine with `self`.
    ///
    /// O(1) time and additional space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::persistent::PersistentList;
    ///
    /// let ticks = PersistentList::new().cons(2).cons(1);
    /// assert_eq!(ticks.head(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            front: Some(Rc::new(Node(element, self.front.clone()))),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element, or `None` if the list is
    /// empty.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.front.as_deref().map(|Node(value, _)| value)
    }

    /// Drops the first element.
    ///
    /// The tail of the empty list is the empty list.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.uncons().map_or_else(Self::new, |(_, rest)| rest)
    }

    /// Splits the list into its first element and everything after it, or
    /// `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::persistent::PersistentList;
    ///
    /// let ticks = PersistentList::new().cons(2).cons(1);
    /// let (first, rest) = ticks.uncons().unwrap();
    /// assert_eq!(*first, 1);
    /// assert_eq!(rest.head(), Some(&2));
    /// ```
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.front.as_deref().map(|Node(value, rest)| {
            // `front` is Some here, so `length` is at least 1.
            let remainder = Self {
                front: rest.clone(),
                length: self.length - 1,
            };
            (value, remainder)
        })
    }

    /// Returns a reference to the element `index` nodes from the front.
    ///
    /// Walks the spine, so O(index).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns a borrowing iterator from front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            cursor: self.front.as_deref(),
        }
    }
}

impl<T: Clone> PersistentList<T> {
    /// Returns a new list holding the same elements back to front.
    ///
    /// O(n); the result shares nothing with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::persistent::PersistentList;
    ///
    /// let ascending: PersistentList<i32> = (1..=3).collect();
    /// let descending: Vec<i32> = ascending.reverse().into_iter().collect();
    /// assert_eq!(descending, vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.iter()
            .fold(Self::new(), |reversed, element| reversed.cons(element.clone()))
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`PersistentList`], front to back.
pub struct PersistentListIterator<'a, T> {
    cursor: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let Node(value, rest) = self.cursor?;
        self.cursor = rest.as_deref();
        Some(value)
    }
}

/// Consuming iterator over a [`PersistentList`].
///
/// Elements stay shared with any other handle to the same spine, so they
/// are cloned out rather than moved.
pub struct PersistentListIntoIterator<T> {
    remaining: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (value, rest) = self.remaining.uncons()?;
        let value = value.clone();
        self.remaining = rest;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.length, Some(self.remaining.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        // Prepend back to front so the result reads in source order.
        let elements: Vec<T> = iter.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(Self::new(), |list, element| list.cons(element))
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { remaining: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Length first, so lists that are prefixes of each other differ.
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{element}")?;
        }
        formatter.write_str("]")
    }
}
