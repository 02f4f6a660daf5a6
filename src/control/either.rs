//! A value that is one of two types.
//!
//! [`Either<L, R>`] is the crate's two-variant sum type. The effect system
//! leans on it at two seams: the racing combinator tags its winner `Left`
//! or `Right` depending on which operand finished first, and the driver's
//! single-step entry point returns either the continuation (`Left`) or the
//! finished result (`Right`). By convention, where `Either` plays the role
//! of success-or-failure, `Left` is the failure side, matching the `Result`
//! conversions at the bottom of this module.

/// A value holding either an `L` or an `R`.
///
/// # Examples
///
/// ```rust
/// use morae::control::Either;
///
/// let winner: Either<&str, u32> = Either::Right(3);
/// assert!(winner.is_right());
/// assert_eq!(winner.right(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The left alternative.
    Left(L),
    /// The right alternative.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Eliminator
    // =========================================================================

    /// Collapses the value by applying `on_left` to a `Left` or `on_right`
    /// to a `Right`.
    ///
    /// Every consuming accessor below is a specialization of this.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// // A driver reporting on a race between two timers.
    /// let outcome: Either<&str, &str> = Either::Right("B");
    /// let report = outcome.fold(
    ///     |left| format!("left finished with {left}"),
    ///     |right| format!("right finished with {right}"),
    /// );
    /// assert_eq!(report, "right finished with B");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => on_left(value),
            Self::Right(value) => on_right(value),
        }
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Returns `true` if the value is a `Left`.
    #[inline]
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if the value is a `Right`.
    #[inline]
    #[must_use]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    // =========================================================================
    // Borrowing Accessors
    // =========================================================================

    /// Borrows the left value, if that side is populated.
    #[inline]
    #[must_use]
    pub const fn left_ref(&self) -> Option<&L> {
        if let Self::Left(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Borrows the right value, if that side is populated.
    #[inline]
    #[must_use]
    pub const fn right_ref(&self) -> Option<&R> {
        if let Self::Right(value) = self {
            Some(value)
        } else {
            None
        }
    }

    // =========================================================================
    // Consuming Accessors
    // =========================================================================

    /// Extracts the left value, discarding a `Right`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let pending: Either<i32, &str> = Either::Left(7);
    /// assert_eq!(pending.left(), Some(7));
    ///
    /// let finished: Either<i32, &str> = Either::Right("done");
    /// assert_eq!(finished.left(), None);
    /// ```
    #[inline]
    pub fn left(self) -> Option<L> {
        self.fold(Some, |_| None)
    }

    /// Extracts the right value, discarding a `Left`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let finished: Either<i32, &str> = Either::Right("done");
    /// assert_eq!(finished.right(), Some("done"));
    /// ```
    #[inline]
    pub fn right(self) -> Option<R> {
        self.fold(|_| None, Some)
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Maps the left value, passing a `Right` through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let pending: Either<i32, &str> = Either::Left(7);
    /// assert_eq!(pending.map_left(|n| n * 10), Either::Left(70));
    /// ```
    #[inline]
    pub fn map_left<T, F>(self, transform: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        self.fold(|value| Either::Left(transform(value)), Either::Right)
    }

    /// Maps the right value, passing a `Left` through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let finished: Either<i32, &str> = Either::Right("done");
    /// assert_eq!(finished.map_right(str::len), Either::Right(4));
    /// ```
    #[inline]
    pub fn map_right<T, F>(self, transform: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        self.fold(Either::Left, |value| Either::Right(transform(value)))
    }

    /// Maps both sides at once, keeping the shape.
    #[inline]
    pub fn bimap<T, U, F, G>(self, on_left: F, on_right: G) -> Either<T, U>
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> U,
    {
        self.fold(
            |value| Either::Left(on_left(value)),
            |value| Either::Right(on_right(value)),
        )
    }

    /// Swaps the sides: `Left(l)` becomes `Right(l)` and vice versa.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let pending: Either<i32, &str> = Either::Left(7);
    /// assert_eq!(pending.swap(), Either::Right(7));
    /// ```
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        self.fold(Either::Right, Either::Left)
    }

    // =========================================================================
    // Unwrapping
    // =========================================================================

    /// Returns the left value, consuming the either.
    ///
    /// # Panics
    ///
    /// Panics if called on a `Right` value.
    #[inline]
    pub fn unwrap_left(self) -> L {
        self.fold(
            |value| value,
            |_| panic!("`Either::unwrap_left` on a `Right` value"),
        )
    }

    /// Returns the right value, consuming the either.
    ///
    /// # Panics
    ///
    /// Panics if called on a `Left` value.
    #[inline]
    pub fn unwrap_right(self) -> R {
        self.fold(
            |_| panic!("`Either::unwrap_right` on a `Left` value"),
            |value| value,
        )
    }
}

// =============================================================================
// Result Conversions
// =============================================================================

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok` lands on the right, `Err` on the left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let parsed: Result<u32, String> = Ok(3);
    /// assert_eq!(Either::from(parsed), Either::Right(3));
    /// ```
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        result.map_or_else(Self::Left, Self::Right)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right` becomes `Ok`, `Left` becomes `Err`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morae::control::Either;
    ///
    /// let either: Either<String, u32> = Either::Right(3);
    /// assert_eq!(Result::from(either), Ok(3));
    /// ```
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        either.fold(Err, Ok)
    }
}
