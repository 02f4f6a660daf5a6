//! Error types for the effect system.
//!
//! This module provides the typed carrier for panics captured inside the
//! escape-hatch constructors (`compute`, `transform`, `from_fn`). A panic
//! raised in a wrapped function is caught at the point of evaluation and
//! converted into the effect's failure channel; it never crosses the step
//! boundary as a live panic.

use std::any::Any;

/// A panic captured inside an effect's wrapped function.
///
/// Capturing discards the stack identity of the original panic: once
/// wrapped, a captured panic is indistinguishable from a domain failure
/// built with `fail`. Only the panic message survives; `&str` and
/// `String` payloads are extracted verbatim, anything else is reported as
/// `"Unknown panic"`.
///
/// Error types used with the escape-hatch constructors opt in via
/// `From<CapturedPanic>`; the crate provides the `String` conversion so
/// `E = String` works out of the box.
///
/// # Examples
///
/// ```rust
/// use morae::effect::CapturedPanic;
///
/// let error = CapturedPanic {
///     message: "division by zero".to_string(),
/// };
/// assert_eq!(
///     format!("{}", error),
///     "panic captured during effect evaluation: division by zero"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPanic {
    /// The extracted panic message.
    pub message: String,
}

impl CapturedPanic {
    /// Extracts a `CapturedPanic` from a panic payload.
    ///
    /// The payload is whatever `std::panic::catch_unwind` returned in its
    /// `Err` arm. String-ish payloads (`&str`, `String`) are taken as-is;
    /// any other payload type becomes `"Unknown panic"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::panic::catch_unwind;
    /// use morae::effect::CapturedPanic;
    ///
    /// let payload = catch_unwind(|| panic!("boom")).unwrap_err();
    /// let captured = CapturedPanic::from_panic_payload(payload.as_ref());
    /// assert_eq!(captured.message, "boom");
    /// ```
    #[must_use]
    pub fn from_panic_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(string) = payload.downcast_ref::<&str>() {
            (*string).to_string()
        } else if let Some(string) = payload.downcast_ref::<String>() {
            string.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self { message }
    }
}

impl std::fmt::Display for CapturedPanic {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "panic captured during effect evaluation: {}",
            self.message
        )
    }
}

impl std::error::Error for CapturedPanic {}

impl From<CapturedPanic> for String {
    /// Unwraps the captured panic into its raw message.
    fn from(captured: CapturedPanic) -> Self {
        captured.message
    }
}
