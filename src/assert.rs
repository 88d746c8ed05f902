//! Assertion helpers for errors.

use std::fmt::Display;

/// Checks whether the message of `got` contains `expected`.
///
/// `None` stands for "no error" and matches only an empty `expected`, so
/// `error_contains(result.err().as_ref(), "")` asserts success. An error
/// never matches `""`.
///
/// # Examples
///
/// ```
/// use assay::error_contains;
///
/// let err: Result<(), String> = Err("connection refused".to_string());
/// assert!(error_contains(err.as_ref().err(), "refused"));
///
/// let ok: Result<(), String> = Ok(());
/// assert!(error_contains(ok.as_ref().err(), ""));
/// ```
pub fn error_contains<E: Display + ?Sized>(got: Option<&E>, expected: &str) -> bool {
    match got {
        None => expected.is_empty(),
        Some(_) if expected.is_empty() => false,
        Some(err) => err.to_string().contains(expected),
    }
}
