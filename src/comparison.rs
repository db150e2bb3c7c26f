//! Comparison primitives.
//!
//! The rewriter never compares values itself; it delegates to a
//! [`Comparator`] and only inspects what comes back. [`DeepEquality`] is the
//! stock implementation built on `PartialEq` and `Debug`.

use std::fmt;

use crate::failure::{AssertionFailure, ComparisonError};
use crate::traceback_frames::capture_frames;

/// Compares two values and reports inequality as
/// [`ComparisonError::Mismatch`].
pub trait Comparator {
    /// Compare `actual` against `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::Mismatch`] when the values differ. Any
    /// other variant is passed through by the rewriter unchanged.
    fn compare<T>(&self, actual: &T, expected: &T) -> Result<(), ComparisonError>
    where
        T: PartialEq + fmt::Debug + ?Sized;
}

/// Structural equality via `PartialEq`, rendering both sides with `Debug`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeepEquality;

impl Comparator for DeepEquality {
    fn compare<T>(&self, actual: &T, expected: &T) -> Result<(), ComparisonError>
    where
        T: PartialEq + fmt::Debug + ?Sized,
    {
        if actual == expected {
            return Ok(());
        }
        let expected = format!("{expected:?}");
        let actual = format!("{actual:?}");
        let message = format!("expected: <{expected}> but was: <{actual}>");
        Err(AssertionFailure::new(message, expected, actual, capture_frames()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn equal_values_pass() {
        assert!(DeepEquality.compare("abc", "abc").is_ok());
        assert!(DeepEquality.compare(&vec![1, 2], &vec![1, 2]).is_ok());
    }

    #[rstest]
    fn unequal_values_report_both_sides() {
        let err = DeepEquality.compare(&1, &2).expect_err("1 != 2");
        let failure = err.as_mismatch().expect("mismatch");
        assert_eq!(failure.expected(), "2");
        assert_eq!(failure.actual(), "1");
        assert_eq!(failure.message(), "expected: <2> but was: <1>");
    }

    #[rstest]
    fn strings_render_with_quotes() {
        let err = DeepEquality
            .compare("hello\n", "hello")
            .expect_err("trailing newline differs");
        let failure = err.as_mismatch().expect("mismatch");
        assert_eq!(failure.actual(), "\"hello\\n\"");
    }
}
