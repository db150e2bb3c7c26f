//! Equality assertions whose failures point at the test, not the helper.
//!
//! [`AssertionRewriter::assert_equal`] delegates to a [`Comparator`]. When
//! the comparator reports a mismatch, the failure's captured frames are
//! trimmed (see [`crate::frame_filter`]) and the very same boxed failure is
//! returned. Every other error passes through without being looked at.
//!
//! The free functions use a default rewriter; [`ShouldEqual`] and
//! [`assert_trimmed_eq!`](crate::assert_trimmed_eq) panic with the trimmed
//! report for use directly in `#[test]` bodies.
//!
//! ```rust
//! use femtoassert::rewriter::{assert_equal, ShouldEqual};
//!
//! assert!(assert_equal("abc", "abc", &[]).is_ok());
//! assert!(assert_equal(&1, &2, &[]).is_err());
//! vec![1, 2].should_equal(&vec![1, 2]);
//! ```

use log::{debug, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::comparison::{Comparator, DeepEquality};
use crate::config::RewriteConfig;
use crate::exclusion::{ExclusionSet, TypeRef, build_exclusion_set};
use crate::failure::{AssertionFailure, ComparisonError, ContractViolation};
use crate::frame_filter::trim_frames;
use crate::skip_marker::SkipRegistry;

/// Runs comparisons and trims the frames of the mismatches they report.
#[derive(Clone, Debug, Default)]
pub struct AssertionRewriter<C = DeepEquality> {
    comparator: C,
    config: RewriteConfig,
}

impl<C: Comparator> AssertionRewriter<C> {
    /// Create a rewriter around `comparator`.
    pub fn new(comparator: C, config: RewriteConfig) -> Self {
        Self { comparator, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// The comparator assertions are delegated to.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Assert `actual == expected`.
    ///
    /// `extra_exclude_types` adds to the configured exclusions for this call
    /// only.
    ///
    /// # Errors
    ///
    /// - [`ComparisonError::Mismatch`] with trimmed frames when the values
    ///   differ; the box is the one the comparator returned.
    /// - [`ComparisonError::Unrelated`] exactly as the comparator raised it.
    /// - [`ComparisonError::Contract`] when an exclusion type is unqualified
    ///   or a frame lacks a declaring type.
    pub fn assert_equal<T>(
        &self,
        actual: &T,
        expected: &T,
        extra_exclude_types: &[TypeRef],
    ) -> Result<(), ComparisonError>
    where
        T: PartialEq + fmt::Debug + ?Sized,
    {
        match self.comparator.compare(actual, expected) {
            Ok(()) => Ok(()),
            Err(ComparisonError::Mismatch(mut failure)) => {
                self.rewrite(&mut failure, extra_exclude_types)
                    .inspect_err(|violation| {
                        warn!(
                            "frame trimming aborted ({violation}); original failure: {}",
                            failure.message()
                        );
                    })?;
                Err(ComparisonError::Mismatch(failure))
            }
            Err(other) => {
                debug!("comparator raised a non-mismatch error; passing it through untouched");
                Err(other)
            }
        }
    }

    /// Assert that a lazily produced sequence equals `expected`.
    ///
    /// The iterator is collected into a `Vec` before comparison.
    ///
    /// # Errors
    ///
    /// As for [`AssertionRewriter::assert_equal`].
    pub fn assert_seq_equal<I, T>(
        &self,
        actual: I,
        expected: &[T],
        extra_exclude_types: &[TypeRef],
    ) -> Result<(), ComparisonError>
    where
        I: IntoIterator<Item = T>,
        T: PartialEq + fmt::Debug,
    {
        let actual: Vec<T> = actual.into_iter().collect();
        self.assert_equal(actual.as_slice(), expected, extra_exclude_types)
    }

    /// Assert that the file at `path` contains exactly `expected`.
    ///
    /// # Errors
    ///
    /// Read failures surface as [`ComparisonError::Unrelated`]; otherwise as
    /// for [`AssertionRewriter::assert_equal`].
    pub fn assert_file_text(
        &self,
        path: impl AsRef<Path>,
        expected: &str,
        extra_exclude_types: &[TypeRef],
    ) -> Result<(), ComparisonError> {
        let text = read_text(path)?;
        self.assert_equal(text.as_str(), expected, extra_exclude_types)
    }

    fn rewrite(
        &self,
        failure: &mut AssertionFailure,
        extra_exclude_types: &[TypeRef],
    ) -> Result<(), ContractViolation> {
        let mut extra = self.config.extra_exclude_types().to_vec();
        extra.extend_from_slice(extra_exclude_types);
        let exclusions = build_exclusion_set(&extra)?;
        trim_failure(
            failure,
            &exclusions,
            self.config.skip_registries(),
            self.config.max_frames(),
        )
    }
}

/// Replace `failure`'s frames with their trimmed form.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if a frame reaches the skip-marker lookup
/// without a declaring type; the failure is left untouched in that case.
pub fn trim_failure(
    failure: &mut AssertionFailure,
    exclusions: &ExclusionSet,
    skips: &[SkipRegistry],
    max_frames: usize,
) -> Result<(), ContractViolation> {
    let trimmed = trim_frames(failure.frames(), exclusions, skips, max_frames)?;
    failure.replace_frames(trimmed);
    Ok(())
}

/// Read a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns any I/O or decoding error from [`std::fs::read_to_string`].
pub fn read_text(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// [`AssertionRewriter::assert_equal`] with the default rewriter.
///
/// # Errors
///
/// See [`AssertionRewriter::assert_equal`].
pub fn assert_equal<T>(
    actual: &T,
    expected: &T,
    extra_exclude_types: &[TypeRef],
) -> Result<(), ComparisonError>
where
    T: PartialEq + fmt::Debug + ?Sized,
{
    AssertionRewriter::<DeepEquality>::default().assert_equal(actual, expected, extra_exclude_types)
}

/// [`AssertionRewriter::assert_seq_equal`] with the default rewriter.
///
/// # Errors
///
/// See [`AssertionRewriter::assert_equal`].
pub fn assert_seq_equal<I, T>(
    actual: I,
    expected: &[T],
    extra_exclude_types: &[TypeRef],
) -> Result<(), ComparisonError>
where
    I: IntoIterator<Item = T>,
    T: PartialEq + fmt::Debug,
{
    AssertionRewriter::<DeepEquality>::default().assert_seq_equal(actual, expected, extra_exclude_types)
}

/// [`AssertionRewriter::assert_file_text`] with the default rewriter.
///
/// # Errors
///
/// See [`AssertionRewriter::assert_file_text`].
pub fn assert_file_text(
    path: impl AsRef<Path>,
    expected: &str,
    extra_exclude_types: &[TypeRef],
) -> Result<(), ComparisonError> {
    AssertionRewriter::<DeepEquality>::default().assert_file_text(path, expected, extra_exclude_types)
}

/// Panic with the trimmed failure report unless `actual == expected`.
///
/// Backs [`assert_trimmed_eq!`](crate::assert_trimmed_eq).
#[track_caller]
pub fn expect_equal<T>(actual: &T, expected: &T, extra_exclude_types: &[TypeRef])
where
    T: PartialEq + fmt::Debug + ?Sized,
{
    if let Err(err) = assert_equal(actual, expected, extra_exclude_types) {
        panic!("{err}");
    }
}

/// Method-call form of [`expect_equal`].
///
/// ```rust
/// use femtoassert::rewriter::ShouldEqual;
///
/// "abc".should_equal("abc");
/// ```
pub trait ShouldEqual: PartialEq + fmt::Debug {
    /// Panic with the trimmed failure report unless `self == expected`.
    #[track_caller]
    fn should_equal(&self, expected: &Self) {
        if let Err(err) = assert_equal(self, expected, &[]) {
            panic!("{err}");
        }
    }
}

impl<T: PartialEq + fmt::Debug + ?Sized> ShouldEqual for T {}

/// Assert equality, panicking with the trimmed failure report.
///
/// Extra types to exclude from the report may follow the two values.
///
/// ```rust
/// struct Fixture;
///
/// femtoassert::assert_trimmed_eq!(2 + 2, 4);
/// femtoassert::assert_trimmed_eq!("a", "a", Fixture);
/// ```
#[macro_export]
macro_rules! assert_trimmed_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::rewriter::expect_equal(&$actual, &$expected, &[])
    };
    ($actual:expr, $expected:expr, $($ty:ty),+ $(,)?) => {
        $crate::rewriter::expect_equal(
            &$actual,
            &$expected,
            &[$($crate::exclusion::TypeRef::of::<$ty>()),+],
        )
    };
}

#[cfg(test)]
#[path = "rewriter_tests.rs"]
mod tests;
