//! Failure objects raised by comparisons.
//!
//! [`ComparisonError`] separates value mismatches, which the rewriter trims,
//! from everything else, which passes through untouched.
//! [`AssertionFailure`] is always handled behind a `Box`; rewriting swaps its
//! frame sequence in place and returns the same allocation.

use std::error::Error;
use std::fmt;

use thiserror::Error;

use crate::stack_frame::StackFrame;

/// A value inequality reported by a comparator.
///
/// Displays as the message followed by one `at` line per frame.
#[derive(Debug, Error)]
#[error("{message}{}", FrameLines(.frames))]
pub struct AssertionFailure {
    message: String,
    expected: String,
    actual: String,
    frames: Vec<StackFrame>,
    #[source]
    cause: Option<Box<dyn Error + Send + Sync>>,
}

impl AssertionFailure {
    /// Create a failure with rendered values and the frames captured when it
    /// was raised.
    pub fn new(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        frames: Vec<StackFrame>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            frames,
            cause: None,
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Human-readable description of the mismatch.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rendered expected value.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Rendered actual value.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Frames ordered innermost first.
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Replace the whole frame sequence, returning the previous one.
    pub fn replace_frames(&mut self, frames: Vec<StackFrame>) -> Vec<StackFrame> {
        std::mem::replace(&mut self.frames, frames)
    }

    /// The error this failure was raised from, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

struct FrameLines<'a>(&'a [StackFrame]);

impl fmt::Display for FrameLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.0 {
            write!(f, "\n    at {frame}")?;
        }
        Ok(())
    }
}

/// Programming errors in the frame-trimming setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A type reference resolved to an empty qualifier.
    #[error("type reference has no qualifier")]
    UnqualifiedType,
    /// A frame reached the skip-marker lookup without a declaring type.
    #[error("frame `{method}` carries no declaring type metadata")]
    MissingTypeMetadata {
        /// Method name of the offending frame.
        method: String,
    },
}

/// Outcome of a failed comparison.
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// The values differ. The only kind eligible for trimming.
    #[error("{0}")]
    Mismatch(Box<AssertionFailure>),
    /// Anything else the comparator raised.
    #[error("{0}")]
    Unrelated(Box<dyn Error + Send + Sync>),
    /// Trimming could not proceed because of a misconfiguration.
    #[error("frame trimming aborted: {0}")]
    Contract(#[from] ContractViolation),
}

impl ComparisonError {
    /// Wrap an arbitrary error as [`ComparisonError::Unrelated`].
    pub fn unrelated(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Unrelated(err.into())
    }

    /// Borrow the mismatch, if this is one.
    pub fn as_mismatch(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Mismatch(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ComparisonError {
    fn from(err: std::io::Error) -> Self {
        Self::unrelated(err)
    }
}

impl From<AssertionFailure> for ComparisonError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Mismatch(Box::new(failure))
    }
}
