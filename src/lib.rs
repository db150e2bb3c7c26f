//! Equality assertions that report the test line, not the helper.
//!
//! When an assertion made through this crate fails, the captured call stack
//! is trimmed before the failure is handed back: frames from the assertion
//! helpers themselves, from async runtime scheduling, and from items carrying
//! a skip marker are dropped from the innermost end so the first reported
//! frame is the test code that made the assertion.
//!
//! ```rust
//! use femtoassert::{ComparisonError, assert_equal};
//!
//! match assert_equal(&1, &2, &[]) {
//!     Err(ComparisonError::Mismatch(failure)) => {
//!         assert!(failure.frames().len() <= femtoassert::MAX_TRIMMED_FRAMES);
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod comparison;
pub mod config;
pub mod exclusion;
pub mod failure;
pub mod frame_filter;
pub mod rewriter;
pub mod skip_marker;
pub mod stack_frame;
pub mod traceback_frames;

#[cfg(test)]
mod test_utils;

pub use comparison::{Comparator, DeepEquality};
pub use config::RewriteConfig;
pub use exclusion::{ExclusionSet, TypeRef, build_exclusion_set, synthetic_variants};
pub use failure::{AssertionFailure, ComparisonError, ContractViolation};
pub use frame_filter::{MAX_TRIMMED_FRAMES, is_noise, trim_frames};
pub use rewriter::{
    AssertionRewriter, ShouldEqual, assert_equal, assert_file_text, assert_seq_equal, read_text,
    trim_failure,
};
pub use skip_marker::{BUILTIN_SKIPS, SkipRegistry};
pub use stack_frame::StackFrame;
