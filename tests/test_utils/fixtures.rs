//! Fixtures shared by the integration tests: a comparator that raises
//! failures with a scripted frame sequence, and a frame sequence shaped like
//! a failure raised inside an async test body.

use std::cell::Cell;
use std::fmt;

use femtoassert::{AssertionFailure, Comparator, ComparisonError, StackFrame};
use rstest::fixture;

/// Comparator that raises failures carrying `frames` and records the address
/// of the last failure it returned.
pub struct ScriptedComparator {
    frames: Vec<StackFrame>,
    raised: Cell<Option<*const AssertionFailure>>,
}

impl ScriptedComparator {
    pub fn new(frames: Vec<StackFrame>) -> Self {
        Self {
            frames,
            raised: Cell::new(None),
        }
    }

    /// Address of the last failure handed to the rewriter.
    pub fn last_raised(&self) -> Option<*const AssertionFailure> {
        self.raised.get()
    }
}

impl Comparator for ScriptedComparator {
    fn compare<T>(&self, actual: &T, expected: &T) -> Result<(), ComparisonError>
    where
        T: PartialEq + fmt::Debug + ?Sized,
    {
        if actual == expected {
            return Ok(());
        }
        let failure = Box::new(AssertionFailure::new(
            format!("expected: <{expected:?}> but was: <{actual:?}>"),
            format!("{expected:?}"),
            format!("{actual:?}"),
            self.frames.clone(),
        ));
        self.raised.set(Some(&*failure as *const AssertionFailure));
        Err(ComparisonError::Mismatch(failure))
    }
}

/// Frames of a failure raised from a test body running on a current-thread
/// tokio runtime, innermost first.
#[fixture]
pub fn async_test_frames() -> Vec<StackFrame> {
    vec![
        StackFrame::new("femtoassert::traceback_frames", "capture_frames"),
        StackFrame::new(
            "<femtoassert::comparison::DeepEquality as femtoassert::comparison::Comparator>",
            "compare",
        ),
        StackFrame::new("femtoassert::rewriter::AssertionRewriter<C>", "assert_equal"),
        StackFrame::new("femtoassert::rewriter", "assert_equal"),
        StackFrame::new("tokio::runtime::park::CachedParkThread", "block_on"),
        StackFrame::new("service::tests::replays_journal", "{{closure}}")
            .with_location("tests/journal.rs", Some(41)),
        StackFrame::new("<core::pin::Pin<P> as core::future::future::Future>", "poll"),
        StackFrame::new("tokio::runtime::scheduler::current_thread::CoreGuard", "block_on"),
        StackFrame::new("tokio::runtime::runtime::Runtime", "block_on"),
        StackFrame::new("service::tests", "replays_journal")
            .with_location("tests/journal.rs", Some(30)),
        StackFrame::new("core::ops::function::FnOnce", "call_once"),
    ]
}
