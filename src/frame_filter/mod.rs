//! Noise detection and trimming for captured assertion frames.
//!
//! A frame is *noise* when it belongs to assertion support code, to an async
//! runtime's scheduling machinery, or carries a skip marker. Trimming removes
//! noise from the innermost end of the sequence only: once the first
//! informative frame is found everything after it is kept as is, including
//! runtime frames nested beneath real test code. The result is then capped
//! to a fixed number of frames.
//!
//! # Usage
//!
//! The primary entry points are:
//! - [`is_noise`] - Decide whether one frame is noise
//! - [`drop_noise_prefix`] - Drop frames from the front while a predicate holds
//! - [`limit_frames`] - Keep only the N innermost frames
//! - [`trim_frames`] - Prefix-drop noise, then cap
//!
//! # Example
//!
//! ```rust
//! use femtoassert::exclusion::build_exclusion_set;
//! use femtoassert::frame_filter::trim_frames;
//! use femtoassert::skip_marker::BUILTIN_SKIPS;
//! use femtoassert::stack_frame::StackFrame;
//!
//! let frames = vec![
//!     StackFrame::new("femtoassert::rewriter", "assert_equal"),
//!     StackFrame::new("tokio::runtime::park::CachedParkThread", "block_on"),
//!     StackFrame::new("app::tests", "loads_config"),
//!     StackFrame::new("tokio::runtime::runtime::Runtime", "block_on"),
//! ];
//! let exclusions = build_exclusion_set(&[]).unwrap();
//!
//! let trimmed = trim_frames(&frames, &exclusions, &[BUILTIN_SKIPS], 15).unwrap();
//! assert_eq!(trimmed.len(), 2);
//! assert_eq!(trimmed[0].method, "loads_config");
//! ```

use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::exclusion::ExclusionSet;
use crate::failure::ContractViolation;
use crate::skip_marker::SkipRegistry;
use crate::stack_frame::StackFrame;


/// Default cap on the number of frames kept after trimming.
pub const MAX_TRIMMED_FRAMES: usize = 15;

/// Method name of the assertion wrapper. Frames running a method of this
/// name are noise whatever their declaring type.
pub const WRAPPER_METHOD: &str = "assert_equal";

/// Declaring types of async runtime and future-polling machinery that sit
/// between a test body and the point where its failure surfaces.
pub static RUNTIME_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // tokio
        "tokio::runtime::park::CachedParkThread",
        "tokio::runtime::park::CachedParkThread::block_on",
        "tokio::runtime::park::CachedParkThread::block_on::{{closure}}",
        "tokio::runtime::coop",
        "tokio::runtime::coop::with_budget",
        "tokio::task::coop",
        "tokio::task::coop::with_budget",
        "tokio::task::coop::budget",
        "tokio::runtime::context",
        "tokio::runtime::context::runtime",
        "tokio::runtime::context::set_scheduler",
        "tokio::runtime::context::set_scheduler::{{closure}}",
        "tokio::runtime::context::scoped::Scoped<T>",
        "tokio::runtime::context::blocking::BlockingRegionGuard",
        "tokio::runtime::scheduler::current_thread::CoreGuard",
        "tokio::runtime::scheduler::current_thread::CoreGuard::block_on",
        "tokio::runtime::scheduler::current_thread::CoreGuard::block_on::{{closure}}",
        "tokio::runtime::scheduler::current_thread::CoreGuard::enter",
        "tokio::runtime::scheduler::current_thread::CoreGuard::enter::{{closure}}",
        "tokio::runtime::scheduler::current_thread::Context",
        "tokio::runtime::scheduler::current_thread::CurrentThread",
        "tokio::runtime::scheduler::current_thread::CurrentThread::block_on",
        "tokio::runtime::scheduler::current_thread::CurrentThread::block_on::{{closure}}",
        "tokio::runtime::scheduler::multi_thread::MultiThread",
        "tokio::runtime::scheduler::multi_thread::worker::Context",
        "tokio::runtime::runtime::Runtime",
        "tokio::runtime::task::core::Core<T,S>",
        "tokio::runtime::task::core::Core<T,S>::poll::{{closure}}",
        "tokio::runtime::task::harness::Harness<T,S>",
        "tokio::runtime::task::harness",
        "tokio::runtime::task::raw",
        "tokio::loom::std::unsafe_cell::UnsafeCell<T>",
        // futures
        "futures_executor::local_pool",
        "futures_executor::local_pool::block_on::{{closure}}",
        "futures_executor::local_pool::run_executor",
        "futures_executor::local_pool::run_executor::{{closure}}",
        // core / std polling and unwinding trampolines
        "<core::pin::Pin<P> as core::future::future::Future>",
        "<F as core::future::future::Future>",
        "<&mut F as core::future::future::Future>",
        "<core::panic::unwind_safe::AssertUnwindSafe<F> as core::future::future::Future>",
        "<core::panic::unwind_safe::AssertUnwindSafe<F> as core::ops::function::FnOnce<()>>",
        "core::ops::function::FnOnce",
        "std::panicking",
        "std::panicking::try",
        "std::panicking::catch_unwind",
        "std::panic",
        "std::panic::catch_unwind",
        "std::thread::local::LocalKey<T>",
    ]
    .into_iter()
    .collect()
});

/// Whether the frame belongs to async runtime scheduling machinery.
pub fn is_runtime_frame(frame: &StackFrame) -> bool {
    RUNTIME_TYPES.contains(frame.declaring_type.as_str())
}

/// Decide whether `frame` is noise.
///
/// A frame is noise if its declaring type is excluded, belongs to the
/// runtime set, its method is [`WRAPPER_METHOD`], or any of `skips` marks its
/// call site or its declaring type.
///
/// # Errors
///
/// Returns [`ContractViolation::MissingTypeMetadata`] for a frame without a
/// declaring type, whichever registries are supplied.
pub fn is_noise(
    frame: &StackFrame,
    exclusions: &ExclusionSet,
    skips: &[SkipRegistry],
) -> Result<bool, ContractViolation> {
    if frame.declaring_type.is_empty() {
        return Err(ContractViolation::MissingTypeMetadata {
            method: frame.method.clone(),
        });
    }
    if exclusions.contains(&frame.declaring_type)
        || is_runtime_frame(frame)
        || frame.method == WRAPPER_METHOD
    {
        return Ok(true);
    }
    for registry in skips {
        if registry.marks_call_site(frame)? || registry.marks_type(frame)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Drop frames from the front while `predicate` holds.
///
/// Evaluation stops at the first frame for which the predicate is `false`;
/// that frame and all later ones are returned unchanged.
///
/// # Errors
///
/// Propagates the first error returned by `predicate`.
///
/// # Examples
///
/// ```rust
/// use femtoassert::frame_filter::drop_noise_prefix;
/// use femtoassert::stack_frame::StackFrame;
///
/// let frames = vec![
///     StackFrame::new("noise", "a"),
///     StackFrame::new("app", "b"),
///     StackFrame::new("noise", "c"),
/// ];
/// let kept = drop_noise_prefix(&frames, |f| Ok::<_, ()>(f.declaring_type == "noise")).unwrap();
/// assert_eq!(kept.len(), 2);
/// assert_eq!(kept[1].method, "c");
/// ```
pub fn drop_noise_prefix<F, E>(frames: &[StackFrame], mut predicate: F) -> Result<&[StackFrame], E>
where
    F: FnMut(&StackFrame) -> Result<bool, E>,
{
    for (idx, frame) in frames.iter().enumerate() {
        if !predicate(frame)? {
            return Ok(&frames[idx..]);
        }
    }
    Ok(&[])
}

/// Keep at most the `n` innermost frames (the first `n` in the list).
///
/// # Examples
///
/// ```rust
/// use femtoassert::frame_filter::limit_frames;
/// use femtoassert::stack_frame::StackFrame;
///
/// let frames = vec![
///     StackFrame::new("app", "inner"),
///     StackFrame::new("app", "middle"),
///     StackFrame::new("app", "outer"),
/// ];
///
/// let limited = limit_frames(&frames, 2);
/// assert_eq!(limited.len(), 2);
/// assert_eq!(limited[1].method, "middle");
/// ```
pub fn limit_frames(frames: &[StackFrame], n: usize) -> Vec<StackFrame> {
    frames.iter().take(n).cloned().collect()
}

/// Prefix-drop noise frames, then cap the rest to `max_frames`.
///
/// # Errors
///
/// Returns a [`ContractViolation`] if [`is_noise`] does.
pub fn trim_frames(
    frames: &[StackFrame],
    exclusions: &ExclusionSet,
    skips: &[SkipRegistry],
    max_frames: usize,
) -> Result<Vec<StackFrame>, ContractViolation> {
    let kept = drop_noise_prefix(frames, |f| is_noise(f, exclusions, skips))?;
    let trimmed = limit_frames(kept, max_frames);
    trace!(
        "trimmed {} frames: {} noise dropped, {} over the cap of {}",
        frames.len(),
        frames.len() - kept.len(),
        kept.len() - trimmed.len(),
        max_frames
    );
    Ok(trimmed)
}
