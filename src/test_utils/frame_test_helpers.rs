//! Shared test utilities for frame trimming and rewriting tests.
//!
//! This module provides common assertion helpers and factory functions
//! for use across test modules.

use crate::stack_frame::StackFrame;

/// Create a StackFrame with the given declaring type and method name.
pub fn make_frame(declaring_type: &str, method: &str) -> StackFrame {
    StackFrame::new(declaring_type, method)
}

/// Generic helper to assert a slice of frames has the expected field values,
/// in order.
pub fn assert_frames_by_field<F>(frames: &[StackFrame], expected_values: &[&str], field_extractor: F)
where
    F: Fn(&StackFrame) -> &str,
{
    assert_eq!(
        frames.len(),
        expected_values.len(),
        "frame count mismatch: {:?}",
        frames.iter().map(|f| f.to_string()).collect::<Vec<_>>()
    );
    for (i, expected) in expected_values.iter().enumerate() {
        assert_eq!(
            field_extractor(&frames[i]),
            *expected,
            "Mismatch at index {}",
            i
        );
    }
}

/// Assert frames have the expected method names.
pub fn assert_frames_by_method(frames: &[StackFrame], expected_methods: &[&str]) {
    assert_frames_by_field(frames, expected_methods, |f| &f.method);
}

/// Assert frames have the expected declaring types.
pub fn assert_frames_by_type(frames: &[StackFrame], expected_types: &[&str]) {
    assert_frames_by_field(frames, expected_types, |f| &f.declaring_type);
}

/// Assert `frame` was reported from the test function `test_name` declared
/// in `module`.
///
/// Test attribute macros may nest the body in an inner function of the same
/// name, so `test_name` is matched anywhere in the qualified symbol.
pub fn assert_frame_in_test(frame: &StackFrame, module: &str, test_name: &str) {
    let symbol = format!("{}::{}", frame.declaring_type, frame.method);
    assert!(
        frame.declaring_type.starts_with(module) && symbol.contains(test_name),
        "expected the first frame to come from {module}::{test_name}, got {frame}"
    );
}

/// Run `assertion`, which must panic with a failure report, and return the
/// report's first `at` line.
pub fn first_reported_frame<F>(assertion: F) -> String
where
    F: FnOnce() + std::panic::UnwindSafe,
{
    let payload = std::panic::catch_unwind(assertion).expect_err("assertion should panic");
    let report = payload
        .downcast::<String>()
        .expect("panic carries a formatted report");
    report
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("at "))
        .expect("report lists at least one frame")
        .to_owned()
}
