//! Stack frame extraction from the standard library's backtrace.
//!
//! [`capture_frames`] records the live call stack as a sequence of
//! [`StackFrame`] values ordered innermost first, the same order the
//! backtrace prints them in. Frames belonging to the capture machinery itself
//! are removed so the first entry is the caller of `capture_frames`' caller
//! chain rather than `std::backtrace` internals.

use log::trace;
use std::backtrace::Backtrace;

use crate::stack_frame::StackFrame;

/// Path prefix shared by the standard library's capture machinery.
const CAPTURE_MACHINERY_PREFIX: &str = "std::backtrace";

/// Capture the current call stack.
///
/// Capturing is forced regardless of `RUST_BACKTRACE`. On platforms without
/// backtrace support the result is empty.
pub fn capture_frames() -> Vec<StackFrame> {
    let backtrace = Backtrace::force_capture();
    let frames = parse_backtrace(&backtrace.to_string());
    let skip = frames
        .iter()
        .take_while(|f| f.declaring_type.starts_with(CAPTURE_MACHINERY_PREFIX))
        .count();
    trace!(
        "captured {} frames ({} capture-machinery frames skipped)",
        frames.len(),
        skip
    );
    frames.into_iter().skip(skip).collect()
}

/// Parse the `Display` rendering of a [`Backtrace`].
///
/// Each numbered line starts a frame; an optional indented `at file:line:col`
/// line that follows attaches a location to it. Lines that fit neither shape
/// are ignored.
///
/// # Examples
///
/// ```rust
/// use femtoassert::traceback_frames::parse_backtrace;
///
/// let text = "   0: app::tests::parses\n             at ./src/lib.rs:12:5\n   1: main\n";
/// let frames = parse_backtrace(text);
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0].declaring_type, "app::tests");
/// assert_eq!(frames[0].line, Some(12));
/// ```
pub fn parse_backtrace(text: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                let (file, lineno) = parse_location(location);
                last.file = Some(file.to_string());
                last.line = lineno;
            }
            continue;
        }
        if let Some(symbol) = numbered_symbol(line) {
            frames.push(StackFrame::from_symbol(symbol));
        }
    }
    frames
}

/// Return the symbol of a `N: symbol` line.
fn numbered_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(symbol)
}

/// Split `path:line:col` into a path and an optional line number.
fn parse_location(location: &str) -> (&str, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let col = parts.next();
    let line = parts.next();
    match (parts.next(), line, col) {
        (Some(path), Some(line), Some(_)) => match line.parse() {
            Ok(n) => (path, Some(n)),
            Err(_) => (location, None),
        },
        _ => (location, None),
    }
}
