//! Call-site records captured from a failing assertion.
//!
//! A [`StackFrame`] names the item that declared the running code (its
//! *declaring type*, which for Rust is the path of the enclosing type, module
//! or function) and the method that was executing. Frames are produced once
//! by [`crate::traceback_frames`] and never mutated afterwards; trimming only
//! ever replaces the whole sequence.
//!
//! # Example
//!
//! ```rust
//! use femtoassert::stack_frame::StackFrame;
//!
//! let frame = StackFrame::from_symbol("my_crate::tests::parses_header::{{closure}}");
//! assert_eq!(frame.declaring_type, "my_crate::tests::parses_header");
//! assert_eq!(frame.method, "{{closure}}");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaring type assigned to symbols that carry no path, such as `main` or
/// `__libc_start_main`.
pub const GLOBAL_SCOPE: &str = "<global>";

/// A single call-site record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    /// Fully qualified path of the item that declares the running code.
    pub declaring_type: String,
    /// Name of the executing method or function.
    pub method: String,
    /// Source file, when debug info resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number in `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl StackFrame {
    /// Create a frame from its declaring type and method name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use femtoassert::stack_frame::StackFrame;
    ///
    /// let frame = StackFrame::new("app::Parser", "parse");
    /// assert_eq!(frame.declaring_type, "app::Parser");
    /// assert_eq!(frame.method, "parse");
    /// assert!(frame.file.is_none());
    /// ```
    pub fn new(declaring_type: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    /// Build a frame from a demangled symbol such as
    /// `<app::Parser as core::str::FromStr>::from_str`.
    pub fn from_symbol(symbol: &str) -> Self {
        let (declaring_type, method) = split_symbol(symbol);
        Self::new(declaring_type, method)
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: Option<u32>) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.declaring_type == GLOBAL_SCOPE {
            f.write_str(&self.method)?;
        } else {
            write!(f, "{}::{}", self.declaring_type, self.method)?;
        }
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            _ => Ok(()),
        }
    }
}

/// Remove the legacy mangling hash (`::h0123456789abcdef`) if present.
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

/// Split a symbol into `(declaring_type, method)` at the last `::` that is
/// not nested inside angle brackets.
///
/// # Examples
///
/// ```rust
/// use femtoassert::stack_frame::split_symbol;
///
/// let (ty, method) = split_symbol("<core::pin::Pin<P> as core::future::future::Future>::poll");
/// assert_eq!(ty, "<core::pin::Pin<P> as core::future::future::Future>");
/// assert_eq!(method, "poll");
///
/// let (ty, method) = split_symbol("main");
/// assert_eq!(ty, "<global>");
/// assert_eq!(method, "main");
/// ```
pub fn split_symbol(symbol: &str) -> (String, String) {
    let symbol = strip_hash(symbol.trim());
    let bytes = symbol.as_bytes();
    let mut depth = 0usize;
    let mut split_at = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                split_at = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    match split_at {
        Some(idx) => (symbol[..idx].to_string(), symbol[idx + 2..].to_string()),
        None => (GLOBAL_SCOPE.to_string(), symbol.to_string()),
    }
}
