//! Statically declared skip markers.
//!
//! A [`SkipRegistry`] lists declaring types whose every frame is noise and
//! individual call sites (declaring type plus method) that are noise.
//! Registries can be declared as constants next to the support code they
//! describe, or assembled with builders:
//!
//! ```rust
//! use femtoassert::skip_marker::SkipRegistry;
//! use femtoassert::stack_frame::StackFrame;
//!
//! const FIXTURE_SKIPS: SkipRegistry = SkipRegistry::from_static(
//!     &["my_tests::support::Fixture"],
//!     &[("my_tests::support", "check_rows")],
//! );
//!
//! let frame = StackFrame::new("my_tests::support", "check_rows");
//! assert_eq!(FIXTURE_SKIPS.marks_call_site(&frame), Ok(true));
//!
//! let built = SkipRegistry::new()
//!     .with_type("my_tests::support::Fixture")
//!     .with_call_site("my_tests::support", "check_rows");
//! assert_eq!(built.marks_call_site(&frame), Ok(true));
//! ```

use std::borrow::Cow;

use crate::failure::ContractViolation;
use crate::stack_frame::StackFrame;

/// Skip markers carried by this crate's own support items.
pub const BUILTIN_SKIPS: SkipRegistry = SkipRegistry::from_static(
    &[concat!(
        "<",
        env!("CARGO_CRATE_NAME"),
        "::comparison::DeepEquality as ",
        env!("CARGO_CRATE_NAME"),
        "::comparison::Comparator>"
    )],
    &[
        (
            concat!(env!("CARGO_CRATE_NAME"), "::traceback_frames"),
            "capture_frames",
        ),
        (
            concat!(env!("CARGO_CRATE_NAME"), "::rewriter::ShouldEqual"),
            "should_equal",
        ),
    ],
);

/// Read-only set of skip-marked types and call sites.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipRegistry {
    types: Cow<'static, [&'static str]>,
    call_sites: Cow<'static, [(&'static str, &'static str)]>,
}

impl SkipRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self::from_static(&[], &[])
    }

    /// Declare a registry from static lists.
    pub const fn from_static(
        types: &'static [&'static str],
        call_sites: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            types: Cow::Borrowed(types),
            call_sites: Cow::Borrowed(call_sites),
        }
    }

    /// The registry of this crate's own marked items, [`BUILTIN_SKIPS`].
    pub const fn global() -> Self {
        BUILTIN_SKIPS
    }

    /// Mark every frame of `declaring_type` as noise.
    #[must_use]
    pub fn with_type(mut self, declaring_type: &'static str) -> Self {
        self.types.to_mut().push(declaring_type);
        self
    }

    /// Mark frames running `method` on `declaring_type` as noise.
    #[must_use]
    pub fn with_call_site(mut self, declaring_type: &'static str, method: &'static str) -> Self {
        self.call_sites.to_mut().push((declaring_type, method));
        self
    }

    /// Whether the frame's declaring type carries a type-level marker.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::MissingTypeMetadata`] if the frame has no
    /// declaring type to look up.
    pub fn marks_type(&self, frame: &StackFrame) -> Result<bool, ContractViolation> {
        let ty = declaring_type_of(frame)?;
        Ok(self.types.iter().any(|marked| *marked == ty))
    }

    /// Whether the frame's call site carries a marker.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::MissingTypeMetadata`] if the frame has no
    /// declaring type to look up.
    pub fn marks_call_site(&self, frame: &StackFrame) -> Result<bool, ContractViolation> {
        let ty = declaring_type_of(frame)?;
        Ok(self
            .call_sites
            .iter()
            .any(|(site_ty, method)| *site_ty == ty && *method == frame.method))
    }
}

fn declaring_type_of(frame: &StackFrame) -> Result<&str, ContractViolation> {
    if frame.declaring_type.is_empty() {
        return Err(ContractViolation::MissingTypeMetadata {
            method: frame.method.clone(),
        });
    }
    Ok(&frame.declaring_type)
}
