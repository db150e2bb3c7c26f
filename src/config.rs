//! Configuration for [`crate::rewriter::AssertionRewriter`].
//!
//! [`RewriteConfig`] gathers everything the rewriter needs besides the
//! comparator: the frame cap, extra declaring types to treat as noise and the
//! skip-marker registries to consult. Builders consume and return `self` so
//! configurations read as a single chain:
//!
//! ```rust
//! use femtoassert::config::RewriteConfig;
//! use femtoassert::exclusion::TypeRef;
//!
//! let config = RewriteConfig::default()
//!     .with_max_frames(8)
//!     .with_exclude_type(TypeRef::named("my_tests::support"));
//! assert_eq!(config.max_frames(), 8);
//! ```

use crate::exclusion::TypeRef;
use crate::frame_filter::MAX_TRIMMED_FRAMES;
use crate::skip_marker::SkipRegistry;

/// Settings applied to every assertion made through one rewriter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteConfig {
    max_frames: usize,
    extra_exclude_types: Vec<TypeRef>,
    skip_registries: Vec<SkipRegistry>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_frames: MAX_TRIMMED_FRAMES,
            extra_exclude_types: Vec::new(),
            skip_registries: vec![SkipRegistry::global()],
        }
    }
}

impl RewriteConfig {
    /// Cap the number of frames kept after trimming.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Treat `ty` and its synthetic variants as noise on every assertion.
    #[must_use]
    pub fn with_exclude_type(mut self, ty: TypeRef) -> Self {
        self.extra_exclude_types.push(ty);
        self
    }

    /// Consult `registry` in addition to the built-in skip markers.
    #[must_use]
    pub fn with_skip_registry(mut self, registry: SkipRegistry) -> Self {
        self.skip_registries.push(registry);
        self
    }

    /// Maximum number of frames kept after trimming.
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Declaring types excluded on every assertion.
    pub fn extra_exclude_types(&self) -> &[TypeRef] {
        &self.extra_exclude_types
    }

    /// Registries consulted for skip markers, built-ins first.
    pub fn skip_registries(&self) -> &[SkipRegistry] {
        &self.skip_registries
    }
}
