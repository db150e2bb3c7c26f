//! Declaring-type exclusion sets.
//!
//! One logical piece of support code shows up under several declaring types
//! in a captured stack: the item itself, closures and async bodies lowered
//! into it, and closures nested inside the assertion helper's wrapper
//! functions. [`synthetic_variants`] enumerates those forms for a qualifier
//! and [`build_exclusion_set`] applies it to the built-in support types plus
//! any caller-supplied ones.

use std::any::type_name;
use std::collections::HashSet;
use std::fmt;

use crate::failure::ContractViolation;

/// Suffix of closures and async bodies lowered into the qualified item.
pub const CONTAINER_SUFFIX: &str = "::{{closure}}";

/// Suffixes under which the assertion helper's wrapper bodies declare their
/// frames: the equality check, the trimming step and the delegating assert.
pub const NESTED_LITERAL_SUFFIXES: &[&str] = &["::assert_equal", "::trim_failure", "::should_equal"];

/// Qualifiers of this crate's own support code, always excluded.
pub const BASE_EXCLUSIONS: &[&str] = &[
    concat!(env!("CARGO_CRATE_NAME"), "::rewriter"),
    concat!(env!("CARGO_CRATE_NAME"), "::rewriter::AssertionRewriter<C>"),
    concat!(env!("CARGO_CRATE_NAME"), "::comparison"),
    concat!(env!("CARGO_CRATE_NAME"), "::comparison::DeepEquality"),
    concat!(env!("CARGO_CRATE_NAME"), "::failure"),
    concat!(env!("CARGO_CRATE_NAME"), "::frame_filter"),
    concat!(env!("CARGO_CRATE_NAME"), "::traceback_frames"),
];

/// A reference to a declaring type by its fully qualified path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef(String);

impl TypeRef {
    /// Reference `T` by [`std::any::type_name`].
    ///
    /// Generic types include their arguments, e.g.
    /// `app::Cache<alloc::string::String>`.
    pub fn of<T: ?Sized>() -> Self {
        Self(type_name::<T>().to_string())
    }

    /// Reference a type, module or function by an explicit path. Useful for
    /// free functions, which are declared on their module path.
    pub fn named(qualifier: impl Into<String>) -> Self {
        Self(qualifier.into())
    }

    /// Reference the trait-impl form `<T as Trait>` that trait methods are
    /// declared on.
    pub fn trait_impl(ty: &TypeRef, tr: &TypeRef) -> Self {
        Self(format!("<{} as {}>", ty.0, tr.0))
    }

    /// The fully qualified path.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::UnqualifiedType`] when the path is empty.
    pub fn qualifier(&self) -> Result<&str, ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::UnqualifiedType);
        }
        Ok(&self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every declaring type under which frames of `qualifier` may appear.
///
/// # Examples
///
/// ```rust
/// use femtoassert::exclusion::synthetic_variants;
///
/// let variants = synthetic_variants("app::support");
/// assert_eq!(variants[0], "app::support");
/// assert!(variants.contains(&"app::support::{{closure}}".to_string()));
/// assert!(variants.contains(&"app::support::assert_equal".to_string()));
/// ```
pub fn synthetic_variants(qualifier: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(2 + NESTED_LITERAL_SUFFIXES.len());
    variants.push(qualifier.to_string());
    variants.push(format!("{qualifier}{CONTAINER_SUFFIX}"));
    variants.extend(
        NESTED_LITERAL_SUFFIXES
            .iter()
            .map(|suffix| format!("{qualifier}{suffix}")),
    );
    variants
}

/// Declaring types treated as noise for one rewrite.
///
/// Only [`build_exclusion_set`] constructs one, so every set holds the base
/// exclusions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    /// Membership test.
    pub fn contains(&self, declaring_type: &str) -> bool {
        self.0.contains(declaring_type)
    }

    /// Number of excluded declaring types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the exclusion set from [`BASE_EXCLUSIONS`] and `extra_types`,
/// expanded with [`synthetic_variants`].
///
/// # Errors
///
/// Returns [`ContractViolation::UnqualifiedType`] if any of `extra_types`
/// has an empty qualifier.
pub fn build_exclusion_set(extra_types: &[TypeRef]) -> Result<ExclusionSet, ContractViolation> {
    let mut set: HashSet<String> = BASE_EXCLUSIONS
        .iter()
        .flat_map(|base| synthetic_variants(base))
        .collect();
    for ty in extra_types {
        set.extend(synthetic_variants(ty.qualifier()?));
    }
    Ok(ExclusionSet(set))
}
