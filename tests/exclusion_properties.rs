//! Property-based tests for exclusion sets.
//!
//! These tests generate arbitrary type paths to verify that the built-in
//! support types are always excluded and that every caller-supplied type
//! brings all of its synthetic variants along.

use femtoassert::exclusion::{BASE_EXCLUSIONS, CONTAINER_SUFFIX, NESTED_LITERAL_SUFFIXES};
use femtoassert::{TypeRef, build_exclusion_set, synthetic_variants};
use proptest::prelude::*;

fn type_path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z_][a-z0-9_]{0,8}", 1..4).prop_map(|segments| segments.join("::"))
}

proptest! {
    #[test]
    fn base_types_survive_any_extras(extras in proptest::collection::vec(type_path(), 0..6)) {
        let types: Vec<TypeRef> = extras.iter().map(TypeRef::named).collect();
        let set = build_exclusion_set(&types).expect("qualified types build");
        for base in BASE_EXCLUSIONS {
            for variant in synthetic_variants(base) {
                prop_assert!(set.contains(&variant));
            }
        }
    }

    #[test]
    fn extra_types_bring_every_variant(extra in type_path()) {
        let set = build_exclusion_set(&[TypeRef::named(extra.clone())]).expect("builds");
        prop_assert!(set.contains(&extra));
        let container = format!("{extra}{CONTAINER_SUFFIX}");
        prop_assert!(set.contains(&container));
        for suffix in NESTED_LITERAL_SUFFIXES {
            let nested = format!("{extra}{suffix}");
            prop_assert!(set.contains(&nested));
        }
    }
}
