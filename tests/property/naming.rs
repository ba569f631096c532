// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Naming Contracts
//!
//! Resource and stack names are pure functions of their inputs, and external
//! automation parses them back apart. These tests prove the contracts hold
//! for all alphanumeric inputs, not just the fixtures used elsewhere.

use proptest::prelude::*;

use wa_handson::domain::naming;

// ============================================================================
// Input Strategies
// ============================================================================

/// Arbitrary mixed-case alphanumeric segment
fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

/// Segment starting with a letter, as stack labels do in practice
fn label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,15}"
}

// ============================================================================
// Resource Name Properties
// ============================================================================

proptest! {
    /// Property: Resource names are fully lowercase
    ///
    /// Whatever casing the inputs carry, the derived name never does.
    #[test]
    fn prop_resource_names_are_lowercase(
        environment in segment(),
        pillar in segment(),
        resource_type in segment(),
    ) {
        let name = naming::resource_name(&environment, &pillar, &resource_type, None);
        prop_assert_eq!(name.clone(), name.to_lowercase());
    }

    /// Property: Resource names are the lowercased segments joined behind
    /// the project prefix
    #[test]
    fn prop_resource_names_join_behind_the_prefix(
        environment in segment(),
        pillar in segment(),
        resource_type in segment(),
    ) {
        let name = naming::resource_name(&environment, &pillar, &resource_type, None);
        prop_assert_eq!(
            name,
            format!(
                "wa-handson-{}-{}-{}",
                environment.to_lowercase(),
                pillar.to_lowercase(),
                resource_type.to_lowercase()
            )
        );
    }

    /// Property: A suffix appends exactly one lowercased segment
    #[test]
    fn prop_suffix_appends_exactly_one_segment(
        environment in segment(),
        pillar in segment(),
        resource_type in segment(),
        suffix in segment(),
    ) {
        let without = naming::resource_name(&environment, &pillar, &resource_type, None);
        let with = naming::resource_name(&environment, &pillar, &resource_type, Some(&suffix));
        prop_assert_eq!(with, format!("{}-{}", without, suffix.to_lowercase()));
    }

    /// Property: Lowercasing inputs first changes nothing
    ///
    /// Derivation is idempotent with respect to input casing, so callers
    /// never need to normalize before naming.
    #[test]
    fn prop_resource_naming_absorbs_input_casing(
        environment in segment(),
        pillar in segment(),
        resource_type in segment(),
    ) {
        prop_assert_eq!(
            naming::resource_name(&environment, &pillar, &resource_type, None),
            naming::resource_name(
                &environment.to_lowercase(),
                &pillar.to_lowercase(),
                &resource_type.to_lowercase(),
                None
            )
        );
    }
}

// ============================================================================
// Stack Name Properties
// ============================================================================

proptest! {
    /// Property: Stack names capitalize exactly the first character of the
    /// environment and pillar segments
    #[test]
    fn prop_stack_names_capitalize_only_the_first_char(
        environment in "[a-z][a-zA-Z0-9]{0,11}",
        pillar in "[a-z][a-zA-Z0-9]{0,11}",
        label in label(),
    ) {
        let name = naming::stack_name(&environment, &pillar, &label);
        let parts: Vec<&str> = name.splitn(4, '-').collect();

        prop_assert_eq!(parts[0], "WaHandson");
        prop_assert_eq!(
            parts[1].to_string(),
            format!("{}{}", environment[..1].to_uppercase(), &environment[1..])
        );
        prop_assert_eq!(
            parts[2].to_string(),
            format!("{}{}", pillar[..1].to_uppercase(), &pillar[1..])
        );
    }

    /// Property: The stack label passes through untouched
    ///
    /// Labels arrive already PascalCase by convention; derivation must not
    /// second-guess them.
    #[test]
    fn prop_stack_names_keep_the_label_untouched(
        environment in segment(),
        pillar in segment(),
        label in label(),
    ) {
        let name = naming::stack_name(&environment, &pillar, &label);
        let suffix = format!("-{}", label);
        prop_assert!(name.ends_with(&suffix));
    }

    /// Property: Stack naming never panics on odd but non-empty input
    #[test]
    fn prop_stack_naming_is_total(
        environment in ".{0,24}",
        pillar in ".{0,24}",
        label in ".{0,24}",
    ) {
        let name = naming::stack_name(&environment, &pillar, &label);
        prop_assert!(name.starts_with("WaHandson-"));
    }
}
