//! Property tests for the migration classifier.
//!
//! Each property quantifies over arbitrary field metadata generated around
//! one category, so the priority chain is exercised with noise in every
//! other attribute.

use proptest::prelude::*;
use sf2hs_fields::predicates::SYSTEM_FIELDS;
use sf2hs_fields::{classify, FieldMetadata, MigrationType};

fn any_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("string".to_string()),
        Just("picklist".to_string()),
        Just("reference".to_string()),
        Just("address".to_string()),
        Just("boolean".to_string()),
        Just("double".to_string()),
        "[a-z]{1,12}",
    ]
}

fn any_targets() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            Just("User".to_string()),
            Just("Account".to_string()),
            Just("Group".to_string()),
            "[A-Z][a-z]{1,8}",
        ],
        0..4,
    )
}

fn field(name: String, field_type: String, calculated: bool, targets: Vec<String>) -> FieldMetadata {
    let mut field = FieldMetadata::new(name, field_type).with_calculated(calculated);
    field.reference_to = targets;
    field
}

fn non_system_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z]{0,10}(__c)?".prop_filter("not a system field", |n| !SYSTEM_FIELDS.contains(&n.as_str()))
}

proptest! {
    #[test]
    fn prop_system_fields_never_migrate(
        idx in 0..SYSTEM_FIELDS.len(),
        field_type in any_type(),
        calculated in any::<bool>(),
        targets in any_targets(),
    ) {
        let verdict = classify(&field(SYSTEM_FIELDS[idx].to_string(), field_type, calculated, targets));
        prop_assert!(!verdict.can_migrate);
        prop_assert_eq!(verdict.migration_type, MigrationType::Direct);
        prop_assert_eq!(verdict.notes.len(), 1);
        prop_assert!(verdict.notes[0].starts_with("System field"));
    }

    #[test]
    fn prop_formula_fields_never_migrate(
        name in non_system_name(),
        field_type in any_type(),
        targets in any_targets(),
    ) {
        let verdict = classify(&field(name, field_type, true, targets));
        prop_assert!(!verdict.can_migrate);
        prop_assert_eq!(verdict.migration_type, MigrationType::Direct);
    }

    #[test]
    fn prop_single_user_target_is_user_reference(name in non_system_name()) {
        let verdict = classify(&field(name, "reference".to_string(), false, vec!["User".to_string()]));
        prop_assert!(verdict.can_migrate);
        prop_assert_eq!(verdict.migration_type, MigrationType::UserReference);
    }

    #[test]
    fn prop_other_references_are_associations(
        name in non_system_name(),
        targets in any_targets().prop_filter("not exactly [User]", |t| t != &vec!["User".to_string()]),
    ) {
        let verdict = classify(&field(name, "reference".to_string(), false, targets));
        prop_assert!(verdict.can_migrate);
        prop_assert_eq!(verdict.migration_type, MigrationType::Association);
    }

    #[test]
    fn prop_addresses_never_migrate(name in non_system_name(), targets in any_targets()) {
        let verdict = classify(&field(name, "address".to_string(), false, targets));
        prop_assert!(!verdict.can_migrate);
    }

    #[test]
    fn prop_notes_explain_every_non_default_verdict(
        name in prop_oneof![non_system_name(), (0..SYSTEM_FIELDS.len()).prop_map(|i| SYSTEM_FIELDS[i].to_string())],
        field_type in any_type(),
        calculated in any::<bool>(),
        targets in any_targets(),
    ) {
        let verdict = classify(&field(name, field_type, calculated, targets));
        if !verdict.can_migrate || verdict.migration_type != MigrationType::Direct {
            prop_assert!(!verdict.notes.is_empty());
        } else {
            prop_assert!(verdict.notes.is_empty());
        }
    }
}
