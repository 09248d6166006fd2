//! Property tests for codec round-trips.
//!
//! Records are generated with every optional facet toggled and with text
//! that sits on the edges of the workbook flattening: empty strings,
//! numeric-looking labels, notes holding newlines or opening with `[`.

use proptest::prelude::*;
use sf2hs_fields::{FieldRecord, MigrationType, PicklistValue};
use sf2hs_interchange::{into_field_set, ExcelCodec, FieldSetCodec, JsonCodec, ObjectFieldSet};

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9_.]{1,12}",
        "[0-9]{1,6}",
    ]
}

fn any_note() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z ]{1,16}",
        "\\[[a-z]{0,4}\\]",
        "[a-z]{1,4}\n[a-z]{1,4}",
    ]
}

fn any_picklist() -> impl Strategy<Value = Option<Vec<PicklistValue>>> {
    proptest::option::of(proptest::collection::vec(
        (any_text(), any_text()).prop_map(|(label, value)| PicklistValue { label, value }),
        0..3,
    ))
}

fn any_migration_type() -> impl Strategy<Value = MigrationType> {
    prop_oneof![
        Just(MigrationType::Direct),
        Just(MigrationType::UserReference),
        Just(MigrationType::Association),
    ]
}

prop_compose! {
    fn any_record()(
        (name, label, field_type) in (any_text(), any_text(), any_text()),
        (length, precision, scale) in (
            proptest::option::of(any::<u32>()),
            proptest::option::of(0u32..64),
            proptest::option::of(0u32..32),
        ),
        flags in any::<[bool; 5]>(),
        picklist_values in any_picklist(),
        migration_type in any_migration_type(),
        migration_notes in proptest::collection::vec(any_note(), 0..4),
        hubspot_property in proptest::option::of("[a-z_]{1,12}"),
    ) -> FieldRecord {
        let [required, unique, updateable, createable, can_migrate] = flags;
        FieldRecord {
            name,
            label,
            field_type,
            length,
            precision,
            scale,
            required,
            unique,
            updateable,
            createable,
            picklist_values,
            can_migrate,
            migration_type,
            migration_notes,
            hubspot_property,
        }
    }
}

fn any_field_set() -> impl Strategy<Value = ObjectFieldSet> {
    proptest::collection::vec(proptest::collection::vec(any_record(), 0..5), 1..4).prop_map(|objects| {
        ["Account", "Contact", "Lead"]
            .iter()
            .zip(objects)
            .map(|(object, records)| ((*object).to_string(), records))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_json_roundtrip_is_exact(set in any_field_set()) {
        let bytes = JsonCodec.encode(&set).unwrap();
        let back = into_field_set(JsonCodec.decode(&bytes).unwrap()).unwrap();
        prop_assert_eq!(back, set);
    }

    #[test]
    fn prop_workbook_roundtrip_is_exact(set in any_field_set()) {
        let bytes = ExcelCodec.encode(&set).unwrap();
        let back = into_field_set(ExcelCodec.decode(&bytes).unwrap()).unwrap();
        prop_assert_eq!(back, set);
    }
}
