//! Testing utilities for sf2hs workspace
//!
//! Shared fixtures: describe payloads, field metadata and classified field sets.

#![allow(missing_docs)]

use serde_json::{json, Map, Value};
use sf2hs_fields::{classify_all, FieldMetadata, ObjectFieldSet};

/// Fields of a typical Account describe, one per classifier category
pub fn account_fields() -> Vec<FieldMetadata> {
    vec![
        FieldMetadata::new("Id", "id").with_label("Account ID").with_nillable(false).with_length(18),
        FieldMetadata::new("Name", "string")
            .with_label("Account Name")
            .with_nillable(false)
            .writable()
            .with_length(255),
        FieldMetadata::new("Phone", "phone").with_label("Account Phone").writable().with_length(40),
        FieldMetadata::new("Industry", "picklist")
            .with_label("Industry")
            .writable()
            .with_picklist_value("Banking", "Banking")
            .with_picklist_value("Energy", "Energy"),
        FieldMetadata::new("OwnerId", "reference")
            .with_label("Owner ID")
            .with_nillable(false)
            .writable()
            .with_reference("User"),
        FieldMetadata::new("ParentId", "reference")
            .with_label("Parent Account ID")
            .writable()
            .with_reference("Account"),
        FieldMetadata::new("BillingAddress", "address").with_label("Billing Address"),
        FieldMetadata::new("AnnualRevenue", "currency")
            .with_label("Annual Revenue")
            .writable()
            .with_precision(18, 0),
        FieldMetadata::new("Score__c", "double")
            .with_label("Score")
            .with_calculated(true)
            .with_precision(18, 2),
        FieldMetadata::new("CreatedDate", "datetime").with_label("Created Date").with_nillable(false),
    ]
}

/// Fields of a small Contact describe
pub fn contact_fields() -> Vec<FieldMetadata> {
    vec![
        FieldMetadata::new("LastName", "string")
            .with_label("Last Name")
            .with_nillable(false)
            .writable()
            .with_length(80),
        FieldMetadata::new("Email", "email").with_label("Email").writable().with_length(80),
        FieldMetadata::new("AccountId", "reference")
            .with_label("Account ID")
            .writable()
            .with_reference("Account"),
        FieldMetadata::new("LastModifiedById", "reference")
            .with_label("Last Modified By ID")
            .with_reference("User"),
    ]
}

/// Describe payload for one object, shaped like the source API's response
pub fn describe_payload(name: &str, fields: &[FieldMetadata]) -> Value {
    json!({
        "name": name,
        "label": name,
        "labelPlural": format!("{name}s"),
        "keyPrefix": "001",
        "createable": true,
        "updateable": true,
        "deletable": true,
        "fields": fields,
    })
}

/// Describe document covering Account and Contact
pub fn describe_document() -> Value {
    json!({
        "Account": describe_payload("Account", &account_fields()),
        "Contact": describe_payload("Contact", &contact_fields()),
    })
}

/// Classified Account and Contact fields
pub fn sample_field_set() -> ObjectFieldSet {
    let mut set = ObjectFieldSet::new();
    set.insert("Account".to_string(), classify_all(&account_fields()));
    set.insert("Contact".to_string(), classify_all(&contact_fields()));
    set
}

/// Unwrap a JSON object literal into a map
///
/// # Panics
/// If `value` is not an object.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}
