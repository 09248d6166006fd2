//! Structural validation of loaded field sets
//!
//! Checks shape and value types only; verdicts are not re-derived. Every
//! defect is collected, nothing short-circuits except an object with no
//! fields, which is reported once and not examined further.

use crate::raw::{RawFieldSet, RawRecord};
use serde_json::Value;
use sf2hs_fields::metadata::PICKLIST_TYPE;
use sf2hs_fields::REQUIRED_KEYS;
use std::fmt;

/// What is wrong with an object or one of its records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefectKind {
    /// Object has an empty field list
    NoFields,
    /// Required keys absent from the record, in canonical key order
    MissingKeys(Vec<&'static str>),
    NameNotString,
    CanMigrateNotBoolean,
    /// `picklist_values` present on a picklist but not a list
    PicklistNotList,
    /// Picklist entry (1-based) is not a `{label, value}` mapping
    PicklistEntry(usize),
}

/// One validation finding
///
/// Renders to the message shown to users; `field` is the 1-based position of
/// the record within its object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefect {
    pub object: String,
    pub field: Option<usize>,
    pub kind: DefectKind,
}

impl FieldDefect {
    /// Defect on the object as a whole
    #[must_use]
    pub fn object(object: impl Into<String>, kind: DefectKind) -> Self {
        Self {
            object: object.into(),
            field: None,
            kind,
        }
    }

    /// Defect on the record at 1-based position `field`
    #[must_use]
    pub fn field(object: impl Into<String>, field: usize, kind: DefectKind) -> Self {
        Self {
            object: object.into(),
            field: Some(field),
            kind,
        }
    }
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(field) = self.field else {
            return write!(f, "No fields found for object '{}'", self.object);
        };

        match &self.kind {
            DefectKind::PicklistEntry(entry) => write!(
                f,
                "Object '{}', field {}, picklist value {}: Must have 'label' and 'value' keys",
                self.object, field, entry
            ),
            kind => {
                write!(f, "Object '{}', field {}: ", self.object, field)?;
                match kind {
                    DefectKind::MissingKeys(keys) => {
                        write!(f, "Missing required fields: {}", keys.join(", "))
                    }
                    DefectKind::NameNotString => f.write_str("Field name must be a string"),
                    DefectKind::CanMigrateNotBoolean => f.write_str("can_migrate must be a boolean"),
                    DefectKind::PicklistNotList => f.write_str("picklist_values must be a list"),
                    DefectKind::NoFields => f.write_str("No fields found"),
                    DefectKind::PicklistEntry(_) => Ok(()),
                }
            }
        }
    }
}

/// Collect every structural defect in a field set
#[must_use]
pub fn validate(fields_data: &RawFieldSet) -> Vec<FieldDefect> {
    let mut defects = Vec::new();

    for (object, records) in fields_data {
        if records.is_empty() {
            defects.push(FieldDefect::object(object.as_str(), DefectKind::NoFields));
            continue;
        }

        for (i, record) in records.iter().enumerate() {
            validate_record(object, i + 1, record, &mut defects);
        }
    }

    if !defects.is_empty() {
        tracing::debug!("Validation found {} defect(s)", defects.len());
    }
    defects
}

/// Validation messages, one per defect
#[must_use]
pub fn validate_field_data(fields_data: &RawFieldSet) -> Vec<String> {
    validate(fields_data).iter().map(ToString::to_string).collect()
}

fn validate_record(object: &str, position: usize, record: &RawRecord, defects: &mut Vec<FieldDefect>) {
    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !record.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        defects.push(FieldDefect::field(object, position, DefectKind::MissingKeys(missing)));
    }

    // Absent keys are already reported above
    if record.get("name").is_some_and(|name| !name.is_string()) {
        defects.push(FieldDefect::field(object, position, DefectKind::NameNotString));
    }

    if record.get("can_migrate").is_some_and(|flag| !flag.is_boolean()) {
        defects.push(FieldDefect::field(object, position, DefectKind::CanMigrateNotBoolean));
    }

    let is_picklist = record.get("type").and_then(Value::as_str) == Some(PICKLIST_TYPE);
    let Some(values) = record.get("picklist_values").filter(|v| is_picklist && is_truthy(v)) else {
        return;
    };

    match values {
        Value::Array(entries) => {
            for (j, entry) in entries.iter().enumerate() {
                if !is_picklist_entry(entry) {
                    defects.push(FieldDefect::field(object, position, DefectKind::PicklistEntry(j + 1)));
                }
            }
        }
        _ => defects.push(FieldDefect::field(object, position, DefectKind::PicklistNotList)),
    }
}

fn is_picklist_entry(entry: &Value) -> bool {
    entry
        .as_object()
        .is_some_and(|map| map.contains_key("label") && map.contains_key("value"))
}

/// Null, false, zero and empty containers count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn valid(name: &str) -> Value {
        json!({
            "name": name,
            "label": name,
            "type": "string",
            "required": false,
            "unique": false,
            "updateable": true,
            "can_migrate": true,
            "migration_type": "direct",
            "migration_notes": []
        })
    }

    fn set(object: &str, records: Vec<Value>) -> RawFieldSet {
        let mut data = RawFieldSet::new();
        data.insert(object.to_string(), records.into_iter().map(record).collect());
        data
    }

    #[test]
    fn valid_data_has_no_defects() {
        let data = set("Account", vec![valid("Name"), valid("Phone")]);
        assert!(validate(&data).is_empty());
    }

    #[test]
    fn empty_object_reports_once() {
        let mut data = set("Account", vec![]);
        data.insert("Contact".to_string(), vec![record(valid("Email"))]);

        let messages = validate_field_data(&data);
        assert_eq!(messages, vec!["No fields found for object 'Account'".to_string()]);
    }

    #[test]
    fn missing_keys_are_reported_together() {
        let mut broken = valid("Name");
        let map = broken.as_object_mut().unwrap();
        map.remove("unique");
        map.remove("updateable");

        let messages = validate_field_data(&set("Account", vec![valid("Id"), broken]));
        assert_eq!(
            messages,
            vec!["Object 'Account', field 2: Missing required fields: unique, updateable".to_string()]
        );
    }

    #[test]
    fn mistyped_values_each_report() {
        let mut broken = valid("Name");
        broken["name"] = json!(42);
        broken["can_migrate"] = json!("yes");

        let defects = validate(&set("Lead", vec![broken]));
        let kinds: Vec<_> = defects.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(kinds, vec![DefectKind::NameNotString, DefectKind::CanMigrateNotBoolean]);
        assert_eq!(defects[1].to_string(), "Object 'Lead', field 1: can_migrate must be a boolean");
    }

    #[test]
    fn missing_name_is_not_also_a_type_error() {
        let mut broken = valid("Name");
        broken.as_object_mut().unwrap().remove("name");

        let defects = validate(&set("Lead", vec![broken]));
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::MissingKeys(vec!["name"]));
    }

    #[test]
    fn picklist_entries_are_checked() {
        let mut picklist = valid("Rating");
        picklist["type"] = json!("picklist");
        picklist["picklist_values"] = json!([
            {"label": "Hot", "value": "Hot"},
            {"label": "Warm"},
            "Cold"
        ]);

        let messages = validate_field_data(&set("Lead", vec![picklist]));
        assert_eq!(
            messages,
            vec![
                "Object 'Lead', field 1, picklist value 2: Must have 'label' and 'value' keys".to_string(),
                "Object 'Lead', field 1, picklist value 3: Must have 'label' and 'value' keys".to_string(),
            ]
        );
    }

    #[test]
    fn picklist_values_must_be_a_list() {
        let mut picklist = valid("Rating");
        picklist["type"] = json!("picklist");
        picklist["picklist_values"] = json!({"label": "Hot", "value": "Hot"});

        let defects = validate(&set("Lead", vec![picklist]));
        assert_eq!(defects, vec![FieldDefect::field("Lead", 1, DefectKind::PicklistNotList)]);
    }

    #[test]
    fn empty_or_null_picklists_and_non_picklists_are_skipped() {
        let mut empty = valid("Rating");
        empty["type"] = json!("picklist");
        empty["picklist_values"] = json!([]);

        let mut null = valid("Tier");
        null["type"] = json!("picklist");
        null["picklist_values"] = Value::Null;

        let mut text = valid("Notes");
        text["picklist_values"] = json!("not a list");

        assert!(validate(&set("Lead", vec![empty, null, text])).is_empty());
    }
}
