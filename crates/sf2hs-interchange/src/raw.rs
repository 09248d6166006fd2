//! Loosely-typed field sets
//!
//! Decoders produce [`RawFieldSet`]s: every record is kept as a JSON map so
//! missing keys and mistyped values survive long enough for the validator to
//! report them. Only validated data is lifted into typed [`FieldRecord`]s.

use crate::error::{EncodeError, LoadError};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use sf2hs_fields::{FieldRecord, ObjectFieldSet};

/// One persisted record, keys as found in the input
pub type RawRecord = Map<String, Value>;

/// Object name → raw records, in input order
pub type RawFieldSet = IndexMap<String, Vec<RawRecord>>;

/// Lift raw records into typed records
///
/// # Errors
/// `LoadError::Shape` naming the first record (1-based) whose values do not
/// fit [`FieldRecord`].
pub fn into_field_set(raw: RawFieldSet) -> Result<ObjectFieldSet, LoadError> {
    let mut set = ObjectFieldSet::with_capacity(raw.len());
    for (object, records) in raw {
        let mut typed = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            let field = serde_json::from_value::<FieldRecord>(Value::Object(record)).map_err(|source| {
                LoadError::Shape {
                    object: object.clone(),
                    field: i + 1,
                    source,
                }
            })?;
            typed.push(field);
        }
        set.insert(object, typed);
    }
    Ok(set)
}

/// Lower typed records into raw maps, one map per record
///
/// # Errors
/// `EncodeError::Serialization` if a record does not serialize to a JSON
/// object.
pub fn to_raw(set: &ObjectFieldSet) -> Result<RawFieldSet, EncodeError> {
    let mut raw = RawFieldSet::with_capacity(set.len());
    for (object, records) in set {
        let lowered = records
            .iter()
            .map(|record| record_to_raw(object, record))
            .collect::<Result<Vec<_>, _>>()?;
        raw.insert(object.clone(), lowered);
    }
    Ok(raw)
}

fn record_to_raw(object: &str, record: &FieldRecord) -> Result<RawRecord, EncodeError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(EncodeError::Serialization(format!(
            "object '{object}', field '{}': expected a JSON object, got {other}",
            record.name
        ))),
        Err(e) => Err(EncodeError::Serialization(format!(
            "object '{object}', field '{}': {e}",
            record.name
        ))),
    }
}
