//! Mapping filter
//!
//! Reduces a field list to the fields an object configuration allows and
//! annotates each kept field with its target property.

use crate::config::ObjectConfig;
use sf2hs_fields::{FieldRecord, ObjectFieldSet};
use std::collections::HashMap;

/// Keep only configured fields, in input order
///
/// An object configuration without fields (absent or empty) keeps every
/// field unchanged. Configured fields missing from `fields` are ignored.
/// When a field name is configured twice the later entry wins.
#[must_use]
pub fn filter_fields(fields: &[FieldRecord], object_config: &ObjectConfig) -> Vec<FieldRecord> {
    let mappings = object_config.field_mappings();
    if mappings.is_empty() {
        return fields.to_vec();
    }

    let lookup: HashMap<&str, Option<&str>> = mappings
        .iter()
        .map(|m| (m.name.as_str(), m.hubspot_property.as_deref()))
        .collect();

    let kept: Vec<FieldRecord> = fields
        .iter()
        .filter_map(|record| {
            let target = lookup.get(record.name.as_str())?;
            let kept = match target {
                Some(property) if !property.is_empty() => record.clone().with_hubspot_property(*property),
                _ => record.clone(),
            };
            Some(kept)
        })
        .collect();

    tracing::debug!(
        "Mapping for {} kept {} of {} field(s)",
        object_config.name,
        kept.len(),
        fields.len()
    );
    kept
}

/// Apply [`filter_fields`] to every object of a set
///
/// Objects without a configuration are filtered with an empty one, which
/// keeps all their fields.
#[must_use]
pub fn filter_field_set<'a, F>(set: &ObjectFieldSet, config_for: F) -> ObjectFieldSet
where
    F: Fn(&str) -> Option<&'a ObjectConfig>,
{
    set.iter()
        .map(|(object, records)| {
            let filtered = match config_for(object) {
                Some(object_config) => filter_fields(records, object_config),
                None => records.clone(),
            };
            (object.clone(), filtered)
        })
        .collect()
}
