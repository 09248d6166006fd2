//! Field records
//!
//! A [`FieldRecord`] is the projected metadata of one field with its
//! [`MigrationVerdict`] flattened in. It is the unit every downstream stage
//! (codecs, validator, mapping filter) works with and carries no link back to
//! the connection that produced it.

use crate::classify::{classify, MigrationType, MigrationVerdict};
use crate::metadata::{FieldMetadata, PicklistValue, PICKLIST_TYPE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Object name → classified fields, in field order
///
/// Object order follows insertion; formats that cannot keep it (sheet
/// enumeration in workbooks) return objects in their own order.
pub type ObjectFieldSet = IndexMap<String, Vec<FieldRecord>>;

/// Keys a persisted record must carry to be usable
pub const REQUIRED_KEYS: [&str; 8] = [
    "name",
    "label",
    "type",
    "required",
    "unique",
    "updateable",
    "can_migrate",
    "migration_type",
];

/// Normalized, classified field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    pub required: bool,
    pub unique: bool,
    pub updateable: bool,
    #[serde(default)]
    pub createable: bool,

    /// `None` unless the field is a picklist; an empty picklist is `Some(vec![])`
    #[serde(default)]
    pub picklist_values: Option<Vec<PicklistValue>>,

    pub can_migrate: bool,
    pub migration_type: MigrationType,
    #[serde(default)]
    pub migration_notes: Vec<String>,

    /// Target property name, attached by the mapping filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubspot_property: Option<String>,
}

impl FieldRecord {
    /// Project metadata and flatten a verdict into one record
    #[must_use]
    pub fn assemble(field: &FieldMetadata, verdict: MigrationVerdict) -> Self {
        let picklist_values = (field.field_type == PICKLIST_TYPE).then(|| field.picklist_values.clone());

        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            field_type: field.field_type.clone(),
            length: field.length,
            precision: field.precision,
            scale: field.scale,
            required: field.is_required(),
            unique: field.unique,
            updateable: field.updateable,
            createable: field.createable,
            picklist_values,
            can_migrate: verdict.can_migrate,
            migration_type: verdict.migration_type,
            migration_notes: verdict.notes,
            hubspot_property: None,
        }
    }

    /// Classify and assemble in one step
    #[inline]
    #[must_use]
    pub fn from_metadata(field: &FieldMetadata) -> Self {
        Self::assemble(field, classify(field))
    }

    /// The verdict fields of this record
    #[must_use]
    pub fn verdict(&self) -> MigrationVerdict {
        MigrationVerdict {
            can_migrate: self.can_migrate,
            migration_type: self.migration_type,
            notes: self.migration_notes.clone(),
        }
    }

    /// With target property name
    #[inline]
    #[must_use]
    pub fn with_hubspot_property(mut self, property: impl Into<String>) -> Self {
        self.hubspot_property = Some(property.into());
        self
    }
}

/// Classify every field of a describe result, keeping its order
#[must_use]
pub fn classify_all(fields: &[FieldMetadata]) -> Vec<FieldRecord> {
    fields.iter().map(FieldRecord::from_metadata).collect()
}
