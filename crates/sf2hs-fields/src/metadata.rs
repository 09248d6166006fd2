//! Source field metadata
//!
//! [`FieldMetadata`] mirrors one entry of the `fields` array returned by the
//! source CRM's describe call. It deserializes straight from that JSON
//! (camelCase keys) and defaults every optional key, so the classifier is
//! total over whatever the describer hands it.

use serde::{Deserialize, Serialize};

/// Field type tag for lookup/master-detail fields
pub const REFERENCE_TYPE: &str = "reference";

/// Field type tag for compound address fields
pub const ADDRESS_TYPE: &str = "address";

/// Field type tag for single-select picklists
pub const PICKLIST_TYPE: &str = "picklist";

/// One `{label, value}` entry of a picklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistValue {
    /// Display label
    pub label: String,
    /// Stored API value
    pub value: String,
}

impl PicklistValue {
    /// Create a picklist entry
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Metadata for a single field of a source object
///
/// Read-only input to the classifier. `required` is not stored: it is derived
/// from `nillable` via [`FieldMetadata::is_required`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// API name, unique within the object
    pub name: String,

    /// Display label
    #[serde(default)]
    pub label: String,

    /// Field type tag (`string`, `picklist`, `reference`, `address`, ...)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Whether the field accepts null
    #[serde(default = "default_nillable")]
    pub nillable: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub updateable: bool,

    #[serde(default)]
    pub createable: bool,

    /// Formula / derived field marker
    #[serde(default)]
    pub calculated: bool,

    /// Target object types, populated for reference fields
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference_to: Vec<String>,

    /// Allowed values, populated for picklist fields
    #[serde(default, deserialize_with = "null_as_default")]
    pub picklist_values: Vec<PicklistValue>,

    #[serde(default)]
    pub length: Option<u32>,

    #[serde(default)]
    pub precision: Option<u32>,

    #[serde(default)]
    pub scale: Option<u32>,
}

fn default_nillable() -> bool {
    true
}

/// Describe payloads send `null` for empty arrays on some field types
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FieldMetadata {
    /// Create metadata with the given name and type; every flag starts at its
    /// describe default (nillable, nothing else set)
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            field_type: field_type.into(),
            nillable: true,
            unique: false,
            updateable: false,
            createable: false,
            calculated: false,
            reference_to: Vec::new(),
            picklist_values: Vec::new(),
            length: None,
            precision: None,
            scale: None,
        }
    }

    /// With display label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Mark the field as both createable and updateable
    #[inline]
    #[must_use]
    pub fn writable(mut self) -> Self {
        self.createable = true;
        self.updateable = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_calculated(mut self, calculated: bool) -> Self {
        self.calculated = calculated;
        self
    }

    /// Append a reference target
    #[inline]
    #[must_use]
    pub fn with_reference(mut self, target: impl Into<String>) -> Self {
        self.reference_to.push(target.into());
        self
    }

    /// Append a picklist value
    #[inline]
    #[must_use]
    pub fn with_picklist_value(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.picklist_values.push(PicklistValue::new(label, value));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// With numeric precision and scale
    #[inline]
    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// A field is required when it cannot be null
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.nillable
    }
}
