//! Object describer abstraction
//!
//! The catalog never talks to the source CRM directly. It asks an
//! [`ObjectDescriber`] for an object's description and works from that.

use crate::error::DescribeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sf2hs_fields::{classify_all, FieldMetadata, FieldRecord};
use std::path::Path;

/// Describe result for one object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_plural: String,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
}

impl ObjectDescription {
    /// Create a description with no fields
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            label_plural: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// With a field appended
    #[must_use]
    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Field with the given API name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Object summary with classified fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub name: String,
    pub label: String,
    pub label_plural: String,
    pub key_prefix: Option<String>,
    pub createable: bool,
    pub updateable: bool,
    pub deletable: bool,
    pub fields: Vec<FieldRecord>,
}

impl From<&ObjectDescription> for ObjectMetadata {
    fn from(description: &ObjectDescription) -> Self {
        Self {
            name: description.name.clone(),
            label: description.label.clone(),
            label_plural: description.label_plural.clone(),
            key_prefix: description.key_prefix.clone(),
            createable: description.createable,
            updateable: description.updateable,
            deletable: description.deletable,
            fields: classify_all(&description.fields),
        }
    }
}

/// Source of object descriptions
///
/// Implement this trait to connect the catalog to a CRM client.
#[async_trait::async_trait]
pub trait ObjectDescriber: Send + Sync {
    /// Describe an object by API name
    async fn describe_object(&self, name: &str) -> Result<ObjectDescription, DescribeError>;

    /// Whether the object exists
    ///
    /// Any describe failure counts as absence.
    async fn object_exists(&self, name: &str) -> bool {
        self.describe_object(name).await.is_ok()
    }
}

/// In-memory describer
///
/// Serves descriptions from a map, typically loaded from a JSON document of
/// the form `{ "Account": { ...describe... }, "Contact": { ... } }`.
#[derive(Debug, Clone, Default)]
pub struct StaticDescriber {
    objects: IndexMap<String, ObjectDescription>,
}

impl StaticDescriber {
    /// Create an empty describer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description under its own name
    #[must_use]
    pub fn with_object(mut self, description: ObjectDescription) -> Self {
        self.insert(description);
        self
    }

    /// Register a description, replacing any with the same name
    pub fn insert(&mut self, description: ObjectDescription) {
        self.objects.insert(description.name.clone(), description);
    }

    /// Build from a describe document
    ///
    /// A description with an empty `name` takes its key.
    ///
    /// # Errors
    /// `DescribeError::Malformed` if the document is not an object of
    /// describe results.
    pub fn from_value(document: Value) -> Result<Self, DescribeError> {
        let objects: IndexMap<String, ObjectDescription> =
            serde_json::from_value(document).map_err(|e| DescribeError::Malformed(e.to_string()))?;

        let objects = objects
            .into_iter()
            .map(|(key, mut description)| {
                if description.name.is_empty() {
                    description.name.clone_from(&key);
                }
                (key, description)
            })
            .collect();

        Ok(Self { objects })
    }

    /// Load a describe document from disk
    ///
    /// # Errors
    /// `DescribeError::Unavailable` if the file cannot be read,
    /// `DescribeError::Malformed` if it is not a describe document.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DescribeError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DescribeError::Unavailable(format!("{}: {e}", path.display())))?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(|e| DescribeError::Malformed(e.to_string()))?;

        let describer = Self::from_value(document)?;
        tracing::debug!(
            "Loaded {} object description(s) from {}",
            describer.objects.len(),
            path.display()
        );
        Ok(describer)
    }

    /// Names of the objects this describer knows, in load order
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

#[async_trait::async_trait]
impl ObjectDescriber for StaticDescriber {
    async fn describe_object(&self, name: &str) -> Result<ObjectDescription, DescribeError> {
        self.objects
            .get(name)
            .cloned()
            .ok_or_else(|| DescribeError::NotFound(name.to_string()))
    }

    async fn object_exists(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }
}
