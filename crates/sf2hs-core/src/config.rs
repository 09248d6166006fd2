//! Migration configuration
//!
//! YAML document naming the source instance and, optionally, which objects
//! and fields to migrate:
//!
//! ```yaml
//! salesforce:
//!   instance_url: https://login.salesforce.com
//!   api_version: "57.0"
//! objects:
//!   - name: Account
//!     fields:
//!       - name: Email
//!         hubspot_property: email
//!       - name: Phone
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default login endpoint
pub const DEFAULT_INSTANCE_URL: &str = "https://login.salesforce.com";

/// Default API version
pub const DEFAULT_API_VERSION: &str = "57.0";

/// Source instance settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceSettings {
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    /// Quoted in YAML (`"57.0"`); a bare number is rejected
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_instance_url() -> String {
    DEFAULT_INSTANCE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for SalesforceSettings {
    fn default() -> Self {
        Self {
            instance_url: default_instance_url(),
            api_version: default_api_version(),
        }
    }
}

/// One configured field, optionally renamed in the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubspot_property: Option<String>,
}

impl FieldMapping {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hubspot_property: None,
        }
    }

    /// With target property name
    #[inline]
    #[must_use]
    pub fn to_property(mut self, property: impl Into<String>) -> Self {
        self.hubspot_property = Some(property.into());
        self
    }
}

/// Per-object configuration
///
/// Without `fields` every field of the object is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldMapping>>,
}

impl ObjectConfig {
    /// Configuration that keeps every field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: None,
        }
    }

    /// Add a field to the allow-list
    #[must_use]
    pub fn with_field(mut self, field: FieldMapping) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(field);
        self
    }

    /// Configured fields, empty when none are listed
    #[must_use]
    pub fn field_mappings(&self) -> &[FieldMapping] {
        self.fields.as_deref().unwrap_or(&[])
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(default)]
    pub salesforce: SalesforceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<ObjectConfig>>,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be opened, `ConfigError::Parse`
    /// if it is not a valid configuration document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        tracing::debug!(
            "Loaded configuration from {} ({} object(s))",
            path.display(),
            config.object_names().len()
        );
        Ok(config)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    /// `ConfigError::Parse` if the text is not a valid configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// With an object configuration appended
    #[must_use]
    pub fn with_object(mut self, object: ObjectConfig) -> Self {
        self.objects.get_or_insert_with(Vec::new).push(object);
        self
    }

    /// Whether the document has an `objects` section, even an empty one
    #[inline]
    #[must_use]
    pub fn has_objects(&self) -> bool {
        self.objects.is_some()
    }

    /// Configuration for an object, if listed
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ObjectConfig> {
        self.objects.as_deref()?.iter().find(|o| o.name == name)
    }

    /// Configured object names, in document order
    #[must_use]
    pub fn object_names(&self) -> Vec<&str> {
        self.objects
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|o| o.name.as_str())
            .collect()
    }
}
