//! Field catalog pipeline
//!
//! Drives an [`ObjectDescriber`] through the classifier, mapping filter and
//! interchange layer:
//!
//! - **list**: describe and classify one object
//! - **collect**: classify a set of objects, optionally filtered by config
//! - **check**: report configured objects and fields the source lacks
//! - **plan**: decide what a sync would write and produce the field set

use crate::config::{MigrationConfig, ObjectConfig};
use crate::describe::{ObjectDescriber, ObjectMetadata};
use crate::error::{CoreError, CoreResult, DescribeError};
use crate::mapping::filter_fields;
use sf2hs_fields::{classify_all, FieldRecord, ObjectFieldSet};
use sf2hs_interchange::{load, save, Format};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which objects to collect and how to filter them
#[derive(Debug, Clone, Default)]
pub struct CollectRequest {
    /// Single object to collect; takes precedence over the config's objects
    pub object: Option<String>,
    pub config: MigrationConfig,
    /// Keep fields that cannot migrate
    pub show_all: bool,
}

/// Inputs of a sync plan
#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub config: MigrationConfig,
    pub object: Option<String>,
    /// Previously saved field file for transformed syncs
    pub fields_file: Option<PathBuf>,
    pub format: Format,
    /// Sync the object's fields straight from the source
    pub direct: bool,
}

/// How a sync plan was built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Objects and fields from the configuration
    ConfigBased,
    /// One object, all fields, straight from the source
    Direct,
    /// Fields from a saved, possibly hand-edited file
    Transformed,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConfigBased => "Config-based",
            Self::Direct => "Direct",
            Self::Transformed => "Transformed",
        })
    }
}

/// Field set a sync would write, and how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    pub mode: SyncMode,
    pub fields: ObjectFieldSet,
}

impl SyncPlan {
    /// Total number of fields across objects
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }
}

/// Configuration entry the source cannot satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    MissingObject(String),
    MissingField { object: String, field: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingObject(name) => write!(f, "Object '{name}' does not exist in Salesforce"),
            Self::MissingField { object, field } => {
                write!(f, "Field '{field}' does not exist in object '{object}'")
            }
        }
    }
}

/// Field catalog over a describer
#[derive(Debug, Clone)]
pub struct FieldCatalog<D> {
    describer: D,
}

impl<D: ObjectDescriber> FieldCatalog<D> {
    /// Create a catalog
    pub fn new(describer: D) -> Self {
        Self { describer }
    }

    /// Underlying describer
    pub fn describer(&self) -> &D {
        &self.describer
    }

    /// Describe an object and classify its fields
    ///
    /// # Errors
    /// `CoreError::ObjectNotFound` if the source has no such object.
    pub async fn object_metadata(&self, name: &str) -> CoreResult<ObjectMetadata> {
        let description = self
            .describer
            .describe_object(name)
            .await
            .map_err(CoreError::from_describe)?;
        Ok(ObjectMetadata::from(&description))
    }

    /// Classified fields of one object, in describe order
    ///
    /// # Errors
    /// `CoreError::ObjectNotFound` if the source has no such object.
    pub async fn object_fields(&self, name: &str) -> CoreResult<Vec<FieldRecord>> {
        let description = self
            .describer
            .describe_object(name)
            .await
            .map_err(CoreError::from_describe)?;
        let records = classify_all(&description.fields);
        tracing::debug!("Classified {} field(s) of {name}", records.len());
        Ok(records)
    }

    /// Classified fields of one object, dropping non-migratable ones unless
    /// `show_all` is set
    ///
    /// # Errors
    /// `CoreError::ObjectNotFound` if the source has no such object.
    pub async fn list_fields(&self, name: &str, show_all: bool) -> CoreResult<Vec<FieldRecord>> {
        let records = self.object_fields(name).await?;
        Ok(retain_migratable(records, show_all))
    }

    /// Classify every requested object into a field set
    ///
    /// Objects the source does not have are skipped. When the configuration
    /// lists objects, every collected object is passed through its mapping
    /// filter, including an explicitly named one.
    ///
    /// # Errors
    /// `CoreError::MissingInput` if neither an object nor configured objects
    /// are given; describer failures other than not-found.
    pub async fn collect(&self, request: &CollectRequest) -> CoreResult<ObjectFieldSet> {
        let objects: Vec<String> = match (&request.object, &request.config.objects) {
            (Some(object), _) => vec![object.clone()],
            (None, Some(configured)) => configured.iter().map(|o| o.name.clone()).collect(),
            (None, None) => {
                return Err(CoreError::MissingInput(
                    "an object name or a configuration with objects is required".to_string(),
                ))
            }
        };

        let mut set = ObjectFieldSet::new();
        for name in objects {
            let Some(records) = self.existing_object_fields(&name).await? else {
                continue;
            };

            let mut records = retain_migratable(records, request.show_all);
            if request.config.has_objects() {
                let fallback = ObjectConfig::new(name.as_str());
                let object_config = request.config.object(&name).unwrap_or(&fallback);
                records = filter_fields(&records, object_config);
            }

            tracing::info!("Collected {} field(s) from {name}", records.len());
            set.insert(name, records);
        }

        Ok(set)
    }

    /// Collect and write the result to a file
    ///
    /// # Errors
    /// Any [`FieldCatalog::collect`] error, or `CoreError::Encode` if the
    /// file cannot be written.
    pub async fn export(
        &self,
        request: &CollectRequest,
        path: impl AsRef<Path> + Send,
        format: Format,
    ) -> CoreResult<ObjectFieldSet> {
        let set = self.collect(request).await?;
        save(&set, path, format)?;
        Ok(set)
    }

    /// Report configured objects and fields that the source lacks
    ///
    /// # Errors
    /// Describer failures other than not-found.
    pub async fn check_config(&self, config: &MigrationConfig) -> CoreResult<Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        for object_config in config.objects.as_deref().unwrap_or(&[]) {
            let name = &object_config.name;
            let mappings = object_config.field_mappings();

            if mappings.is_empty() {
                if !self.describer.object_exists(name).await {
                    issues.push(ConfigIssue::MissingObject(name.clone()));
                }
                continue;
            }

            let description = match self.describer.describe_object(name).await {
                Ok(description) => description,
                Err(DescribeError::NotFound(_)) => {
                    issues.push(ConfigIssue::MissingObject(name.clone()));
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            issues.extend(
                mappings
                    .iter()
                    .filter(|m| description.field(&m.name).is_none())
                    .map(|m| ConfigIssue::MissingField {
                        object: name.clone(),
                        field: m.name.clone(),
                    }),
            );
        }

        if !issues.is_empty() {
            tracing::warn!("Configuration has {} issue(s)", issues.len());
        }
        Ok(issues)
    }

    /// Build the field set a sync would write
    ///
    /// Modes are tried in order: configured objects, a direct object sync,
    /// then a saved fields file.
    ///
    /// # Errors
    /// `CoreError::MissingInput` if the chosen mode lacks its input,
    /// `CoreError::ObjectNotFound` for a direct sync of an unknown object,
    /// `CoreError::Load` if the fields file is unreadable or invalid.
    pub async fn plan_sync(&self, request: &SyncRequest) -> CoreResult<SyncPlan> {
        if request.config.has_objects() {
            let collect = CollectRequest {
                object: None,
                config: request.config.clone(),
                show_all: true,
            };
            let fields = self.collect(&collect).await?;
            return Ok(sync_plan(SyncMode::ConfigBased, fields));
        }

        if request.direct {
            let object = request
                .object
                .as_deref()
                .ok_or_else(|| CoreError::MissingInput("direct sync requires an object name".to_string()))?;
            let mut fields = ObjectFieldSet::new();
            fields.insert(object.to_string(), self.object_fields(object).await?);
            return Ok(sync_plan(SyncMode::Direct, fields));
        }

        let path = request
            .fields_file
            .as_deref()
            .ok_or_else(|| CoreError::MissingInput("transformed sync requires a fields file".to_string()))?;
        let fields = load(path, request.format)?;
        Ok(sync_plan(SyncMode::Transformed, fields))
    }

    async fn existing_object_fields(&self, name: &str) -> CoreResult<Option<Vec<FieldRecord>>> {
        match self.object_fields(name).await {
            Ok(records) => Ok(Some(records)),
            Err(CoreError::ObjectNotFound(_)) => {
                tracing::warn!("Object {name} does not exist in Salesforce, skipping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn sync_plan(mode: SyncMode, fields: ObjectFieldSet) -> SyncPlan {
    let plan = SyncPlan { mode, fields };
    tracing::info!(
        "{mode} sync plan: {} object(s), {} field(s)",
        plan.fields.len(),
        plan.field_count()
    );
    plan
}

fn retain_migratable(mut records: Vec<FieldRecord>, show_all: bool) -> Vec<FieldRecord> {
    if !show_all {
        records.retain(|r| r.can_migrate);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldMapping;
    use crate::describe::{ObjectDescription, StaticDescriber};
    use pretty_assertions::assert_eq;
    use sf2hs_fields::FieldMetadata;

    fn catalog() -> FieldCatalog<StaticDescriber> {
        let describer = StaticDescriber::new().with_object(
            ObjectDescription::new("Lead")
                .with_field(FieldMetadata::new("CreatedDate", "datetime"))
                .with_field(FieldMetadata::new("Email", "email"))
                .with_field(FieldMetadata::new("Phone", "phone")),
        );
        FieldCatalog::new(describer)
    }

    fn names(records: &[FieldRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn list_hides_non_migratable_by_default() {
        let catalog = catalog();
        assert_eq!(names(&catalog.list_fields("Lead", true).await.unwrap()), vec!["CreatedDate", "Email", "Phone"]);
        assert_eq!(names(&catalog.list_fields("Lead", false).await.unwrap()), vec!["Email", "Phone"]);
    }

    #[tokio::test]
    async fn unknown_object_is_reported() {
        let err = catalog().object_fields("Widget__c").await.unwrap_err();
        assert!(matches!(err, CoreError::ObjectNotFound(name) if name == "Widget__c"));
    }

    #[tokio::test]
    async fn collect_without_input_fails() {
        let err = catalog().collect(&CollectRequest::default()).await.unwrap_err();
        assert!(matches!(err, CoreError::MissingInput(_)));
    }

    #[tokio::test]
    async fn collect_skips_missing_configured_objects() {
        let config = MigrationConfig::new()
            .with_object(ObjectConfig::new("Widget__c"))
            .with_object(ObjectConfig::new("Lead").with_field(FieldMapping::new("Email").to_property("email")));
        let request = CollectRequest {
            object: None,
            config,
            show_all: true,
        };

        let set = catalog().collect(&request).await.unwrap();
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["Lead"]);
        assert_eq!(names(&set["Lead"]), vec!["Email"]);
        assert_eq!(set["Lead"][0].hubspot_property.as_deref(), Some("email"));
    }

    #[tokio::test]
    async fn explicit_object_still_uses_config_filter() {
        let request = CollectRequest {
            object: Some("Lead".to_string()),
            config: MigrationConfig::new()
                .with_object(ObjectConfig::new("Lead").with_field(FieldMapping::new("Email"))),
            show_all: false,
        };

        let set = catalog().collect(&request).await.unwrap();
        assert_eq!(names(&set["Lead"]), vec!["Email"]);
    }

    #[tokio::test]
    async fn explicit_object_without_config_keeps_migratable_fields() {
        let request = CollectRequest {
            object: Some("Lead".to_string()),
            ..CollectRequest::default()
        };

        let set = catalog().collect(&request).await.unwrap();
        assert_eq!(names(&set["Lead"]), vec!["Email", "Phone"]);
    }

    #[tokio::test]
    async fn check_config_lists_issues() {
        let config = MigrationConfig::new()
            .with_object(ObjectConfig::new("Widget__c"))
            .with_object(
                ObjectConfig::new("Lead")
                    .with_field(FieldMapping::new("Email"))
                    .with_field(FieldMapping::new("Fax")),
            );

        let issues = catalog().check_config(&config).await.unwrap();
        assert_eq!(
            issues.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "Object 'Widget__c' does not exist in Salesforce".to_string(),
                "Field 'Fax' does not exist in object 'Lead'".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn direct_sync_needs_an_existing_object() {
        let catalog = catalog();
        let mut request = SyncRequest {
            direct: true,
            ..SyncRequest::default()
        };
        assert!(matches!(catalog.plan_sync(&request).await, Err(CoreError::MissingInput(_))));

        request.object = Some("Widget__c".to_string());
        assert!(matches!(catalog.plan_sync(&request).await, Err(CoreError::ObjectNotFound(_))));

        request.object = Some("Lead".to_string());
        let plan = catalog.plan_sync(&request).await.unwrap();
        assert_eq!(plan.mode, SyncMode::Direct);
        assert_eq!(plan.field_count(), 3);
    }

    #[tokio::test]
    async fn transformed_sync_needs_a_fields_file() {
        let err = catalog().plan_sync(&SyncRequest::default()).await.unwrap_err();
        assert!(matches!(err, CoreError::MissingInput(_)));
    }

    #[test]
    fn sync_mode_labels() {
        assert_eq!(SyncMode::ConfigBased.to_string(), "Config-based");
        assert_eq!(SyncMode::Direct.to_string(), "Direct");
        assert_eq!(SyncMode::Transformed.to_string(), "Transformed");
    }
}
