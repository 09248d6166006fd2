//! sf2hs Core
//!
//! Configuration, mapping filter and the field catalog pipeline that turns
//! object descriptions into classified, filtered field sets.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sf2hs_core::prelude::*;
//!
//! let describer = StaticDescriber::load("describe.json").await?;
//! let catalog = FieldCatalog::new(describer);
//!
//! let request = CollectRequest {
//!     config: MigrationConfig::load("config.yaml")?,
//!     ..CollectRequest::default()
//! };
//! catalog.export(&request, "salesforce_fields.xlsx", Format::Excel).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod config;
pub mod describe;
pub mod error;
pub mod mapping;

pub use catalog::{CollectRequest, ConfigIssue, FieldCatalog, SyncMode, SyncPlan, SyncRequest};
pub use config::{FieldMapping, MigrationConfig, ObjectConfig, SalesforceSettings};
pub use describe::{ObjectDescriber, ObjectDescription, ObjectMetadata, StaticDescriber};
pub use error::{ConfigError, CoreError, CoreResult, DescribeError};
pub use mapping::{filter_field_set, filter_fields};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{CollectRequest, ConfigIssue, FieldCatalog, SyncMode, SyncPlan, SyncRequest};
    pub use crate::config::{FieldMapping, MigrationConfig, ObjectConfig};
    pub use crate::describe::{ObjectDescriber, ObjectDescription, StaticDescriber};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::mapping::filter_fields;
    pub use sf2hs_fields::{FieldRecord, MigrationType, ObjectFieldSet};
    pub use sf2hs_interchange::Format;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
