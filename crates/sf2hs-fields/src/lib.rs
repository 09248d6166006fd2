//! sf2hs Fields
//!
//! Migration classification for source CRM field metadata.
//!
//! # Core Concepts
//!
//! - [`FieldMetadata`]: one field as reported by the source describe call
//! - [`predicates`]: stateless checks (system, formula, reference, ...)
//! - [`classify`]: priority-ordered decision producing a [`MigrationVerdict`]
//! - [`FieldRecord`]: metadata and verdict flattened into one exchangeable record
//! - [`ObjectFieldSet`]: object name → ordered field records
//!
//! # Example
//!
//! ```rust
//! use sf2hs_fields::{classify, FieldMetadata, FieldRecord, MigrationType};
//!
//! let owner = FieldMetadata::new("OwnerId", "reference").with_reference("User");
//! let verdict = classify(&owner);
//! assert_eq!(verdict.migration_type, MigrationType::UserReference);
//!
//! let record = FieldRecord::assemble(&owner, verdict);
//! assert!(record.can_migrate);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod classify;
pub mod metadata;
pub mod predicates;
pub mod record;

// Re-exports
pub use classify::{
    categorize, classify, FieldCategory, MigrationType, MigrationVerdict, ParseMigrationTypeError,
};
pub use metadata::{FieldMetadata, PicklistValue};
pub use record::{classify_all, FieldRecord, ObjectFieldSet, REQUIRED_KEYS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
