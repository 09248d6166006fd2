//! Migration classification
//!
//! Applies the predicates in a fixed priority order. The first category that
//! matches decides the verdict; a field never falls into two categories.
//!
//! | priority | category        | can migrate | type             |
//! |----------|-----------------|-------------|------------------|
//! | 1        | system field    | no          | `direct`         |
//! | 2        | formula field   | no          | `direct`         |
//! | 3        | user reference  | yes         | `user_reference` |
//! | 3        | other reference | yes         | `association`    |
//! | 4        | address field   | no          | `direct`         |
//! | 5        | anything else   | yes         | `direct`         |

use crate::metadata::FieldMetadata;
use crate::predicates::{
    is_address_field, is_formula_field, is_reference_field, is_system_field, is_user_reference,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Note attached to system fields
pub const SYSTEM_FIELD_NOTE: &str = "System field - exists in HubSpot";
/// Note attached to formula fields
pub const FORMULA_FIELD_NOTE: &str = "Formula field - requires custom implementation";
/// Note attached to user references
pub const USER_REFERENCE_NOTE: &str = "User reference field - will be mapped to HubSpot user field";
/// Note attached to non-user references
pub const REFERENCE_FIELD_NOTE: &str = "Reference field - usually created as association";
/// Note attached to compound address fields
pub const ADDRESS_FIELD_NOTE: &str = "Address field - compound field type";

/// How a field lands in the target property model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationType {
    /// Plain property, copied as-is
    #[default]
    Direct,
    /// Mapped onto the target's user/owner property
    UserReference,
    /// Becomes a relationship between records
    Association,
}

impl MigrationType {
    /// Wire tag
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::UserReference => "user_reference",
            Self::Association => "association",
        }
    }
}

impl fmt::Display for MigrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown migration type tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown migration type: '{0}'")]
pub struct ParseMigrationTypeError(pub String);

impl FromStr for MigrationType {
    type Err = ParseMigrationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "user_reference" => Ok(Self::UserReference),
            "association" => Ok(Self::Association),
            other => Err(ParseMigrationTypeError(other.to_string())),
        }
    }
}

/// Which predicate decided a field's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    System,
    Formula,
    UserReference,
    Reference,
    Address,
    /// No predicate matched
    Plain,
}

/// Classifier output for one field
///
/// `notes` is non-empty whenever the field cannot migrate or migrates as
/// anything other than [`MigrationType::Direct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationVerdict {
    pub can_migrate: bool,
    pub migration_type: MigrationType,
    pub notes: Vec<String>,
}

impl MigrationVerdict {
    /// Migrates directly with nothing to report
    #[inline]
    #[must_use]
    pub fn direct() -> Self {
        Self {
            can_migrate: true,
            migration_type: MigrationType::Direct,
            notes: Vec::new(),
        }
    }

    /// Cannot migrate, for the given reason
    #[inline]
    #[must_use]
    pub fn blocked(note: impl Into<String>) -> Self {
        Self {
            can_migrate: false,
            migration_type: MigrationType::Direct,
            notes: vec![note.into()],
        }
    }

    /// Migrates with a non-direct mapping
    #[inline]
    #[must_use]
    pub fn mapped(migration_type: MigrationType, note: impl Into<String>) -> Self {
        Self {
            can_migrate: true,
            migration_type,
            notes: vec![note.into()],
        }
    }
}

impl Default for MigrationVerdict {
    fn default() -> Self {
        Self::direct()
    }
}

impl FieldCategory {
    /// Verdict for fields of this category
    #[must_use]
    pub fn verdict(self) -> MigrationVerdict {
        match self {
            Self::System => MigrationVerdict::blocked(SYSTEM_FIELD_NOTE),
            Self::Formula => MigrationVerdict::blocked(FORMULA_FIELD_NOTE),
            Self::UserReference => {
                MigrationVerdict::mapped(MigrationType::UserReference, USER_REFERENCE_NOTE)
            }
            Self::Reference => MigrationVerdict::mapped(MigrationType::Association, REFERENCE_FIELD_NOTE),
            Self::Address => MigrationVerdict::blocked(ADDRESS_FIELD_NOTE),
            Self::Plain => MigrationVerdict::direct(),
        }
    }
}

/// Find the first matching category in priority order
#[must_use]
pub fn categorize(field: &FieldMetadata) -> FieldCategory {
    if is_system_field(field) {
        FieldCategory::System
    } else if is_formula_field(field) {
        FieldCategory::Formula
    } else if is_reference_field(field) {
        if is_user_reference(field) {
            FieldCategory::UserReference
        } else {
            FieldCategory::Reference
        }
    } else if is_address_field(field) {
        FieldCategory::Address
    } else {
        FieldCategory::Plain
    }
}

/// Decide whether and how a field migrates
///
/// Total over any field: unknown type tags fall through to a direct,
/// migratable verdict.
#[inline]
#[must_use]
pub fn classify(field: &FieldMetadata) -> MigrationVerdict {
    categorize(field).verdict()
}
