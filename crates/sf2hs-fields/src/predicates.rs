//! Field predicates
//!
//! Stateless boolean checks over a single [`FieldMetadata`]. Each predicate
//! looks at one aspect of the field; ordering between them is the
//! classifier's concern.

use crate::metadata::{FieldMetadata, ADDRESS_TYPE, REFERENCE_TYPE};

/// Audit fields every source object carries and the target already maintains
pub const SYSTEM_FIELDS: [&str; 7] = [
    "CreatedById",
    "LastModifiedById",
    "CreatedDate",
    "LastModifiedDate",
    "SystemModstamp",
    "LastViewedDate",
    "LastReferencedDate",
];

/// Object type that user references point at
pub const USER_OBJECT: &str = "User";

/// Field is one of the fixed audit fields
#[inline]
#[must_use]
pub fn is_system_field(field: &FieldMetadata) -> bool {
    SYSTEM_FIELDS.contains(&field.name.as_str())
}

/// Field is a formula / derived field
#[inline]
#[must_use]
pub fn is_formula_field(field: &FieldMetadata) -> bool {
    field.calculated
}

#[inline]
#[must_use]
pub fn is_reference_field(field: &FieldMetadata) -> bool {
    field.field_type == REFERENCE_TYPE
}

/// Reference field whose only target is the user object
///
/// Exact match: polymorphic references such as `["User", "Group"]` are not
/// user references.
#[inline]
#[must_use]
pub fn is_user_reference(field: &FieldMetadata) -> bool {
    is_reference_field(field) && field.reference_to.len() == 1 && field.reference_to[0] == USER_OBJECT
}

#[inline]
#[must_use]
pub fn is_address_field(field: &FieldMetadata) -> bool {
    field.field_type == ADDRESS_TYPE
}
