//! sf2hs Interchange
//!
//! The boundary between classified field sets and the files they are kept in.
//!
//! # Core Operations
//!
//! - **Encode**: write an [`ObjectFieldSet`] as a workbook or JSON document
//! - **Decode**: read a file back into a loosely-typed [`RawFieldSet`]
//! - **Validate**: collect every structural defect in a raw field set
//! - **Load**: decode, validate and lift into typed records in one step
//!
//! # Architecture
//!
//! ```text
//! ObjectFieldSet → FieldSetCodec::encode → file
//! file → FieldSetCodec::decode → RawFieldSet → validate → into_field_set → ObjectFieldSet
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sf2hs_interchange::{load, save, Format, LoadError};
//!
//! save(&fields, "salesforce_fields.xlsx", Format::Excel)?;
//!
//! match load("salesforce_fields.xlsx", Format::Excel) {
//!     Ok(fields) => println!("{} objects", fields.len()),
//!     Err(LoadError::Invalid { defects }) => {
//!         for defect in defects {
//!             eprintln!("- {defect}");
//!         }
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod codec;
pub mod error;
pub mod raw;
pub mod store;
pub mod validate;

// Re-exports for convenience
pub use codec::{default_codecs, CodecRegistry, ExcelCodec, FieldSetCodec, Format, JsonCodec};
pub use error::{DecodeError, EncodeError, InterchangeError, InterchangeResult, LoadError};
pub use raw::{into_field_set, to_raw, RawFieldSet, RawRecord};
pub use sf2hs_fields::ObjectFieldSet;
pub use store::{load, load_raw, load_validated, save, save_auto};
pub use validate::{validate, validate_field_data, DefectKind, FieldDefect};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
