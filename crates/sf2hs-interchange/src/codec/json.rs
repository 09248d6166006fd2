//! JSON field set codec
//!
//! The document mirrors the field set exactly: object names at the top level,
//! each mapping to an array of record objects. No flattening is needed, so a
//! typed field set survives encode/decode unchanged.

use super::{FieldSetCodec, Format};
use crate::error::{DecodeError, EncodeError};
use crate::raw::RawFieldSet;
use serde_json::error::Category;
use sf2hs_fields::ObjectFieldSet;

/// JSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create new JSON codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FieldSetCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, set: &ObjectFieldSet) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec_pretty(set).map_err(|e| EncodeError::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<RawFieldSet, DecodeError> {
        // Deserializing into the map type directly keeps object order
        serde_json::from_slice::<RawFieldSet>(bytes).map_err(|e| match e.classify() {
            Category::Data => DecodeError::Malformed {
                format: Format::Json,
                message: e.to_string(),
            },
            Category::Io | Category::Syntax | Category::Eof => DecodeError::Syntax {
                format: Format::Json,
                message: e.to_string(),
            },
        })
    }
}
