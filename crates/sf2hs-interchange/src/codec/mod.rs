//! Field set codecs
//!
//! Two interchangeable persisted formats:
//! - Workbook (`.xlsx`), one sheet per object, list-valued columns flattened
//! - JSON, a single nested document mirroring the field set
//!
//! Encoders take typed field sets; decoders return [`RawFieldSet`]s so the
//! validator sees the data as it was written.

use crate::error::{DecodeError, EncodeError};
use crate::raw::RawFieldSet;
use sf2hs_fields::ObjectFieldSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod excel;
mod json;

pub use excel::{Column, ColumnKind, ExcelCodec, COLUMNS};
pub use json::JsonCodec;

/// Persisted field set format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Multi-sheet workbook
    #[default]
    Excel,
    /// Indented JSON document
    Json,
}

impl Format {
    /// File extensions (without dot)
    #[inline]
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Excel => &["xlsx"],
            Self::Json => &["json"],
        }
    }

    /// Detect format from a path's extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Excel, Self::Json]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excel => "excel",
            Self::Json => "json",
        })
    }
}

impl FromStr for Format {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(Self::Excel),
            "json" => Ok(Self::Json),
            other => Err(DecodeError::NoCodec(other.to_string())),
        }
    }
}

/// Codec between typed field sets and a persisted format
///
/// Implement this trait to add support for new formats.
pub trait FieldSetCodec: Send + Sync + 'static {
    /// The format this codec reads and writes
    fn format(&self) -> Format;

    /// Encode a field set into file bytes
    fn encode(&self, set: &ObjectFieldSet) -> Result<Vec<u8>, EncodeError>;

    /// Decode file bytes into a raw field set
    fn decode(&self, bytes: &[u8]) -> Result<RawFieldSet, DecodeError>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str] {
        self.format().extensions()
    }

    /// Check if this codec handles the given path
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().iter().any(|known| known.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Registry of available codecs
pub struct CodecRegistry {
    codecs: Vec<Box<dyn FieldSetCodec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        default_codecs()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codec_count", &self.codecs.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl CodecRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Register a codec; a later codec for the same format shadows earlier ones
    pub fn register<C: FieldSetCodec>(&mut self, codec: C) {
        self.codecs.insert(0, Box::new(codec));
    }

    /// Find codec for format
    #[must_use]
    pub fn for_format(&self, format: Format) -> Option<&dyn FieldSetCodec> {
        self.codecs.iter().find(|c| c.format() == format).map(|c| &**c)
    }

    /// Find codec for path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn FieldSetCodec> {
        self.codecs.iter().find(|c| c.can_handle(path)).map(|c| &**c)
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.codecs.iter().flat_map(|c| c.extensions()).copied().collect()
    }
}

/// Create registry with the built-in codecs
#[inline]
#[must_use]
pub fn default_codecs() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    registry.register(JsonCodec);
    registry.register(ExcelCodec);
    registry
}
