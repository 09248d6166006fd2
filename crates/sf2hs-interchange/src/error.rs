//! Error types for field set interchange
//!
//! Provides error handling for:
//! - Decode operations (file → raw field set)
//! - Encode operations (field set → file)
//! - Load operations, which separate "could not read the input" from
//!   "read it, but it is invalid"

use crate::codec::Format;
use crate::validate::FieldDefect;
use std::path::PathBuf;

/// Errors reading a persisted field set
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not well-formed in its format
    #[error("{format} syntax error: {message}")]
    Syntax { format: Format, message: String },

    /// Well-formed, but not shaped as object name → list of records
    #[error("malformed {format} field set: {message}")]
    Malformed { format: Format, message: String },

    /// Workbook container could not be opened or a sheet could not be read
    #[error("workbook error: {0}")]
    Workbook(String),

    /// A cell could not be converted to its column's type
    #[error("sheet '{sheet}', row {row}, column '{column}': {message}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        message: String,
    },

    /// No codec handles the requested format or extension
    #[error("no codec registered for: '{0}'")]
    NoCodec(String),
}

impl DecodeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors writing a field set
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization logic failed
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Workbook writer rejected a sheet name or cell
    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("no codec registered for: '{0}'")]
    NoCodec(String),
}

impl EncodeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading field data for use
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input could not be read or parsed
    #[error("could not load field data: {0}")]
    Decode(#[from] DecodeError),

    /// Input parsed but failed structural validation
    #[error("field data failed validation with {} defect(s)", .defects.len())]
    Invalid { defects: Vec<FieldDefect> },

    /// A structurally valid record does not fit the typed record model
    #[error("object '{object}', field {field}: {source}")]
    Shape {
        object: String,
        field: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Defects carried by an `Invalid` error
    #[must_use]
    pub fn defects(&self) -> &[FieldDefect] {
        match self {
            Self::Invalid { defects } => defects,
            _ => &[],
        }
    }

    /// Whether the input was read but rejected
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Shape { .. })
    }
}

/// Combined interchange error
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// Result type alias for interchange operations
pub type InterchangeResult<T> = Result<T, InterchangeError>;
