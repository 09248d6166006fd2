//! Error types for sf2hs Core
//!
//! Provides error handling for:
//! - Configuration loading
//! - Object description by the external describer
//! - Catalog operations, wrapping interchange failures

use sf2hs_interchange::{EncodeError, LoadError};
use std::path::PathBuf;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML could not be parsed into the configuration model
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors reported by an object describer
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    /// Source system has no object with this name
    #[error("object not found: {0}")]
    NotFound(String),

    /// Describe payload could not be read
    #[error("malformed describe result: {0}")]
    Malformed(String),

    /// Describer could not reach the source system
    #[error("describer unavailable: {0}")]
    Unavailable(String),
}

/// Main core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Object is not known to the source system
    #[error("object '{0}' does not exist in Salesforce")]
    ObjectNotFound(String),

    #[error("describe failed: {0}")]
    Describe(#[from] DescribeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Field data could not be read, or was read and is invalid
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("save error: {0}")]
    Encode(#[from] EncodeError),

    /// Operation needs an input the caller did not give
    #[error("missing input: {0}")]
    MissingInput(String),
}

impl CoreError {
    /// Lift a describer error, turning not-found into [`CoreError::ObjectNotFound`]
    #[must_use]
    pub fn from_describe(err: DescribeError) -> Self {
        match err {
            DescribeError::NotFound(name) => Self::ObjectNotFound(name),
            other => Self::Describe(other),
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
