//! File-backed save and load
//!
//! Files are read and written whole. The handle is scoped to each call and
//! flushed before returning; a failed write can leave a partial file behind.

use crate::codec::{default_codecs, Format};
use crate::error::{DecodeError, EncodeError, LoadError};
use crate::raw::{into_field_set, RawFieldSet};
use crate::validate::validate;
use sf2hs_fields::ObjectFieldSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a field set to `path` in `format`
///
/// # Errors
/// `EncodeError` if the set cannot be encoded or the file cannot be written.
pub fn save(set: &ObjectFieldSet, path: impl AsRef<Path>, format: Format) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let registry = default_codecs();
    let codec = registry
        .for_format(format)
        .ok_or_else(|| EncodeError::NoCodec(format.to_string()))?;
    let bytes = codec.encode(set)?;

    let file = File::create(path).map_err(|e| EncodeError::io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| EncodeError::io_error(path, e))?;

    tracing::info!("Saved {} object(s) to {} as {}", set.len(), path.display(), format);
    Ok(())
}

/// Write a field set, choosing the format from the file extension
///
/// # Errors
/// `EncodeError::NoCodec` for an unknown extension, otherwise as [`save`].
pub fn save_auto(set: &ObjectFieldSet, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let registry = default_codecs();
    let format = registry
        .find_for_path(path)
        .map(|codec| codec.format())
        .ok_or_else(|| EncodeError::NoCodec(path.display().to_string()))?;
    save(set, path, format)
}

/// Read a field set without validating it
///
/// # Errors
/// `DecodeError` if the file cannot be read or is not a well-formed field set.
pub fn load_raw(path: impl AsRef<Path>, format: Format) -> Result<RawFieldSet, DecodeError> {
    let path = path.as_ref();
    let registry = default_codecs();
    let codec = registry
        .for_format(format)
        .ok_or_else(|| DecodeError::NoCodec(format.to_string()))?;
    let bytes = std::fs::read(path).map_err(|e| DecodeError::io_error(path, e))?;

    let raw = codec.decode(&bytes)?;
    tracing::debug!("Read {} object(s) from {}", raw.len(), path.display());
    Ok(raw)
}

/// Read, validate and type a field set
///
/// # Errors
/// - `LoadError::Decode` when the file cannot be read or parsed
/// - `LoadError::Invalid` carrying every structural defect found
/// - `LoadError::Shape` when a record passes validation but not typing
pub fn load(path: impl AsRef<Path>, format: Format) -> Result<ObjectFieldSet, LoadError> {
    let raw = load_raw(path, format)?;
    load_validated(raw)
}

/// Validate and type an already-decoded field set
///
/// # Errors
/// As [`load`], minus decoding.
pub fn load_validated(raw: RawFieldSet) -> Result<ObjectFieldSet, LoadError> {
    let defects = validate(&raw);
    if !defects.is_empty() {
        tracing::warn!("Field data has {} defect(s)", defects.len());
        return Err(LoadError::Invalid { defects });
    }
    into_field_set(raw)
}
