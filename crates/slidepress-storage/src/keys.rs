//! Stored-name and object-key handling shared by the local store and publishers.

use slidepress_core::constants::{ACCEPTED_UPLOAD_EXTENSION, STORED_NAME_SEPARATOR};
use slidepress_core::FileId;
use std::path::Path;

use crate::traits::{PublishError, StorageError, StorageResult};

/// Longest file name most filesystems accept (NAME_MAX).
const MAX_STORED_NAME_BYTES: usize = 255;

/// Hyphenated UUID plus separator, prepended to every stored name.
const STORED_NAME_PREFIX_BYTES: usize = 36 + 1;

/// Longest original filename that still fits once prefixed.
const MAX_ORIGINAL_FILENAME_BYTES: usize = MAX_STORED_NAME_BYTES - STORED_NAME_PREFIX_BYTES;

/// Reduce a client-supplied filename to its final path component.
///
/// Browsers send bare names, but nothing stops a client from sending
/// `../../etc/x.pptx`; only the last component is ever used.
pub fn sanitize_filename(raw: &str) -> StorageResult<String> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidFilename(format!(
            "'{}' is not a usable filename",
            raw
        )));
    }

    if name.len() > MAX_ORIGINAL_FILENAME_BYTES {
        return Err(StorageError::InvalidFilename(format!(
            "Filename is {} bytes long; at most {} bytes are allowed",
            name.len(),
            MAX_ORIGINAL_FILENAME_BYTES
        )));
    }

    Ok(name.to_string())
}

/// Accept only the exact `.pptx` suffix. No content sniffing.
pub fn ensure_accepted_extension(filename: &str) -> StorageResult<()> {
    if filename.ends_with(ACCEPTED_UPLOAD_EXTENSION) {
        Ok(())
    } else {
        Err(StorageError::UnsupportedMediaType(format!(
            "Only {} files are supported",
            ACCEPTED_UPLOAD_EXTENSION
        )))
    }
}

/// `{identifier}_{original_filename}`
pub fn stored_name(identifier: &FileId, original_filename: &str) -> String {
    format!("{}{}{}", identifier, STORED_NAME_SEPARATOR, original_filename)
}

/// Split a stored name back into identifier and original filename.
/// Returns `None` for names this store did not write.
pub fn parse_stored_name(name: &str) -> Option<(FileId, &str)> {
    let (prefix, original) = name.split_once(STORED_NAME_SEPARATOR)?;
    if original.is_empty() {
        return None;
    }
    let identifier = prefix.parse::<FileId>().ok()?;
    Some((identifier, original))
}

/// Object key for an artifact: its base file name.
pub fn object_key(file_path: &Path) -> Result<String, PublishError> {
    file_path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .ok_or_else(|| PublishError::InvalidPath(file_path.display().to_string()))
}

/// Content type for an artifact, from its extension.
pub fn content_type_for(file_path: &Path) -> &'static str {
    match file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("pptx") => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

/// Canonical public URL of an object.
///
/// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
/// For S3-compatible providers (custom endpoint), path-style: `{endpoint}/{bucket}/{key}`.
pub fn public_object_url(
    bucket: &str,
    region: &str,
    endpoint_url: Option<&str>,
    key: &str,
) -> String {
    let encoded_key = urlencoding::encode(key);
    match endpoint_url {
        Some(endpoint) => format!(
            "{}/{}/{}",
            endpoint.trim_end_matches('/'),
            bucket,
            encoded_key
        ),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            bucket, region, encoded_key
        ),
    }
}
