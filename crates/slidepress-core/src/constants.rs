//! Well-known names and defaults used across crates.

/// The only upload suffix the service accepts. Matched case-sensitively.
pub const ACCEPTED_UPLOAD_EXTENSION: &str = ".pptx";

/// Separator between the identifier and the original filename in stored names.
/// A hyphenated UUID never contains it.
pub const STORED_NAME_SEPARATOR: char = '_';

/// Extension produced by the converter.
pub const ARTIFACT_EXTENSION: &str = "pdf";

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_OUTPUT_DIR: &str = "converted";
pub const DEFAULT_LOCAL_FILES_PREFIX: &str = "/local-files";
