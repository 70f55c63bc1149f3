use std::path::PathBuf;

use crate::identity::FileId;

/// A stored upload, reconstructed from its on-disk name.
///
/// The upload store owns the file; this is a read-only view of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub identifier: FileId,
    pub original_filename: String,
    pub stored_path: PathBuf,
    pub size: u64,
}

impl UploadRecord {
    /// Original filename without its extension, e.g. `slides` for `slides.pptx`.
    pub fn original_stem(&self) -> &str {
        match self.original_filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.original_filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_identifier;

    fn record(name: &str) -> UploadRecord {
        UploadRecord {
            identifier: new_identifier(),
            original_filename: name.to_string(),
            stored_path: PathBuf::from("uploads").join(name),
            size: 0,
        }
    }

    #[test]
    fn test_original_stem() {
        assert_eq!(record("slides.pptx").original_stem(), "slides");
        assert_eq!(record("q3.review.pptx").original_stem(), "q3.review");
        assert_eq!(record(".pptx").original_stem(), ".pptx");
    }
}
