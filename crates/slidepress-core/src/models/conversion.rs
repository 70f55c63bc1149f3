use std::path::{Path, PathBuf};

/// Output of one successful conversion. Used once by the delivery step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub output_path: PathBuf,
}

impl ConversionResult {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    /// Base filename of the artifact, e.g. `slides.pdf`.
    pub fn file_name(&self) -> Option<&str> {
        self.output_path.file_name().and_then(|n| n.to_str())
    }
}

/// Where the client fetches a converted artifact from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Public object-store URL.
    RemoteUrl(String),
    /// Path under the local static-serving prefix, absolute when the request host is known.
    LocalPath(String),
}

impl DeliveryTarget {
    pub fn download_url(&self) -> &str {
        match self {
            DeliveryTarget::RemoteUrl(url) => url,
            DeliveryTarget::LocalPath(path) => path,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DeliveryTarget::RemoteUrl(_))
    }

    pub fn into_download_url(self) -> String {
        match self {
            DeliveryTarget::RemoteUrl(url) | DeliveryTarget::LocalPath(url) => url,
        }
    }
}
