//! Delivery strategy
//!
//! Decides, per conversion, where the client downloads the artifact from. With a
//! remote publisher configured every artifact is published and the public URL is
//! returned; a failed publish is an error, never a silent fallback to local
//! serving. Without one, the artifact is exposed under the local-files prefix.

use axum::http::{header, HeaderMap};
use slidepress_core::{AppError, Config, ConversionResult, DeliveryTarget};
use slidepress_storage::RemotePublisher;
use std::sync::Arc;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Where a request came from, used to make local download paths absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    scheme: Option<String>,
    host: Option<String>,
}

impl RequestOrigin {
    pub fn new(scheme: Option<&str>, host: Option<&str>) -> Self {
        Self {
            scheme: scheme
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| s == "http" || s == "https"),
            host: host.map(str::trim).filter(|h| is_plausible_host(h)).map(String::from),
        }
    }

    /// Read `Host` and `X-Forwarded-Proto`. Anything that does not look like a host
    /// name is ignored and the download path stays relative.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let scheme = headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next());
        let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
        Self::new(scheme, host)
    }

    fn base_url(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let scheme = self.scheme.as_deref().unwrap_or("http");
        Some(format!("{}://{}", scheme, host))
    }
}

fn is_plausible_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

pub struct DeliveryResolver {
    publisher: Option<Arc<dyn RemotePublisher>>,
    local_prefix: String,
    public_base_url: Option<String>,
}

impl DeliveryResolver {
    pub fn new(
        publisher: Option<Arc<dyn RemotePublisher>>,
        local_prefix: impl Into<String>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            publisher,
            local_prefix: local_prefix.into().trim_end_matches('/').to_string(),
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn from_config(config: &Config, publisher: Option<Arc<dyn RemotePublisher>>) -> Self {
        Self::new(
            publisher,
            config.local_files_prefix(),
            config.public_base_url().map(String::from),
        )
    }

    pub fn is_remote(&self) -> bool {
        self.publisher.is_some()
    }

    /// Path of a local artifact under the serving prefix, e.g. `/local-files/slides.pdf`.
    pub fn local_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.local_prefix, urlencoding::encode(file_name))
    }

    pub async fn deliver(
        &self,
        result: &ConversionResult,
        origin: &RequestOrigin,
    ) -> Result<DeliveryTarget, AppError> {
        if let Some(publisher) = &self.publisher {
            let url = publisher.publish(result.path()).await.map_err(|e| {
                tracing::error!(
                    bucket = publisher.bucket(),
                    path = %result.path().display(),
                    error = %e,
                    "Publishing artifact failed; local copy kept"
                );
                AppError::from(e)
            })?;
            return Ok(DeliveryTarget::RemoteUrl(url));
        }

        let file_name = result.file_name().ok_or_else(|| {
            AppError::Internal(format!(
                "Artifact path has no file name: {}",
                result.path().display()
            ))
        })?;
        let path = self.local_path(file_name);

        let base = self.public_base_url.clone().or_else(|| origin.base_url());
        Ok(DeliveryTarget::LocalPath(match base {
            Some(base) => format!("{}{}", base, path),
            None => path,
        }))
    }
}
