//! Document converter - presentation to PDF

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// External converter collaborator.
///
/// `convert` writes a PDF rendition of `input` into `output_dir` and returns the
/// path it expects the result at. Callers must still check that the file exists:
/// converters are known to exit successfully without producing anything.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

/// Headless LibreOffice (`soffice`) converter.
pub struct LibreOfficeConverter {
    soffice_path: String,
    timeout: Option<Duration>,
}

impl LibreOfficeConverter {
    pub fn new(soffice_path: String, timeout: Option<Duration>) -> Result<Self> {
        let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
        if soffice_path.trim().is_empty() {
            return Err(anyhow!("Invalid converter path: empty"));
        }
        if soffice_path.chars().any(|c| dangerous_chars.contains(&c)) {
            return Err(anyhow!(
                "Invalid converter path: contains dangerous characters"
            ));
        }

        Ok(Self {
            soffice_path,
            timeout,
        })
    }

    fn expected_output(input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Input path has no file name: {}", input.display()))?;
        Ok(output_dir.join(format!("{}.pdf", stem)))
    }
}

#[async_trait]
impl DocumentConverter for LibreOfficeConverter {
    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let expected = Self::expected_output(input, output_dir)?;

        // A private profile per run; concurrent soffice processes sharing one profile
        // fail with a lock error.
        let profile = tempfile::Builder::new()
            .prefix("slidepress-soffice-")
            .tempdir()
            .context("Failed to create converter profile directory")?;

        let mut command = Command::new(&self.soffice_path);
        command
            .arg(format!(
                "-env:UserInstallation={}",
                file_url(profile.path())
            ))
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(output_dir)
            .arg(input)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let run = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.map_err(|_| {
                anyhow!(
                    "{} did not finish within {} seconds",
                    self.soffice_path,
                    limit.as_secs()
                )
            })?,
            None => run.await,
        }
        .with_context(|| format!("Failed to run {}", self.soffice_path))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} exited with {}: {}",
                self.soffice_path,
                output.status,
                stderr.trim()
            ));
        }

        Ok(expected)
    }

    fn name(&self) -> &str {
        "libreoffice"
    }
}

/// `file://` URL for a local path, each segment percent-encoded.
fn file_url(path: &Path) -> String {
    let encoded: Vec<String> = path
        .to_string_lossy()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("file://{}", encoded.join("/"))
}
