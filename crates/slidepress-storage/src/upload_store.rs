//! Local upload store.
//!
//! Raw uploads are written flat into one directory as `{identifier}_{original_filename}`.
//! Lookups go through an in-memory index that is rebuilt once, when the store is
//! opened, by scanning that directory. Two files claiming the same identifier make
//! [`UploadStore::open`] fail instead of leaving the lookup ambiguous.

use crate::keys::{ensure_accepted_extension, parse_stored_name, sanitize_filename, stored_name};
use crate::traits::{StorageError, StorageResult};
use slidepress_core::{new_identifier, FileId, UploadRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct IndexEntry {
    original_filename: String,
    stored_path: PathBuf,
}

/// Upload store rooted at one directory.
#[derive(Debug)]
pub struct UploadStore {
    base_path: PathBuf,
    index: RwLock<HashMap<FileId, IndexEntry>>,
}

impl UploadStore {
    /// Open (creating if needed) the upload directory and index its contents.
    pub async fn open(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let index = Self::build_index(&base_path).await?;

        tracing::info!(
            path = %base_path.display(),
            uploads = index.len(),
            "Upload store opened"
        );

        Ok(UploadStore {
            base_path,
            index: RwLock::new(index),
        })
    }

    async fn build_index(base_path: &Path) -> StorageResult<HashMap<FileId, IndexEntry>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "Skipping upload with non UTF-8 name");
                }
            }
        }
        // Lexicographic order keeps duplicate reports stable across restarts.
        names.sort();

        let mut index: HashMap<FileId, IndexEntry> = HashMap::with_capacity(names.len());
        for name in names {
            let Some((identifier, original)) = parse_stored_name(&name) else {
                tracing::debug!(name = %name, "Ignoring file not written by the upload store");
                continue;
            };

            let entry = IndexEntry {
                original_filename: original.to_string(),
                stored_path: base_path.join(&name),
            };

            if let Some(existing) = index.get(&identifier) {
                return Err(StorageError::DuplicateIdentifier {
                    identifier: identifier.to_string(),
                    first: existing.stored_path.display().to_string(),
                    second: entry.stored_path.display().to_string(),
                });
            }
            index.insert(identifier, entry);
        }

        Ok(index)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Number of indexed uploads.
    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }

    /// Persist `reader` under a fresh identifier.
    ///
    /// The filename is validated before anything touches the disk. The returned
    /// size is read back from the written file. A failed write removes the partial
    /// file and leaves the index untouched.
    pub async fn save<R>(&self, mut reader: R, original_filename: &str) -> StorageResult<UploadRecord>
    where
        R: AsyncRead + Unpin + Send,
    {
        let original_filename = sanitize_filename(original_filename)?;
        ensure_accepted_extension(&original_filename)?;

        let identifier = new_identifier();
        let path = self.base_path.join(stored_name(&identifier, &original_filename));
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let written = async {
            let bytes_copied = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            Ok::<u64, std::io::Error>(bytes_copied)
        }
        .await;

        let bytes_copied = match written {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(cleanup) = fs::remove_file(&path).await {
                    tracing::warn!(
                        error = %cleanup,
                        path = %path.display(),
                        "Failed to remove partial upload"
                    );
                }
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Upload stream failed, partial file removed"
                );
                return Err(StorageError::StreamFailed(e));
            }
        };

        let size = fs::metadata(&path).await?.len();
        if size != bytes_copied {
            tracing::warn!(
                path = %path.display(),
                bytes_copied,
                size_bytes = size,
                "Upload size on disk differs from bytes received"
            );
        }

        self.index.write().await.insert(
            identifier,
            IndexEntry {
                original_filename: original_filename.clone(),
                stored_path: path.clone(),
            },
        );

        tracing::info!(
            file_id = %identifier,
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload stored"
        );

        Ok(UploadRecord {
            identifier,
            original_filename,
            stored_path: path,
            size,
        })
    }

    /// Resolve an identifier to its stored file.
    ///
    /// Fails with `NotFound` for identifiers never issued, already consumed, or
    /// whose file has disappeared from disk since it was indexed.
    pub async fn resolve(&self, identifier: &FileId) -> StorageResult<PathBuf> {
        self.record(identifier).await.map(|record| record.stored_path)
    }

    /// Resolve an identifier to a full record, with size measured now.
    pub async fn record(&self, identifier: &FileId) -> StorageResult<UploadRecord> {
        let entry = self
            .index
            .read()
            .await
            .get(identifier)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("No upload with file_id {}", identifier)))?;

        match fs::metadata(&entry.stored_path).await {
            Ok(meta) if meta.is_file() => Ok(UploadRecord {
                identifier: *identifier,
                original_filename: entry.original_filename,
                stored_path: entry.stored_path,
                size: meta.len(),
            }),
            _ => {
                tracing::warn!(
                    file_id = %identifier,
                    path = %entry.stored_path.display(),
                    "Indexed upload is missing on disk, dropping it"
                );
                self.index.write().await.remove(identifier);
                Err(StorageError::NotFound(format!(
                    "No upload with file_id {}",
                    identifier
                )))
            }
        }
    }

    /// Delete a stored upload and forget its identifier. Deleting an unknown or
    /// already-removed upload is not an error.
    pub async fn remove(&self, identifier: &FileId) -> StorageResult<()> {
        let Some(entry) = self.index.write().await.remove(identifier) else {
            return Ok(());
        };

        match fs::remove_file(&entry.stored_path).await {
            Ok(()) => {
                tracing::debug!(
                    file_id = %identifier,
                    path = %entry.stored_path.display(),
                    "Upload removed"
                );
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}
