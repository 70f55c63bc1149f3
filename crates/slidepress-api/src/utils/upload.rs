//! Multipart helpers for upload and convert handlers

use crate::constants::{FILE_FIELD, FILE_ID_FIELD};
use crate::error::HttpAppError;
use axum::extract::Multipart;
use futures::TryStreamExt;
use slidepress_core::{AppError, UploadRecord};
use slidepress_storage::UploadStore;
use tokio_util::io::StreamReader;

/// Stream the single `file` field of a multipart body into the upload store.
///
/// The body is never buffered in memory. Other fields are skipped; a second
/// `file` field is rejected. If the body fails after the file was stored, the
/// stored upload is removed again so no unreported identifier is left behind.
pub async fn store_multipart_file(
    mut multipart: Multipart,
    uploads: &UploadStore,
) -> Result<UploadRecord, HttpAppError> {
    let mut stored: Option<UploadRecord> = None;

    match read_file_fields(&mut multipart, uploads, &mut stored).await {
        Ok(()) => stored.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()).into()),
        Err(e) => {
            if let Some(record) = stored {
                if let Err(cleanup) = uploads.remove(&record.identifier).await {
                    tracing::warn!(
                        file_id = %record.identifier,
                        error = %cleanup,
                        "Failed to discard upload after multipart error"
                    );
                }
            }
            Err(e)
        }
    }
}

async fn read_file_fields(
    multipart: &mut Multipart,
    uploads: &UploadStore,
    stored: &mut Option<UploadRecord>,
) -> Result<(), HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if stored.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            )
            .into());
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::InvalidInput("File field has no filename".to_string()))?;

        let reader = StreamReader::new(Box::pin(field.map_err(std::io::Error::other)));
        *stored = Some(uploads.save(reader, &filename).await?);
    }
    Ok(())
}

/// Read the `file_id` text field from a multipart body.
pub async fn extract_multipart_file_id(mut multipart: Multipart) -> Result<String, HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_ID_FIELD) {
            return Ok(field.text().await?);
        }
    }
    Err(AppError::InvalidInput(format!("Missing form field '{}'", FILE_ID_FIELD)).into())
}
