//! Convert workflow: resolve → convert → deliver.

use crate::services::delivery::RequestOrigin;
use crate::state::AppState;
use slidepress_core::{AppError, DeliveryTarget, FileId};

/// Run one conversion for a previously uploaded file.
///
/// The raw upload is consumed: it is removed after the converter has run,
/// whether or not conversion succeeded, so the identifier resolves to
/// `NotFound` afterwards. Removal failures are logged and never mask the result.
pub async fn convert_upload(
    state: &AppState,
    file_id: &FileId,
    origin: &RequestOrigin,
) -> Result<DeliveryTarget, AppError> {
    let upload = state.uploads.record(file_id).await?;

    let converted = state.gateway.convert(&upload).await;

    if let Err(e) = state.uploads.remove(file_id).await {
        tracing::warn!(
            file_id = %file_id,
            path = %upload.stored_path.display(),
            error = %e,
            "Failed to remove raw upload after conversion"
        );
    }

    let result = converted?;
    let target = state.delivery.deliver(&result, origin).await?;

    tracing::info!(
        file_id = %file_id,
        remote = target.is_remote(),
        download_url = %target.download_url(),
        "Conversion delivered"
    );

    Ok(target)
}
