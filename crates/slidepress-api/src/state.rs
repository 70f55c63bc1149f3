//! Application state shared by all handlers.

use crate::services::delivery::DeliveryResolver;
use slidepress_core::Config;
use slidepress_processing::ConversionGateway;
use slidepress_storage::{ArtifactDirectory, UploadStore};
use std::sync::Arc;

/// Store handles and collaborators, constructed once at startup and injected into
/// the router. Tests build one over temporary directories.
pub struct AppState {
    pub config: Config,
    pub uploads: Arc<UploadStore>,
    pub artifacts: ArtifactDirectory,
    pub gateway: Arc<ConversionGateway>,
    pub delivery: DeliveryResolver,
}
