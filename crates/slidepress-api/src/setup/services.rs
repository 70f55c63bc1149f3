//! Collaborator wiring and application state construction

use crate::services::DeliveryResolver;
use crate::setup::storage::setup_storage;
use crate::state::AppState;
use anyhow::Result;
use slidepress_core::Config;
use slidepress_processing::{ConversionGateway, DocumentConverter, LibreOfficeConverter};
use slidepress_storage::RemotePublisher;
use std::sync::Arc;
use std::time::Duration;

/// The LibreOffice converter configured by `CONVERTER_PATH` and `CONVERSION_TIMEOUT_SECS`.
pub fn setup_converter(config: &Config) -> Result<Arc<dyn DocumentConverter>> {
    let timeout = config.conversion_timeout_secs().map(Duration::from_secs);
    let converter = LibreOfficeConverter::new(config.converter_path().to_string(), timeout)?;

    tracing::info!(
        converter_path = config.converter_path(),
        timeout_secs = ?config.conversion_timeout_secs(),
        "Document converter configured"
    );

    Ok(Arc::new(converter))
}

/// Open the stores and assemble the application state around the given collaborators.
pub async fn initialize_services(
    config: &Config,
    converter: Arc<dyn DocumentConverter>,
    publisher: Option<Arc<dyn RemotePublisher>>,
) -> Result<Arc<AppState>> {
    let (uploads, artifacts) = setup_storage(config).await?;

    let gateway = Arc::new(ConversionGateway::new(converter, artifacts.path()));
    let delivery = DeliveryResolver::from_config(config, publisher);

    Ok(Arc::new(AppState {
        config: config.clone(),
        uploads,
        artifacts,
        gateway,
        delivery,
    }))
}
