//! Application setup and initialization
//!
//! Everything `main` needs to go from a `Config` to a running router. Tests use
//! `services::initialize_services` and `routes::setup_routes` directly with their
//! own directories and collaborators.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use anyhow::{Context, Result};
use slidepress_core::Config;
use slidepress_infra::LogFormat;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    slidepress_infra::init_telemetry(
        SERVICE_NAME,
        config.environment(),
        LogFormat::for_environment(config.is_production()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let publisher = storage::setup_publisher(&config).await;
    let converter = services::setup_converter(&config)?;

    let state = services::initialize_services(&config, converter, publisher).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
