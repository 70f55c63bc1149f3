//! Route configuration and setup

use crate::api_doc::get_openapi_spec;
use crate::constants::{
    CONVERT_PATH, DOCS_PATH, HEALTH_PATH, HTTP_CONCURRENCY_LIMIT, OPENAPI_PATH, READINESS_PATH,
    UPLOAD_PATH,
};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use slidepress_core::Config;
use slidepress_infra::{request_id_middleware, RequestId};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    crate::error::set_production_mode(config.is_production());
    let cors = setup_cors(config)?;

    // Converted artifacts, served straight from the output directory
    let local_files = ServeDir::new(state.artifacts.path()).append_index_html_on_directories(false);

    let api_routes = Router::new()
        .route("/", get(handlers::root::root))
        .route(HEALTH_PATH, get(handlers::health::liveness_check))
        .route(READINESS_PATH, get(handlers::health::readiness_check))
        .route(UPLOAD_PATH, post(handlers::upload::upload_file))
        .route(UPLOAD_PATH.trim_end_matches('/'), post(handlers::upload::upload_file))
        .route(CONVERT_PATH, post(handlers::convert::convert_file))
        .route(CONVERT_PATH.trim_end_matches('/'), post(handlers::convert::convert_file))
        .route(OPENAPI_PATH, get(|| async { Json(get_openapi_spec()) }))
        .nest_service(config.local_files_prefix(), local_files)
        .with_state(state);

    tracing::info!(
        http_concurrency_limit = HTTP_CONCURRENCY_LIMIT,
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        "HTTP limits configured"
    );

    let app = api_routes
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path(DOCS_PATH))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        // Uploads are streamed; the size cap is enforced on the body itself
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.as_str())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                http.method = %request.method(),
                http.target = %request.uri().path(),
                request_id = %request_id,
            )
        }))
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
