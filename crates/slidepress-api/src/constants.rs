//! Route paths and service identity.

pub const SERVICE_NAME: &str = "slidepress";

pub const UPLOAD_PATH: &str = "/upload/";
pub const CONVERT_PATH: &str = "/convert/";
pub const HEALTH_PATH: &str = "/health";
pub const READINESS_PATH: &str = "/health/ready";
pub const OPENAPI_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/docs";

/// Multipart field carrying the presentation.
pub const FILE_FIELD: &str = "file";
/// Form field carrying the identifier returned by the upload step.
pub const FILE_ID_FIELD: &str = "file_id";

/// Server-level cap on in-flight requests.
pub const HTTP_CONCURRENCY_LIMIT: usize = 1_000;
