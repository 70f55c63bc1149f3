//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use slidepress_core::models;
use slidepress_infra::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slidepress API",
        version = "0.1.0",
        description = "Upload a PowerPoint presentation, convert it to PDF, and get a download link. Conversion is a two-step protocol: POST /upload/ returns a file_id, POST /convert/ with that file_id returns a download_url."
    ),
    paths(
        handlers::root::root,
        handlers::upload::upload_file,
        handlers::convert::convert_file,
    ),
    components(schemas(
        models::RootResponse,
        models::UploadResponse,
        models::ConvertResponse,
        handlers::convert::ConvertRequest,
        ErrorResponse,
    )),
    tags(
        (name = "service", description = "Service information"),
        (name = "conversion", description = "Upload and convert presentations")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_both_steps() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/upload/"));
        assert!(spec.paths.paths.contains_key("/convert/"));
    }
}
