use axum::Json;
use slidepress_core::models::RootResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service greeting", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World".to_string(),
    })
}
