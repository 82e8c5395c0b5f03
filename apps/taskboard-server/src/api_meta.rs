use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use utoipa::OpenApi;

use crate::{openapi::ApiDoc, AppState};

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Meta",
    responses((status = 200, description = "Liveness probe"))
)]
pub async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "Meta",
    responses((status = 200, description = "Service identity and endpoint list"))
)]
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "taskboard-server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": state.endpoints(),
    }))
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
