use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use taskboard_protocol::ProblemDetails;

/// RFC7807-style error response. The API layer is the only place store
/// outcomes are translated into status codes.
pub fn problem(status: StatusCode, title: &str, detail: Option<&str>) -> Response {
    (
        status,
        Json(ProblemDetails {
            r#type: "about:blank".into(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.map(str::to_string),
        }),
    )
        .into_response()
}

pub fn not_found() -> Response {
    problem(StatusCode::NOT_FOUND, "Not Found", None)
}
