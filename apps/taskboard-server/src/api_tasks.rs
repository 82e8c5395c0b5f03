use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use taskboard_protocol::{CreateTaskRequest, Task, UpdateTaskRequest};
use tracing::info;

use crate::{responses, router::paths, AppState};

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "All tasks, id ascending", body = [Task]),
    )
)]
pub async fn tasks_list(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store().get_all())
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 404, description = "Unknown id", body = taskboard_protocol::ProblemDetails),
    )
)]
pub async fn tasks_get(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store().get(id) {
        Some(task) => Json(task).into_response(),
        None => responses::not_found(),
    }
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Blank description", body = taskboard_protocol::ProblemDetails),
    )
)]
pub async fn tasks_create(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    let description = req.description.unwrap_or_default();
    match state.store().create(&description) {
        Ok(task) => {
            info!(id = task.id, "task created");
            let location = format!("{}/{}", paths::TASKS, task.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(task),
            )
                .into_response()
        }
        Err(err) => responses::problem(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            Some(&err.to_string()),
        ),
    }
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}/toggle",
    tag = "Tasks",
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task with completion flag flipped", body = Task),
        (status = 404, description = "Unknown id", body = taskboard_protocol::ProblemDetails),
    )
)]
pub async fn tasks_toggle(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store().toggle(id) {
        Some(task) => Json(task).into_response(),
        None => responses::not_found(),
    }
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = u64, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task; blank descriptions leave the field unchanged", body = Task),
        (status = 404, description = "Unknown id", body = taskboard_protocol::ProblemDetails),
    )
)]
pub async fn tasks_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateTaskRequest>,
) -> impl IntoResponse {
    match state
        .store()
        .update_description(id, req.description.as_deref())
    {
        Some(task) => Json(task).into_response(),
        None => responses::not_found(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task removed"),
        (status = 404, description = "Unknown id", body = taskboard_protocol::ProblemDetails),
    )
)]
pub async fn tasks_delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    if state.store().delete(id) {
        info!(id, "task deleted");
        StatusCode::NO_CONTENT.into_response()
    } else {
        responses::not_found()
    }
}

#[utoipa::path(
    get,
    path = "/state/tasks",
    tag = "State",
    responses(
        (status = 200, description = "Task list snapshot envelope"),
    )
)]
pub async fn state_tasks(State(state): State<AppState>) -> impl IntoResponse {
    let items = state.store().get_all();
    Json(json!({"count": items.len(), "items": items}))
}
