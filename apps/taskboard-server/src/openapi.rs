use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "taskboard-server",
        description = "Minimal task-tracking service: CRUD over an in-memory store."
    ),
    paths(
        crate::api_tasks::tasks_list,
        crate::api_tasks::tasks_get,
        crate::api_tasks::tasks_create,
        crate::api_tasks::tasks_toggle,
        crate::api_tasks::tasks_update,
        crate::api_tasks::tasks_delete,
        crate::api_tasks::state_tasks,
        crate::api_meta::healthz,
        crate::api_meta::about,
    ),
    components(schemas(
        taskboard_protocol::Task,
        taskboard_protocol::CreateTaskRequest,
        taskboard_protocol::UpdateTaskRequest,
        taskboard_protocol::ProblemDetails,
    )),
    tags(
        (name = "Tasks", description = "Task CRUD surface"),
        (name = "State", description = "Read-only snapshots"),
        (name = "Meta", description = "Service metadata"),
    )
)]
pub(crate) struct ApiDoc;
