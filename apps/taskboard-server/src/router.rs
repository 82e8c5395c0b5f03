use std::mem;

use axum::{
    handler::Handler,
    routing::{delete, get, post, put},
    Router,
};

use crate::{api_meta, api_tasks, AppState};

/// Builds the route table while recording `METHOD path` strings for the
/// `/about` endpoint listing.
pub(crate) struct RouterBuilder {
    router: Router<AppState>,
    endpoints: Vec<String>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
        }
    }

    fn record(&mut self, method: &str, path: &'static str) {
        self.endpoints.push(format!("{} {}", method, path));
    }

    fn route_get<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("GET", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, get(handler));
        self
    }

    fn route_post<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("POST", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, post(handler));
        self
    }

    fn route_put<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("PUT", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, put(handler));
        self
    }

    fn route_delete<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("DELETE", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, delete(handler));
        self
    }

    fn finish(self) -> (Router<AppState>, Vec<String>) {
        (self.router, self.endpoints)
    }
}

pub(crate) fn build_router() -> (Router<AppState>, Vec<String>) {
    let mut builder = RouterBuilder::new();
    builder
        .route_get(paths::HEALTHZ, api_meta::healthz)
        .route_get(paths::ABOUT, api_meta::about)
        .route_get(paths::SPEC_OPENAPI, api_meta::openapi_json)
        .route_get(paths::TASKS, api_tasks::tasks_list)
        .route_post(paths::TASKS, api_tasks::tasks_create)
        .route_get(paths::TASKS_ID, api_tasks::tasks_get)
        .route_put(paths::TASKS_ID, api_tasks::tasks_update)
        .route_put(paths::TASKS_ID_TOGGLE, api_tasks::tasks_toggle)
        .route_delete(paths::TASKS_ID, api_tasks::tasks_delete)
        .route_get(paths::STATE_TASKS, api_tasks::state_tasks);
    builder.finish()
}

pub(crate) mod paths {
    pub const HEALTHZ: &str = "/healthz";
    pub const ABOUT: &str = "/about";
    pub const SPEC_OPENAPI: &str = "/spec/openapi.json";
    pub const TASKS: &str = "/api/tasks";
    pub const TASKS_ID: &str = "/api/tasks/{id}";
    pub const TASKS_ID_TOGGLE: &str = "/api/tasks/{id}/toggle";
    pub const STATE_TASKS: &str = "/state/tasks";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_list_covers_the_task_surface() {
        let (_, endpoints) = build_router();
        for expected in [
            "GET /api/tasks",
            "POST /api/tasks",
            "GET /api/tasks/{id}",
            "PUT /api/tasks/{id}",
            "PUT /api/tasks/{id}/toggle",
            "DELETE /api/tasks/{id}",
            "GET /state/tasks",
            "GET /healthz",
        ] {
            assert!(
                endpoints.iter().any(|e| e == expected),
                "missing endpoint {expected}"
            );
        }
    }
}
