use std::sync::Arc;

use axum::http::HeaderValue;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app_state::AppState, router::build_router, store::TaskStore};

pub(crate) struct BootstrapOutput {
    pub router: axum::Router<AppState>,
    pub state: AppState,
}

/// Constructs the store and router once per process.
pub(crate) fn build() -> BootstrapOutput {
    let store = Arc::new(TaskStore::new());
    let (router, endpoints) = build_router();
    let state = AppState::new(store, Arc::new(endpoints));
    BootstrapOutput { router, state }
}

pub(crate) fn attach_http_layers(router: axum::Router<()>, cfg: &HttpConfig) -> axum::Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(cfg.cors_origin.clone())
        .allow_methods(Any)
        .allow_headers(Any);
    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(cfg.concurrency_limit))
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum HttpConfigError {
    #[error("invalid TASKBOARD_HTTP_MAX_CONC: {0}")]
    InvalidConcurrency(String),
    #[error("invalid TASKBOARD_PORT: {0}")]
    InvalidPort(String),
    #[error("invalid TASKBOARD_BIND: {0}")]
    InvalidBind(String),
    #[error("invalid TASKBOARD_CORS_ORIGIN: {0}")]
    InvalidCorsOrigin(String),
}

pub(crate) struct HttpConfig {
    pub addr: std::net::SocketAddr,
    pub concurrency_limit: usize,
    pub cors_origin: HeaderValue,
}

pub(crate) fn http_config_from_env() -> Result<HttpConfig, HttpConfigError> {
    let concurrency_limit = std::env::var("TASKBOARD_HTTP_MAX_CONC")
        .ok()
        .map(|raw| {
            raw.parse()
                .map_err(|_| HttpConfigError::InvalidConcurrency(raw))
        })
        .transpose()?
        .unwrap_or(1024);

    let bind = std::env::var("TASKBOARD_BIND").unwrap_or_else(|_| "127.0.0.1".into());
    let port_raw = std::env::var("TASKBOARD_PORT").unwrap_or_else(|_| "8090".into());
    let port: u16 = port_raw
        .parse()
        .map_err(|_| HttpConfigError::InvalidPort(port_raw))?;

    // Frontend dev origin; the Vite default unless overridden.
    let origin_raw = std::env::var("TASKBOARD_CORS_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:5173".into());
    let cors_origin: HeaderValue = origin_raw
        .parse()
        .map_err(|_| HttpConfigError::InvalidCorsOrigin(origin_raw))?;

    let addr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|_| HttpConfigError::InvalidBind(bind))?;

    Ok(HttpConfig {
        addr,
        concurrency_limit,
        cors_origin,
    })
}
