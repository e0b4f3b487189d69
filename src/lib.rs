pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    axum::{Router, routing::get},
    domain::store::LogStore,
    std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogStore>,
}

/// Routes without transport layers; `main` adds timeout and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/logs", get(adapters::logs::get_logs_handler))
        .with_state(state)
}
