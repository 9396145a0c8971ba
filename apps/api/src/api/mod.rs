use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod projects;

/// Builds the API routes nested under /api
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/project", projects::routes(state))
}

/// Readiness probe, mounted at the root alongside /health
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
