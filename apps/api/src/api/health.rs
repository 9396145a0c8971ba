use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

/// Readiness handler: verifies the database connection before reporting ready.
///
/// Returns 200 with per-dependency status when everything is reachable,
/// 503 otherwise. Load balancers should route traffic based on this.
pub async fn ready_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let db_check: HealthCheckFuture = Box::pin(async {
        database::postgres::check_health(&state.db)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", db_check)]).await
}
