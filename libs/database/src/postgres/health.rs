use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Verify the database connection with a `SELECT 1` round trip.
///
/// Intended for readiness probes.
///
/// # Example
/// ```ignore
/// use database::postgres::check_health;
///
/// match check_health(&db).await {
///     Ok(_) => StatusCode::OK,
///     Err(_) => StatusCode::SERVICE_UNAVAILABLE,
/// }
/// ```
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
