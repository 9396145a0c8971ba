//! Application state shared across request handlers.

/// Shared application state.
///
/// Cloning is cheap: the database connection is an Arc'd pool and the
/// config is a handful of small strings.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
