//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: admin allowlist guard over the upstream-auth identity header
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (security headers)
//! - **[`errors`]**: Structured error responses
//! - **[`response`]**: Success response envelope
//! - **[`extractors`]**: Custom extractors (UUID path)
//! - **[`audit`]**: Audit logging for security and compliance

// Domain modules
pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export auth types
pub use auth::{admin_guard, AdminAllowlist, IDENTITY_HEADER};

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export response envelope
pub use response::ApiResponse;

// Re-export extractors
pub use extractors::UuidPath;

// Re-export audit types
pub use audit::{
    extract_ip_from_headers, extract_ip_from_socket, extract_user_agent, AuditEvent, AuditOutcome,
};
