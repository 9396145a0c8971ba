pub mod handlers;
pub mod responses;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for all failure responses:
/// - `error`: human-readable error message
/// - `details`: optional structured detail (e.g., field-level validation errors,
///   or the underlying message of a storage failure)
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Validation failed",
///   "details": { "title": [{"code": "length", "message": null}] }
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Integrates with common error types from dependencies and produces
/// the `{error, details?}` failure envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerErrorWithDetails(String, serde_json::Value),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::SerdeJson(e) => {
                tracing::error!("JSON parsing error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                    Some(serde_json::json!(e.to_string())),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            AppError::Validation(e) => {
                tracing::info!("Validation error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            AppError::InternalServerErrorWithDetails(msg, details) => {
                tracing::error!("Internal server error: {} ({})", msg, details);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Some(details))
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg, None)
            }
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}

/// Convert validator errors to a field-keyed JSON map for the `details` field.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(error_messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Candidate {
        #[validate(length(min = 1, max = 5))]
        title: String,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Project abc not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Project abc not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_field_details() {
        let err = Candidate {
            title: String::new(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::Validation(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"]["title"].is_array());
    }

    #[tokio::test]
    async fn test_internal_error_with_details_maps_to_500() {
        let response = AppError::InternalServerErrorWithDetails(
            "Failed to upload image".to_string(),
            serde_json::json!("bucket unreachable"),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to upload image");
        assert_eq!(body["details"], "bucket unreachable");
    }
}
