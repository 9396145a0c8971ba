use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::media::MediaError;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

/// Convert ProjectError to AppError for standardized error responses
impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => AppError::NotFound(format!("Project {} not found", id)),
            ProjectError::Validation(errors) => AppError::Validation(errors),
            ProjectError::InvalidForm(msg) => AppError::BadRequest(msg),
            ProjectError::Media(e @ (MediaError::UnsupportedType(_) | MediaError::TooLarge(_))) => {
                AppError::BadRequest(e.to_string())
            }
            ProjectError::Media(e) => AppError::InternalServerError(e.to_string()),
            ProjectError::Database(e) => AppError::Database(e),
            ProjectError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        // Reuse the shared error envelope
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
