//! Success response envelope shared by all API handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope: `{success: true, data, message?}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` for success responses
    pub success: bool,
    /// The operation's result payload
    pub data: T,
    /// Optional human-readable status message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}
