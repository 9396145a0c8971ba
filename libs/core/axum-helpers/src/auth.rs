//! Admin allowlist guard.
//!
//! Authentication itself is an upstream collaborator (OAuth proxy or auth
//! gateway) that terminates the sign-in flow and forwards the verified
//! identity in a request header. This module only decides whether that
//! identity may reach admin routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{env_required, ConfigError, FromEnv};

use crate::errors::AppError;

/// Header carrying the upstream-verified identity (email).
pub const IDENTITY_HEADER: &str = "x-authenticated-email";

/// Process-wide allowlist of admin identities, read once at startup.
#[derive(Clone, Debug)]
pub struct AdminAllowlist {
    emails: Vec<String>,
}

impl AdminAllowlist {
    pub fn new(emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.into().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Check whether an identity is allowlisted (case-insensitive).
    pub fn is_allowed(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.emails.iter().any(|allowed| *allowed == email)
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl FromEnv for AdminAllowlist {
    /// Reads `ADMIN_EMAILS` as a comma-separated list. Required: a service
    /// with no admins cannot serve its admin routes.
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_required("ADMIN_EMAILS")?;
        let allowlist = Self::new(raw.split(','));

        if allowlist.is_empty() {
            return Err(ConfigError::ParseError {
                key: "ADMIN_EMAILS".to_string(),
                details: "must contain at least one email".to_string(),
            });
        }

        Ok(allowlist)
    }
}

/// Middleware guarding admin routes.
///
/// Returns 401 when the identity header is missing or unreadable, and 403
/// when the identity is not on the allowlist.
pub async fn admin_guard(
    State(allowlist): State<AdminAllowlist>,
    request: Request,
    next: Next,
) -> Response {
    let identity = request
        .headers()
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok());

    match identity {
        None => AppError::Unauthorized("Authentication required".to_string()).into_response(),
        Some(email) if !allowlist.is_allowed(email) => {
            tracing::warn!(email = %email, "Rejected non-allowlisted identity on admin route");
            AppError::Forbidden("Access denied".to_string()).into_response()
        }
        Some(_) => next.run(request).await,
    }
}
