use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejections produced by the access gate
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("API Key is missing")]
    MissingCredential,

    /// Covers both unknown and wrong credentials, so callers cannot enumerate
    /// which credentials exist.
    #[error("Invalid API Key")]
    InvalidCredential,

    #[error("Mall account is inactive")]
    InactiveTenant,

    #[error("Origin '{origin}' is not allowed")]
    OriginNotAllowed { origin: String },

    #[error("Tenant store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl AuthError {
    /// HTTP status for this rejection: 401 for "who are you", 403 for
    /// "you may not".
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredential
            | AuthError::InactiveTenant
            | AuthError::OriginNotAllowed { .. } => StatusCode::FORBIDDEN,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            // Store failures are logged by the gate; never leak them.
            AuthError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
