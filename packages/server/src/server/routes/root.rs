use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
}

/// Liveness banner
pub async fn root_handler(Extension(state): Extension<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} API is running", state.project_name),
    })
}
