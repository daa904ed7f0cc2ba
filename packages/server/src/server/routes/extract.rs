use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use extraction::SelectorSet;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domains::usage::{cost_units, UsageRecord};
use crate::server::app::AppState;
use crate::server::middleware::AuthorizedTenant;

pub const EXTRACT_ENDPOINT: &str = "/api/v1/extract";

#[derive(Debug, Deserialize)]
pub struct ExtractPayload {
    pub url: String,
    /// Replaces the tenant's rules for this call when present
    #[serde(default)]
    pub selectors: Option<SelectorSet>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Extract fields from a page of the tenant's storefront.
///
/// Answers 200 with the normalized result whether or not extraction
/// succeeded; 400 only when there is nothing to extract.
pub async fn extract_handler(
    Extension(state): Extension<AppState>,
    AuthorizedTenant(tenant): AuthorizedTenant,
    Json(payload): Json<ExtractPayload>,
) -> Response {
    let url = payload.url.trim();

    let invalid = if url.is_empty() {
        Some("url must not be empty")
    } else if payload.selectors.as_ref().is_some_and(|s| s.is_empty()) {
        Some("selectors must not be empty")
    } else if payload.selectors.is_none() && tenant.rules().is_empty() {
        Some("No selector rules configured for this mall")
    } else {
        None
    };

    if let Some(detail) = invalid {
        state.server_deps.spawn_record(UsageRecord::new(
            tenant.id,
            EXTRACT_ENDPOINT,
            cost_units(None),
            StatusCode::BAD_REQUEST.as_u16(),
        ));
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response();
    }

    let result = state
        .server_deps
        .extraction
        .extract_for_tenant(
            &tenant,
            url,
            payload.selectors.as_ref(),
            payload.user_agent.as_deref(),
        )
        .await;

    info!(
        client_id = %tenant.client_id,
        url = %url,
        engine = %result.engine,
        succeeded = result.succeeded,
        "Extraction finished"
    );

    state.server_deps.spawn_record(UsageRecord::new(
        tenant.id,
        EXTRACT_ENDPOINT,
        cost_units(Some(result.engine)),
        StatusCode::OK.as_u16(),
    ));

    (StatusCode::OK, Json(result)).into_response()
}
