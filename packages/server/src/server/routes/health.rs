//! Readiness: is the tenant store answering?

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tracing::warn;

use crate::server::app::AppState;

/// Upper bound on the store ping.
pub const STORE_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tenant_store: StoreStatus,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 200 when the tenant store answers a trivial query in time, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match ping_store(&state.db_pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                tenant_store: StoreStatus {
                    reachable: true,
                    error: None,
                },
            }),
        ),
        Err(error) => {
            warn!(error = %error, "Tenant store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    tenant_store: StoreStatus {
                        reachable: false,
                        error: Some(error),
                    },
                }),
            )
        }
    }
}

async fn ping_store(pool: &PgPool) -> Result<(), String> {
    let ping = sqlx::query("SELECT 1").execute(pool);
    match tokio::time::timeout(STORE_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("no answer within {}s", STORE_PING_TIMEOUT.as_secs())),
    }
}
