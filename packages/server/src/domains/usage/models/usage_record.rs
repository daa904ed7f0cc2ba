use anyhow::Result;
use chrono::{DateTime, Utc};
use extraction::EngineTag;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Cost of an answer served by the fast engine.
pub const PRIMARY_COST_UNITS: i32 = 1;

/// Cost of an answer that needed the browser engine.
pub const FALLBACK_COST_UNITS: i32 = 5;

/// Usage log entry - SQL persistence layer
///
/// One row per completed gated request. Appended only.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub endpoint: String,
    pub cost_units: i32,
    pub status_code: i32,
    pub timestamp: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(
        tenant_id: Uuid,
        endpoint: impl Into<String>,
        cost_units: i32,
        status_code: u16,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            endpoint: endpoint.into(),
            cost_units,
            status_code: i32::from(status_code),
            timestamp: Utc::now(),
        }
    }

    /// Insert new usage record
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO usage_logs (id, tenant_id, endpoint, cost_units, status_code, timestamp)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.tenant_id)
        .bind(&self.endpoint)
        .bind(self.cost_units)
        .bind(self.status_code)
        .bind(self.timestamp)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find usage records for a tenant, newest first
    pub async fn find_by_tenant(tenant_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM usage_logs WHERE tenant_id = $1 ORDER BY timestamp DESC",
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

/// Cost units charged for a request, given the engine stage that answered.
///
/// `None` means no engine ran (chat, rejected input).
pub fn cost_units(engine: Option<EngineTag>) -> i32 {
    match engine {
        None => 0,
        Some(tag) if tag.is_fallback() => FALLBACK_COST_UNITS,
        Some(_) => PRIMARY_COST_UNITS,
    }
}
