//! Server dependencies for handlers (using traits for testability)
//!
//! This module provides the central dependency container used by routes and
//! the access gate. Storage sits behind Base* traits so tests can swap in
//! the in-memory implementations from `test_dependencies`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domains::tenants::TenantRecord;
use crate::domains::usage::UsageRecord;
use crate::kernel::{extraction_service::ExtractionService, BaseTenantStore, BaseUsageRecorder};

// =============================================================================
// Postgres adapters (implement Base* traits over the model methods)
// =============================================================================

/// Tenant lookups against the `mall_configs` table
pub struct PostgresTenantStore(pub PgPool);

impl PostgresTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }
}

#[async_trait]
impl BaseTenantStore for PostgresTenantStore {
    async fn find_by_credential(&self, credential: &str) -> Result<Option<TenantRecord>> {
        TenantRecord::find_by_credential(credential, &self.0).await
    }
}

/// Usage records appended to the `usage_logs` table
pub struct PostgresUsageRecorder(pub PgPool);

impl PostgresUsageRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }
}

#[async_trait]
impl BaseUsageRecorder for PostgresUsageRecorder {
    async fn record(&self, entry: UsageRecord) -> Result<()> {
        entry.insert(&self.0).await.map(|_| ())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub tenant_store: Arc<dyn BaseTenantStore>,
    pub usage_recorder: Arc<dyn BaseUsageRecorder>,
    pub extraction: Arc<ExtractionService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        tenant_store: Arc<dyn BaseTenantStore>,
        usage_recorder: Arc<dyn BaseUsageRecorder>,
        extraction: Arc<ExtractionService>,
    ) -> Self {
        Self {
            db_pool,
            tenant_store,
            usage_recorder,
            extraction,
        }
    }

    /// Postgres-backed stores over `pool`
    pub fn postgres(pool: PgPool, extraction: Arc<ExtractionService>) -> Self {
        Self::new(
            pool.clone(),
            Arc::new(PostgresTenantStore::new(pool.clone())),
            Arc::new(PostgresUsageRecorder::new(pool)),
            extraction,
        )
    }

    /// Record usage without holding up the response.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn spawn_record(&self, entry: UsageRecord) {
        let recorder = self.usage_recorder.clone();
        tokio::spawn(async move {
            let tenant_id = entry.tenant_id;
            let endpoint = entry.endpoint.clone();
            if let Err(e) = recorder.record(entry).await {
                warn!(
                    tenant_id = %tenant_id,
                    endpoint = %endpoint,
                    error = %e,
                    "Failed to record usage"
                );
            }
        });
    }
}
