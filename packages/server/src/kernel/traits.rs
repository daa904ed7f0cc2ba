// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Authorization policy lives in common::auth and uses these traits.
//
// Naming convention: Base* for trait names (e.g., BaseTenantStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::tenants::TenantRecord;
use crate::domains::usage::UsageRecord;

// =============================================================================
// Tenant Store Trait (Infrastructure - point lookup by credential)
// =============================================================================

#[async_trait]
pub trait BaseTenantStore: Send + Sync {
    /// Find the tenant whose credential equals `credential` exactly
    async fn find_by_credential(&self, credential: &str) -> Result<Option<TenantRecord>>;
}

// =============================================================================
// Usage Recorder Trait (Infrastructure - append-only audit log)
// =============================================================================

#[async_trait]
pub trait BaseUsageRecorder: Send + Sync {
    /// Persist one usage record
    async fn record(&self, entry: UsageRecord) -> Result<()>;
}
