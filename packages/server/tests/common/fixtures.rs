//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use server_core::domains::tenants::{PlanTier, TenantRecord};
use sqlx::PgPool;
use uuid::Uuid;

/// Tenant with the standard product rules (`title`, `price`).
pub fn test_tenant(credential: &str, origins: &[&str]) -> TenantRecord {
    TenantRecord::new(
        format!("mall_{}", Uuid::new_v4().simple()),
        "Test Mall",
        credential,
    )
    .with_origins(origins.iter().copied())
    .with_rule("title", "h1.title")
    .with_rule("price", ".price")
    .with_plan(PlanTier::Pro, 1000)
}

/// Persist a test tenant and return the stored row
pub async fn create_test_tenant(
    pool: &PgPool,
    credential: &str,
    origins: &[&str],
) -> Result<TenantRecord> {
    test_tenant(credential, origins).upsert(pool).await
}

/// A credential no other test uses
pub fn unique_credential() -> String {
    format!("key-{}", Uuid::new_v4())
}
