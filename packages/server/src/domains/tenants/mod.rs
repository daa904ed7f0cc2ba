//! Tenants domain - mall identity, origin policy and extraction rules

pub mod models;

pub use models::tenant::{PlanTier, TenantRecord, DEFAULT_MONTHLY_LIMIT};
