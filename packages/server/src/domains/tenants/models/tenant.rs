use anyhow::Result;
use chrono::{DateTime, Utc};
use extraction::SelectorSet;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default monthly request quota for new tenants.
pub const DEFAULT_MONTHLY_LIMIT: i32 = 1000;

/// Subscription plan of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "plan_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Basic,
    Pro,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Basic => "basic",
            PlanTier::Pro => "pro",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "basic" => Ok(PlanTier::Basic),
            "pro" => Ok(PlanTier::Pro),
            other => anyhow::bail!("unknown plan tier '{}' (expected free, basic or pro)", other),
        }
    }
}

/// Tenant (mall) record - SQL persistence layer
///
/// Identity and policy for one storefront: the credential its callers
/// present, the origins they may call from, and the selectors used to
/// extract its pages. Read-only from the request path; written by the
/// seeding tool.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct TenantRecord {
    pub id: Uuid,
    pub client_id: String,
    pub shop_name: String,

    #[serde(skip_serializing)]
    pub credential: String,

    pub allowed_origins: Vec<String>,
    pub selector_rules: Json<SelectorSet>,

    // Quota envelope
    pub plan_tier: PlanTier,
    pub monthly_limit: i32,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TenantRecord {
    /// Create an active free-tier tenant with no origins and no rules.
    pub fn new(
        client_id: impl Into<String>,
        shop_name: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.into(),
            shop_name: shop_name.into(),
            credential: credential.into(),
            allowed_origins: Vec::new(),
            selector_rules: Json(SelectorSet::new()),
            plan_tier: PlanTier::default(),
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rule(mut self, field: impl Into<String>, selector: impl Into<String>) -> Self {
        self.selector_rules.0.insert(field.into(), selector.into());
        self
    }

    pub fn with_plan(mut self, plan_tier: PlanTier, monthly_limit: i32) -> Self {
        self.plan_tier = plan_tier;
        self.monthly_limit = monthly_limit;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Field name to selector mapping used for extraction
    pub fn rules(&self) -> &SelectorSet {
        &self.selector_rules.0
    }

    /// Find tenant by credential (exact match)
    pub async fn find_by_credential(credential: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM mall_configs WHERE credential = $1")
            .bind(credential)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert tenant, or replace the policy of the tenant holding the same credential
    pub async fn upsert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO mall_configs (
                id,
                client_id,
                shop_name,
                credential,
                allowed_origins,
                selector_rules,
                plan_tier,
                monthly_limit,
                is_active
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (credential) DO UPDATE SET
                client_id = EXCLUDED.client_id,
                shop_name = EXCLUDED.shop_name,
                allowed_origins = EXCLUDED.allowed_origins,
                selector_rules = EXCLUDED.selector_rules,
                plan_tier = EXCLUDED.plan_tier,
                monthly_limit = EXCLUDED.monthly_limit,
                is_active = EXCLUDED.is_active
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.client_id)
        .bind(&self.shop_name)
        .bind(&self.credential)
        .bind(&self.allowed_origins)
        .bind(&self.selector_rules)
        .bind(self.plan_tier)
        .bind(self.monthly_limit)
        .bind(self.is_active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update active flag
    pub async fn set_active(
        credential: &str,
        is_active: bool,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE mall_configs SET is_active = $2 WHERE credential = $1 RETURNING *",
        )
        .bind(credential)
        .bind(is_active)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
