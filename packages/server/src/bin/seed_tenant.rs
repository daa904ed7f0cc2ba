//! CLI for provisioning a tenant (mall)
//!
//! Inserts or updates one tenant keyed by its credential. With no arguments
//! it recreates the local development tenant.

use anyhow::{Context, Result};
use clap::Parser;
use server_core::config::Config;
use server_core::domains::tenants::{PlanTier, TenantRecord};
use sqlx::postgres::PgPoolOptions;

#[derive(Parser, Debug)]
#[command(name = "seed_tenant")]
#[command(about = "Create or update a mall tenant")]
struct Cli {
    /// Credential callers send in X-API-KEY
    #[arg(long, default_value = "test-key-123")]
    credential: String,

    #[arg(long, default_value = "Test Mall")]
    shop_name: String,

    #[arg(long, default_value = "mall_001")]
    client_id: String,

    /// Allowed origin substring (repeatable)
    #[arg(
        long = "origin",
        default_values_t = [String::from("localhost"), String::from("127.0.0.1")]
    )]
    origins: Vec<String>,

    /// Extraction rule as field=selector (repeatable)
    #[arg(
        long = "rule",
        value_parser = parse_rule,
        default_values = ["title=h1.title", "price=.price"]
    )]
    rules: Vec<(String, String)>,

    /// free, basic or pro
    #[arg(long, default_value = "pro")]
    plan: PlanTier,

    #[arg(long, default_value_t = server_core::domains::tenants::DEFAULT_MONTHLY_LIMIT)]
    monthly_limit: i32,

    /// Create the tenant deactivated
    #[arg(long)]
    inactive: bool,
}

/// Parse `field=selector`. Only the first `=` splits, so selectors may
/// contain attribute tests like `a[rel=next]`.
fn parse_rule(raw: &str) -> Result<(String, String), String> {
    let (field, selector) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=selector, got '{}'", raw))?;

    let (field, selector) = (field.trim(), selector.trim());
    if field.is_empty() || selector.is_empty() {
        return Err(format!("field and selector must be non-empty in '{}'", raw));
    }

    Ok((field.to_string(), selector.to_string()))
}

impl Cli {
    fn into_tenant(self) -> TenantRecord {
        let mut tenant = TenantRecord::new(self.client_id, self.shop_name, self.credential)
            .with_origins(self.origins)
            .with_plan(self.plan, self.monthly_limit);

        for (field, selector) in self.rules {
            tenant = tenant.with_rule(field, selector);
        }

        if self.inactive {
            tenant = tenant.deactivated();
        }
        tenant
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let tenant = cli
        .into_tenant()
        .upsert(&pool)
        .await
        .context("Failed to save tenant")?;

    tracing::info!(
        client_id = %tenant.client_id,
        shop_name = %tenant.shop_name,
        plan = %tenant.plan_tier,
        origins = ?tenant.allowed_origins,
        rules = tenant.rules().len(),
        active = tenant.is_active,
        "Tenant saved"
    );

    pool.close().await;
    Ok(())
}
