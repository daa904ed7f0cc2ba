use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::domains::tenants::PlanTier;
use crate::domains::usage::{cost_units, UsageRecord};
use crate::server::app::AppState;
use crate::server::middleware::AuthorizedTenant;

pub const CHAT_ENDPOINT: &str = "/api/v1/chat";

#[derive(Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub plan: PlanTier,
    pub remaining_quota: i32,
}

/// Greets an authorized tenant and reports its quota envelope.
///
/// Usage is not deducted yet, so the remaining quota is the monthly limit.
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    AuthorizedTenant(tenant): AuthorizedTenant,
) -> Json<ChatResponse> {
    state
        .server_deps
        .spawn_record(UsageRecord::new(tenant.id, CHAT_ENDPOINT, cost_units(None), 200));

    Json(ChatResponse {
        message: format!("Hello, {}!", tenant.shop_name),
        plan: tenant.plan_tier,
        remaining_quota: tenant.monthly_limit,
    })
}
