//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::auth::AccessGate;
use crate::kernel::ServerDeps;
use crate::server::middleware::API_KEY_HEADER;
use crate::server::routes::{
    chat_handler, extract_handler, health_handler, root_handler, CHAT_ENDPOINT, EXTRACT_ENDPOINT,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub gate: AccessGate,
    pub project_name: String,
}

impl AppState {
    pub fn new(server_deps: ServerDeps, project_name: impl Into<String>) -> Self {
        let gate = AccessGate::new(server_deps.tenant_store.clone());
        Self {
            db_pool: server_deps.db_pool.clone(),
            server_deps: Arc::new(server_deps),
            gate,
            project_name: project_name.into(),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // Origins are enforced per tenant by the access gate, not here.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([HeaderName::from_static(API_KEY_HEADER), CONTENT_TYPE]);

    let chat_with_slash = format!("{}/", CHAT_ENDPOINT);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(CHAT_ENDPOINT, post(chat_handler))
        .route(&chat_with_slash, post(chat_handler))
        .route(EXTRACT_ENDPOINT, post(extract_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
