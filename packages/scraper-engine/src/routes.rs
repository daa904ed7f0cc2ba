//! HTTP surface: readiness banner and `POST /scrape`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use extraction::{ExtractionRequest, FastEngineResponse};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::fetch::PageFetcher;
use crate::parse::extract_fields;

/// Shared handler state
#[derive(Clone)]
pub struct EngineState {
    pub fetcher: PageFetcher,
}

impl EngineState {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }
}

/// Build the engine router
pub fn build_app(state: EngineState) -> Router {
    Router::new()
        .route("/", get(ready))
        .route("/scrape", post(scrape))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ready() -> &'static str {
    "Scraper engine is ready"
}

/// Fetch `url` and evaluate the selectors.
///
/// A page that can't be fetched is a 400 with `success: false`; selector
/// problems never fail the request, they just leave that field null.
async fn scrape(
    State(state): State<EngineState>,
    Json(request): Json<ExtractionRequest>,
) -> (StatusCode, Json<FastEngineResponse>) {
    info!(url = %request.target_url, fields = request.selector_set.len(), "Scraping URL");

    let html = match state
        .fetcher
        .fetch(&request.target_url, request.user_agent.as_deref())
        .await
    {
        Ok(html) => html,
        Err(e) => {
            warn!(url = %request.target_url, error = %e, "Fetch failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(FastEngineResponse::error(format!("Failed to fetch URL: {}", e))),
            );
        }
    };

    let data = extract_fields(&html, &request.selector_set);
    (StatusCode::OK, Json(FastEngineResponse::ok(data)))
}
