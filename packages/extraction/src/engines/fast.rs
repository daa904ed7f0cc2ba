//! Fast extraction engine client.
//!
//! Talks to the lightweight extraction backend over HTTP. One request, one
//! short deadline, no retries: if the backend is slow or unhappy the
//! orchestrator escalates instead of waiting.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::traits::engine::ExtractionEngine;
use crate::types::request::ExtractionRequest;
use crate::types::result::{EngineOutcome, FastEngineResponse, FieldMap};

/// Default backend address.
pub const DEFAULT_FAST_ENGINE_URL: &str = "http://localhost:3000/scrape";

/// Default deadline for one fast-engine call.
pub const DEFAULT_FAST_ENGINE_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP client for the fast extraction backend.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::FastEngineClient;
///
/// let endpoint = "http://scraper-engine:3000/scrape";
/// let engine = FastEngineClient::new(endpoint, Duration::from_secs(3))?;
/// let outcome = engine.fetch(&request).await;
/// ```
pub struct FastEngineClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl FastEngineClient {
    /// Create a client for `endpoint` with a fixed per-call deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Network(Box::new(e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Create a client with the default address and deadline.
    pub fn with_defaults() -> EngineResult<Self> {
        Self::new(DEFAULT_FAST_ENGINE_URL, DEFAULT_FAST_ENGINE_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, error: reqwest::Error) -> EngineError {
        if error.is_timeout() {
            EngineError::Timeout(self.timeout)
        } else if error.is_decode() {
            EngineError::BadResponse(error.to_string())
        } else {
            EngineError::Network(Box::new(error))
        }
    }

    async fn try_fetch(&self, request: &ExtractionRequest) -> EngineResult<FieldMap> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::BadResponse(format!("status {}", status.as_u16())));
        }

        let body: FastEngineResponse = response.json().await.map_err(|e| self.classify(e))?;

        if !body.success {
            return Err(EngineError::Reported(
                body.error
                    .unwrap_or_else(|| "engine reported failure".to_string()),
            ));
        }

        Ok(body.data)
    }
}

#[async_trait]
impl ExtractionEngine for FastEngineClient {
    async fn fetch(&self, request: &ExtractionRequest) -> EngineOutcome {
        debug!(url = %request.target_url, fields = request.field_count(), "Fast engine request");

        let result = self.try_fetch(request).await;
        if let Err(ref e) = result {
            warn!(url = %request.target_url, error = %e, "Fast engine failed");
        }

        EngineOutcome::from_result(result)
    }

    fn name(&self) -> &str {
        "fast"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let engine =
            FastEngineClient::new("http://127.0.0.1:9/scrape", Duration::from_millis(500)).unwrap();
        assert_eq!(engine.name(), "fast");
        assert_eq!(engine.endpoint(), "http://127.0.0.1:9/scrape");
        assert_eq!(engine.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_defaults() {
        let engine = FastEngineClient::with_defaults().unwrap();
        assert_eq!(engine.endpoint(), DEFAULT_FAST_ENGINE_URL);
        assert_eq!(engine.timeout(), Duration::from_secs(3));
    }
}
