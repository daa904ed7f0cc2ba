//! Heavy extraction engine client.
//!
//! Drives a browser automation backend: open a page, navigate, wait for the
//! network to settle, then read every selector. Expensive, so the number of
//! concurrently open sessions is capped by a semaphore, and every session is
//! closed on every exit path (success, error, timeout, or the caller
//! dropping the future).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, info};

use crate::error::{EngineError, EngineResult};
use crate::traits::browser::{BrowserDriver, BrowserSession};
use crate::traits::engine::ExtractionEngine;
use crate::types::request::ExtractionRequest;
use crate::types::result::{EngineOutcome, FieldMap};
use crate::types::selector::{normalize_value, SelectorSpec};

/// Default deadline for one heavy-engine attempt.
pub const DEFAULT_HEAVY_ENGINE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on concurrently open browser sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 2;

/// Browser-backed extraction engine.
pub struct HeavyEngineClient {
    driver: Arc<dyn BrowserDriver>,
    timeout: Duration,
    sessions: Arc<Semaphore>,
    max_sessions: usize,
}

impl HeavyEngineClient {
    /// Create an engine over `driver`.
    ///
    /// `timeout` bounds the whole attempt, including the wait for a free
    /// session slot. `max_sessions` is clamped to at least 1.
    pub fn new(driver: Arc<dyn BrowserDriver>, timeout: Duration, max_sessions: usize) -> Self {
        let max_sessions = max_sessions.max(1);
        Self {
            driver,
            timeout,
            sessions: Arc::new(Semaphore::new(max_sessions)),
            max_sessions,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Number of session slots not currently in use.
    pub fn available_sessions(&self) -> usize {
        self.sessions.available_permits()
    }

    async fn try_fetch(&self, request: &ExtractionRequest) -> EngineResult<FieldMap> {
        let permit = self
            .sessions
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EngineError::Cancelled)?;

        let session = self
            .driver
            .open_session(request.user_agent.as_deref())
            .await?;
        let mut guard = SessionGuard::new(session, permit);

        let result = read_fields(guard.session(), request).await;
        guard.close().await;
        result
    }
}

/// Navigate and read every selector. Missing elements become `None`; any
/// browser error aborts the whole pass.
async fn read_fields(
    session: &mut dyn BrowserSession,
    request: &ExtractionRequest,
) -> EngineResult<FieldMap> {
    session.navigate(&request.target_url).await?;
    session.wait_for_network_idle().await?;

    let mut fields = FieldMap::new();
    for (field, expression) in &request.selector_set {
        let spec = SelectorSpec::parse(expression);
        let value = session
            .select_first(&spec)
            .await?
            .map(|raw| normalize_value(&raw));
        if value.is_none() {
            debug!(field = %field, selector = %expression, "Selector matched nothing");
        }
        fields.insert(field.clone(), value);
    }

    Ok(fields)
}

/// Owns an open session and its pool slot.
///
/// `close` releases both in order. If the guard is dropped without
/// `close` (error unwinding, timeout, cancellation) the session is closed on
/// a spawned task and the slot is released once that finishes.
struct SessionGuard {
    session: Option<Box<dyn BrowserSession>>,
    permit: Option<OwnedSemaphorePermit>,
}

impl SessionGuard {
    fn new(session: Box<dyn BrowserSession>, permit: OwnedSemaphorePermit) -> Self {
        Self {
            session: Some(session),
            permit: Some(permit),
        }
    }

    fn session(&mut self) -> &mut dyn BrowserSession {
        self.session
            .as_deref_mut()
            .expect("session is only taken by close or drop")
    }

    async fn close(mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
        self.permit.take();
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let permit = self.permit.take();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    session.close().await;
                    drop(permit);
                });
            }
            Err(_) => {
                error!("Browser session dropped outside a runtime; page left open");
            }
        }
    }
}

#[async_trait]
impl ExtractionEngine for HeavyEngineClient {
    async fn fetch(&self, request: &ExtractionRequest) -> EngineOutcome {
        info!(
            url = %request.target_url,
            fields = request.field_count(),
            driver = self.driver.name(),
            "Heavy engine request"
        );

        let result = match tokio::time::timeout(self.timeout, self.try_fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(self.timeout)),
        };

        if let Err(ref e) = result {
            error!(url = %request.target_url, error = %e, "Heavy engine failed");
        }

        EngineOutcome::from_result(result)
    }

    fn name(&self) -> &str {
        "heavy"
    }
}
