//! Engine trait shared by the fast and heavy extraction paths.

use async_trait::async_trait;

use crate::types::request::ExtractionRequest;
use crate::types::result::EngineOutcome;

/// An extraction backend.
///
/// Implementations never return an error: every failure (timeout, transport,
/// malformed body, browser crash) is folded into
/// [`EngineOutcome::Failed`] with a diagnostic string. Field contents are
/// passed through unvalidated; deciding whether they are usable is the
/// orchestrator's job.
///
/// - `FastEngineClient` - lightweight HTTP backend, short fixed deadline
/// - `HeavyEngineClient` - browser automation, bounded session pool
/// - `DisabledEngine` - always fails (heavy path switched off)
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Run one extraction attempt.
    async fn fetch(&self, request: &ExtractionRequest) -> EngineOutcome;

    /// Get the engine name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
