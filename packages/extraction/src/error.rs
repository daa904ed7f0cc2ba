//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! engine failures apart in logs. None of these cross the orchestrator
//! boundary as control flow: engines turn them into
//! [`EngineOutcome::Failed`](crate::EngineOutcome) diagnostics.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while an engine attempts an extraction.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine did not answer within its deadline
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Transport-level failure (connection refused, reset, DNS)
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success status code or a body that is not the expected shape
    #[error("bad response: {0}")]
    BadResponse(String),

    /// The engine answered but reported its own failure
    #[error("{0}")]
    Reported(String),

    /// Browser automation failed
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// The engine is not available in this deployment
    #[error("engine disabled: {0}")]
    Disabled(String),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors raised by a browser automation backend.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Browser process could not be started
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Page could not be opened or configured
    #[error("failed to open page: {0}")]
    Session(String),

    /// Navigation failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// DOM query or read failed
    #[error("query `{selector}` failed: {reason}")]
    Query { selector: String, reason: String },

    /// Script evaluation failed
    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Result type alias for browser operations.
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;
