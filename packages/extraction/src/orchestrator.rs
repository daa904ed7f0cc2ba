//! Tiered extraction: fast engine first, heavy engine only when needed.
//!
//! ```text
//! INIT -> PRIMARY_ATTEMPT -> ACCEPTED                       -> DONE
//!                         -> ESCALATE -> FALLBACK_ATTEMPT   -> DONE
//! ```
//!
//! The fast result is accepted only if at least one field carries a
//! non-empty value. Anything else (failure, all-null, no fields) escalates
//! once to the fallback engine, whose outcome is returned as-is. Attempts
//! run strictly one after the other, so the worst case is bounded by the sum
//! of the two engines' deadlines.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::EngineError;
use crate::traits::engine::ExtractionEngine;
use crate::types::request::ExtractionRequest;
use crate::types::result::{is_usable, EngineOutcome, EngineTag, ExtractionResult};
use crate::types::selector::SelectorSet;

/// Why the orchestrator paid for the fallback engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Escalation {
    /// The fast engine failed outright
    PrimaryFailed(String),
    /// The fast engine succeeded but produced no usable value
    NoUsableData,
}

impl std::fmt::Display for Escalation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrimaryFailed(reason) => write!(f, "primary failed: {}", reason),
            Self::NoUsableData => f.write_str("primary returned no usable data"),
        }
    }
}

/// Composes a primary and a fallback engine into one decision procedure.
///
/// Holds no per-call state; one instance is shared by all requests.
#[derive(Clone)]
pub struct Orchestrator {
    primary: Arc<dyn ExtractionEngine>,
    fallback: Arc<dyn ExtractionEngine>,
}

impl Orchestrator {
    pub fn new(primary: Arc<dyn ExtractionEngine>, fallback: Arc<dyn ExtractionEngine>) -> Self {
        Self { primary, fallback }
    }

    /// Extract `target_url` using `rules`, or `selector_override` when given.
    pub async fn extract(
        &self,
        rules: &SelectorSet,
        target_url: &str,
        selector_override: Option<&SelectorSet>,
    ) -> ExtractionResult {
        let request = ExtractionRequest::from_rules(target_url, rules, selector_override);
        self.run(&request).await
    }

    /// [`extract`](Self::extract) that stops early when `cancel` fires.
    pub async fn extract_with_cancel(
        &self,
        rules: &SelectorSet,
        target_url: &str,
        selector_override: Option<&SelectorSet>,
        cancel: &CancellationToken,
    ) -> ExtractionResult {
        let request = ExtractionRequest::from_rules(target_url, rules, selector_override);
        self.run_with_cancel(&request, cancel).await
    }

    /// Run a prepared request through both tiers.
    pub async fn run(&self, request: &ExtractionRequest) -> ExtractionResult {
        self.run_with_cancel(request, &CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), but gives up as soon as `cancel` fires.
    ///
    /// A cancelled attempt is dropped mid-flight (the heavy engine releases
    /// its browser session on drop) and reported as a failure tagged with
    /// the stage that was running.
    pub async fn run_with_cancel(
        &self,
        request: &ExtractionRequest,
        cancel: &CancellationToken,
    ) -> ExtractionResult {
        info!(
            url = %request.target_url,
            fields = request.field_count(),
            engine = self.primary.name(),
            "Attempting primary extraction"
        );

        let Some(primary) = attempt(self.primary.as_ref(), request, cancel).await else {
            return ExtractionResult::failed(
                EngineError::Cancelled.to_string(),
                EngineTag::PrimaryError,
            );
        };

        let escalation = match primary {
            EngineOutcome::Succeeded { fields } if is_usable(&fields) => {
                info!(url = %request.target_url, "Primary extraction accepted");
                return ExtractionResult::accepted(fields, EngineTag::Primary);
            }
            EngineOutcome::Succeeded { .. } => Escalation::NoUsableData,
            EngineOutcome::Failed { reason } => Escalation::PrimaryFailed(reason),
        };

        warn!(
            url = %request.target_url,
            reason = %escalation,
            engine = self.fallback.name(),
            "Escalating to fallback extraction"
        );

        let Some(fallback) = attempt(self.fallback.as_ref(), request, cancel).await else {
            return ExtractionResult::failed(
                EngineError::Cancelled.to_string(),
                EngineTag::FallbackError,
            );
        };

        let result = ExtractionResult::from_fallback(fallback);
        match &result.error {
            Some(e) => error!(url = %request.target_url, error = %e, "Fallback extraction failed"),
            None => info!(url = %request.target_url, "Fallback extraction succeeded"),
        }
        result
    }
}

/// One engine call, abandoned if `cancel` fires first.
async fn attempt(
    engine: &dyn ExtractionEngine,
    request: &ExtractionRequest,
    cancel: &CancellationToken,
) -> Option<EngineOutcome> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(url = %request.target_url, engine = engine.name(), "Extraction cancelled");
            None
        }
        outcome = engine.fetch(request) => Some(outcome),
    }
}
