//! Placeholder engine for deployments without a browser backend.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::traits::engine::ExtractionEngine;
use crate::types::request::ExtractionRequest;
use crate::types::result::EngineOutcome;

/// Engine that always fails. Used in place of the heavy engine when it is
/// switched off, so escalation still ends in a well-formed failure.
pub struct DisabledEngine {
    reason: String,
}

impl DisabledEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for DisabledEngine {
    fn default() -> Self {
        Self::new("fallback engine disabled")
    }
}

#[async_trait]
impl ExtractionEngine for DisabledEngine {
    async fn fetch(&self, _request: &ExtractionRequest) -> EngineOutcome {
        EngineOutcome::from_result(Err(EngineError::Disabled(self.reason.clone())))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails() {
        let engine = DisabledEngine::default();
        let request = ExtractionRequest::new("https://shop.com", Default::default());

        match engine.fetch(&request).await {
            EngineOutcome::Failed { reason } => {
                assert_eq!(reason, "engine disabled: fallback engine disabled")
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
