//! High-level extraction service wrapping the extraction library.
//!
//! Owns the tiered orchestrator (fast engine first, browser fallback) and the
//! browser process behind it, so routes only deal in tenants and URLs.

use anyhow::{Context, Result};
use extraction::{
    ChromiumDriver, DisabledEngine, ExtractionEngine, ExtractionRequest, ExtractionResult,
    FastEngineClient, HeavyEngineClient, Orchestrator, SelectorSet,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domains::tenants::TenantRecord;

/// Tiered page extraction for tenants.
pub struct ExtractionService {
    orchestrator: Orchestrator,
    browser: Option<Arc<ChromiumDriver>>,
}

impl ExtractionService {
    /// Create a service over explicit engines (no browser to manage).
    pub fn from_engines(
        primary: Arc<dyn ExtractionEngine>,
        fallback: Arc<dyn ExtractionEngine>,
    ) -> Self {
        Self {
            orchestrator: Orchestrator::new(primary, fallback),
            browser: None,
        }
    }

    /// Extract `target_url` with the tenant's rules, or `selector_override`
    /// when given.
    pub async fn extract_for_tenant(
        &self,
        tenant: &TenantRecord,
        target_url: &str,
        selector_override: Option<&SelectorSet>,
        user_agent: Option<&str>,
    ) -> ExtractionResult {
        let mut request =
            ExtractionRequest::from_rules(target_url, tenant.rules(), selector_override);
        if let Some(agent) = user_agent {
            request = request.with_user_agent(agent);
        }
        self.orchestrator.run(&request).await
    }

    /// Close the browser process, if one was launched.
    pub async fn shutdown(&self) {
        if let Some(browser) = &self.browser {
            browser.shutdown().await;
        }
    }
}

/// Create a production extraction service from configuration.
///
/// A browser that fails to launch degrades the fallback to a disabled
/// engine rather than failing startup.
pub async fn create_production_service(config: &Config) -> Result<Arc<ExtractionService>> {
    let primary: Arc<dyn ExtractionEngine> = Arc::new(
        FastEngineClient::new(config.fast_engine_url.clone(), config.fast_engine_timeout)
            .context("Failed to create fast engine client")?,
    );

    if !config.heavy_engine_enabled {
        info!("Heavy engine disabled by configuration");
        return Ok(Arc::new(ExtractionService::from_engines(
            primary,
            Arc::new(DisabledEngine::default()),
        )));
    }

    match ChromiumDriver::launch().await {
        Ok(driver) => {
            let driver = Arc::new(driver);
            let heavy = HeavyEngineClient::new(
                driver.clone(),
                config.heavy_engine_timeout,
                config.heavy_engine_max_sessions,
            );
            info!(
                max_sessions = heavy.max_sessions(),
                timeout_ms = heavy.timeout().as_millis() as u64,
                "Heavy engine ready"
            );
            Ok(Arc::new(ExtractionService {
                orchestrator: Orchestrator::new(primary, Arc::new(heavy)),
                browser: Some(driver),
            }))
        }
        Err(e) => {
            warn!(error = %e, "Failed to launch browser, fallback engine disabled");
            Ok(Arc::new(ExtractionService::from_engines(
                primary,
                Arc::new(DisabledEngine::new(format!("browser unavailable: {}", e))),
            )))
        }
    }
}
