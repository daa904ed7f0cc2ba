//! Tiered Page Extraction Library
//!
//! Pulls named fields out of a web page with per-field CSS selectors, trying
//! a cheap HTTP-backed engine first and paying for a full browser only when
//! the cheap result is unusable.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{FastEngineClient, HeavyEngineClient, Orchestrator, SelectorSet};
//! use extraction::testing::MockBrowserDriver;
//!
//! let fast = Arc::new(FastEngineClient::with_defaults()?);
//! let driver = Arc::new(MockBrowserDriver::new());
//! let heavy = Arc::new(HeavyEngineClient::new(driver, Duration::from_secs(10), 2));
//! let orchestrator = Orchestrator::new(fast, heavy);
//!
//! let rules = SelectorSet::from([("title".to_string(), "h1.title".to_string())]);
//! let result = orchestrator.extract(&rules, "https://shop.com/p/1", None).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Engine and browser abstractions
//! - [`types`] - Requests, selectors, results
//! - [`engines`] - Fast (HTTP), heavy (browser) and disabled engines
//! - [`orchestrator`] - Primary/fallback decision procedure
//! - [`testing`] - Mock implementations for testing

pub mod engines;
pub mod error;
pub mod orchestrator;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{BrowserError, BrowserResult, EngineError, EngineResult};
pub use orchestrator::{Escalation, Orchestrator};
pub use traits::{
    browser::{BrowserDriver, BrowserSession},
    engine::ExtractionEngine,
};
pub use types::{
    request::ExtractionRequest,
    result::{is_usable, EngineOutcome, EngineTag, ExtractionResult, FastEngineResponse, FieldMap},
    selector::{normalize_value, SelectorSet, SelectorSpec},
};

pub use engines::{
    DisabledEngine, FastEngineClient, HeavyEngineClient, DEFAULT_FAST_ENGINE_TIMEOUT,
    DEFAULT_FAST_ENGINE_URL, DEFAULT_HEAVY_ENGINE_TIMEOUT, DEFAULT_MAX_SESSIONS,
};

#[cfg(feature = "chromium")]
pub use engines::ChromiumDriver;
