//! Engine implementations.
//!
//! - `FastEngineClient` - HTTP client for the lightweight backend
//! - `HeavyEngineClient` - browser automation over a [`BrowserDriver`](crate::BrowserDriver)
//! - `ChromiumDriver` - headless Chromium driver (requires `chromium` feature)
//! - `DisabledEngine` - always fails

mod disabled;
mod fast;
mod heavy;

#[cfg(feature = "chromium")]
mod chromium;

pub use disabled::DisabledEngine;
pub use fast::{FastEngineClient, DEFAULT_FAST_ENGINE_TIMEOUT, DEFAULT_FAST_ENGINE_URL};
pub use heavy::{HeavyEngineClient, DEFAULT_HEAVY_ENGINE_TIMEOUT, DEFAULT_MAX_SESSIONS};

#[cfg(feature = "chromium")]
pub use chromium::ChromiumDriver;
