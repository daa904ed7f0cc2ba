//! Fast extraction backend.
//!
//! A small HTTP service: `POST /scrape` fetches one page with a plain HTTP
//! GET (no JavaScript) and evaluates per-field CSS selectors against it.
//! The gateway's `FastEngineClient` is its only caller.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven settings
//! - [`fetch`] - Page download
//! - [`parse`] - Selector evaluation over parsed HTML
//! - [`routes`] - Axum router and handlers
//! - [`shutdown`] - Ctrl-C / SIGTERM handling

pub mod config;
pub mod fetch;
pub mod parse;
pub mod routes;
pub mod shutdown;

pub use config::EngineConfig;
pub use fetch::{FetchError, PageFetcher};
pub use parse::extract_fields;
pub use routes::{build_app, EngineState};
pub use shutdown::shutdown_signal;
