// Mall Extraction Gateway - API Core
//
// Multi-tenant front door for storefront page extraction: every request is
// resolved to a mall (tenant) and checked against its origin policy before
// the tiered extraction engines run.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
