//! Usage domain - per-request audit log

pub mod models;

pub use models::usage_record::{cost_units, UsageRecord, FALLBACK_COST_UNITS, PRIMARY_COST_UNITS};
