//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod extraction_service;
pub mod test_dependencies;
pub mod traits;

// Extraction library integration
pub use extraction_service::{create_production_service, ExtractionService};

// Other exports
pub use deps::{PostgresTenantStore, PostgresUsageRecorder, ServerDeps};
pub use test_dependencies::{MemoryTenantStore, MemoryUsageRecorder, TestDependencies};
pub use traits::*;
