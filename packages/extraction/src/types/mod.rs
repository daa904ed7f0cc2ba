//! Data types shared by the engines, the orchestrator and their callers.

pub mod request;
pub mod result;
pub mod selector;
