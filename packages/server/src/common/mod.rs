// Common types and utilities shared across domains

pub mod auth;

pub use auth::{AccessGate, AuthError};
