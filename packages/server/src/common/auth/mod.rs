/// Access gate for tenant-scoped endpoints
///
/// Resolves the caller's credential to a tenant, then enforces the tenant's
/// active flag and origin allow-list:
///
/// ```rust,ignore
/// use server_core::common::auth::AccessGate;
///
/// let gate = AccessGate::new(deps.tenant_store.clone());
/// let tenant = gate.authorize(Some("test-key-123"), Some("http://localhost:3000")).await?;
/// ```
mod errors;
mod gate;

pub use errors::AuthError;
pub use gate::{origin_allowed, AccessGate};
