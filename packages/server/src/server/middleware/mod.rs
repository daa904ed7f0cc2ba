// HTTP middleware
pub mod tenant_auth;

pub use tenant_auth::*;
