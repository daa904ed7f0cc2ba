use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ORIGIN, request::Parts, HeaderMap},
};
use std::borrow::Cow;

use crate::common::auth::AuthError;
use crate::domains::tenants::TenantRecord;
use crate::server::app::AppState;

/// Header carrying the tenant credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// Tenant resolved by the access gate
///
/// Extracting this runs the gate: handlers that take it only execute for
/// authorized callers, everything else is answered with the gate's rejection.
#[derive(Clone, Debug)]
pub struct AuthorizedTenant(pub TenantRecord);

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedTenant
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<AppState>()
            .cloned()
            .ok_or_else(|| AuthError::Store(anyhow::anyhow!("application state not installed")))?;

        let credential = header_value(&parts.headers, API_KEY_HEADER);
        let origin = header_value(&parts.headers, ORIGIN.as_str());

        state
            .gate
            .authorize(credential.as_deref(), origin.as_deref())
            .await
            .map(AuthorizedTenant)
    }
}

/// Read a header as text. Non-UTF-8 bytes are replaced rather than dropped,
/// so a malformed origin is still checked instead of skipped.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("test-key-123"));

        assert_eq!(header_value(&headers, API_KEY_HEADER).as_deref(), Some("test-key-123"));
        assert!(header_value(&headers, "origin").is_none());
    }

    #[test]
    fn test_non_utf8_origin_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_bytes(b"http://shop\xff.com").unwrap());

        let origin = header_value(&headers, ORIGIN.as_str()).unwrap();
        assert!(origin.starts_with("http://shop"));
    }
}
