use std::sync::Arc;
use tracing::{error, warn};

use super::AuthError;
use crate::domains::tenants::TenantRecord;
use crate::kernel::BaseTenantStore;

/// Whether `origin` is permitted by `allowed`.
///
/// An entry matches when it appears anywhere inside the presented origin
/// (substring containment, not equality or suffix match). An empty
/// allow-list permits nothing.
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| origin.contains(entry.as_str()))
}

/// Resolves a request's credential to a tenant and enforces the tenant's
/// active flag and origin allow-list.
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn BaseTenantStore>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn BaseTenantStore>) -> Self {
        Self { store }
    }

    /// Authorize one request.
    ///
    /// Checks run in a fixed order: credential present, credential known,
    /// tenant active, origin allowed. The origin check is skipped when the
    /// caller sent no origin (or an empty one).
    pub async fn authorize(
        &self,
        credential: Option<&str>,
        origin: Option<&str>,
    ) -> Result<TenantRecord, AuthError> {
        let credential = credential
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let tenant = self
            .store
            .find_by_credential(credential)
            .await
            .map_err(|e| {
                error!(error = %e, "Tenant lookup failed");
                AuthError::Store(e)
            })?
            .ok_or(AuthError::InvalidCredential)?;

        if !tenant.is_active {
            return Err(AuthError::InactiveTenant);
        }

        if let Some(origin) = origin.filter(|o| !o.is_empty()) {
            if !origin_allowed(origin, &tenant.allowed_origins) {
                warn!(
                    client_id = %tenant.client_id,
                    origin = %origin,
                    "Blocked request from unauthorized origin"
                );
                return Err(AuthError::OriginNotAllowed {
                    origin: origin.to_string(),
                });
            }
        }

        Ok(tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MemoryTenantStore;
    use proptest::prelude::*;

    fn tenant(origins: &[&str]) -> TenantRecord {
        TenantRecord::new("mall_001", "Test Mall", "abc").with_origins(origins.iter().copied())
    }

    fn gate(tenant: TenantRecord) -> AccessGate {
        AccessGate::new(Arc::new(MemoryTenantStore::new().with_tenant(tenant)))
    }

    #[tokio::test]
    async fn test_allowed_origin_returns_tenant() {
        let gate = gate(tenant(&["shop.com"]));
        let tenant = gate.authorize(Some("abc"), Some("https://shop.com")).await.unwrap();
        assert_eq!(tenant.client_id, "mall_001");
    }

    #[tokio::test]
    async fn test_foreign_origin_rejected() {
        let gate = gate(tenant(&["shop.com"]));
        let err = gate
            .authorize(Some("abc"), Some("https://evil.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::OriginNotAllowed { ref origin } if origin == "https://evil.com"
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_skips_store_lookup() {
        let store = Arc::new(MemoryTenantStore::new().with_tenant(tenant(&["shop.com"])));
        let gate = AccessGate::new(store.clone());

        assert!(matches!(gate.authorize(None, None).await, Err(AuthError::MissingCredential)));
        assert!(matches!(
            gate.authorize(Some(""), Some("https://shop.com")).await,
            Err(AuthError::MissingCredential)
        ));
        assert!(store.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_credential() {
        let store = Arc::new(MemoryTenantStore::new().with_tenant(tenant(&["shop.com"])));
        let gate = AccessGate::new(store.clone());
        assert!(matches!(
            gate.authorize(Some("nope"), Some("https://shop.com")).await,
            Err(AuthError::InvalidCredential)
        ));
        assert_eq!(store.lookups(), vec!["nope".to_string()]);
    }

    #[tokio::test]
    async fn test_inactive_checked_before_origin() {
        let gate = gate(tenant(&["shop.com"]).deactivated());
        assert!(matches!(
            gate.authorize(Some("abc"), Some("https://shop.com")).await,
            Err(AuthError::InactiveTenant)
        ));
        assert!(matches!(
            gate.authorize(Some("abc"), Some("https://evil.com")).await,
            Err(AuthError::InactiveTenant)
        ));
        assert!(matches!(gate.authorize(Some("abc"), None).await, Err(AuthError::InactiveTenant)));
    }

    #[tokio::test]
    async fn test_no_origin_skips_check() {
        let gate = gate(tenant(&[]));
        assert!(gate.authorize(Some("abc"), None).await.is_ok());
        assert!(gate.authorize(Some("abc"), Some("")).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_allow_list_rejects_any_origin() {
        let gate = gate(tenant(&[]));
        assert!(matches!(
            gate.authorize(Some("abc"), Some("http://localhost:3000")).await,
            Err(AuthError::OriginNotAllowed { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let gate = AccessGate::new(Arc::new(MemoryTenantStore::new().failing("connection reset")));
        assert!(matches!(gate.authorize(Some("abc"), None).await, Err(AuthError::Store(_))));
    }

    #[test]
    fn test_substring_matching() {
        let allowed = vec!["localhost".to_string(), "127.0.0.1".to_string()];
        assert!(origin_allowed("http://localhost:3000", &allowed));
        assert!(origin_allowed("http://127.0.0.1:8080", &allowed));
        // Containment, not host equality.
        assert!(origin_allowed("https://localhost.evil.com", &allowed));
        assert!(!origin_allowed("https://shop.com", &allowed));
        assert!(!origin_allowed("https://shop.com", &[]));
    }

    proptest! {
        #[test]
        fn prop_origin_allowed_iff_some_entry_is_substring(
            origin in "[a-z:/.0-9]{0,24}",
            allowed in proptest::collection::vec("[a-z.0-9]{1,8}", 0..4),
        ) {
            let expected = allowed.iter().any(|entry| origin.contains(entry.as_str()));
            prop_assert_eq!(origin_allowed(&origin, &allowed), expected);
            if allowed.is_empty() {
                prop_assert!(!origin_allowed(&origin, &allowed));
            }
        }

        #[test]
        fn prop_inactive_always_rejected(
            origin in proptest::option::of("[a-z:/.]{0,16}"),
            allowed in proptest::collection::vec("[a-z.]{1,8}", 0..3),
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(async {
                let tenant = TenantRecord::new("mall_001", "Test Mall", "abc")
                    .with_origins(allowed.clone())
                    .deactivated();
                gate(tenant).authorize(Some("abc"), origin.as_deref()).await
            });
            prop_assert!(matches!(result, Err(AuthError::InactiveTenant)));
        }

        #[test]
        fn prop_no_origin_skips_check(
            allowed in proptest::collection::vec("[a-z.0-9]{1,8}", 1..4),
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(async {
                let tenant = TenantRecord::new("mall_001", "Test Mall", "abc")
                    .with_origins(allowed.clone());
                gate(tenant).authorize(Some("abc"), None).await
            });
            prop_assert!(result.is_ok());
        }
    }
}
