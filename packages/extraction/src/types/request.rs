//! Extraction requests.

use serde::{Deserialize, Serialize};

use super::selector::SelectorSet;

/// One unit of extraction work.
///
/// Built once per call from a tenant's selector rules (or an explicit
/// override) and not modified afterwards. The serialized form is the wire
/// payload sent to the fast extraction backend:
///
/// ```json
/// {"url": "https://shop.com/p/1", "selectors": {"title": "h1"}, "user_agent": null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Page to extract from
    #[serde(rename = "url")]
    pub target_url: String,

    /// Field name to selector expression
    #[serde(rename = "selectors")]
    pub selector_set: SelectorSet,

    /// Optional User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ExtractionRequest {
    /// Create a request for a URL and selector set.
    pub fn new(target_url: impl Into<String>, selector_set: SelectorSet) -> Self {
        Self {
            target_url: target_url.into(),
            selector_set,
            user_agent: None,
        }
    }

    /// Build a request from a tenant's rules, letting an explicit override
    /// replace them wholesale.
    pub fn from_rules(
        target_url: impl Into<String>,
        rules: &SelectorSet,
        selector_override: Option<&SelectorSet>,
    ) -> Self {
        let selector_set = selector_override.unwrap_or(rules).clone();
        Self::new(target_url, selector_set)
    }

    /// Set the User-Agent override.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Number of fields requested.
    pub fn field_count(&self) -> usize {
        self.selector_set.len()
    }
}
