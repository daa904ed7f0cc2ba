//! Selector expressions.
//!
//! A selector is a CSS selector, optionally suffixed with `::attr(NAME)` to
//! read an attribute of the first match instead of its visible text:
//!
//! ```
//! use extraction::SelectorSpec;
//!
//! let spec = SelectorSpec::parse("img.hero::attr(src)");
//! assert_eq!(spec.css, "img.hero");
//! assert_eq!(spec.attribute.as_deref(), Some("src"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from field name to selector expression.
pub type SelectorSet = BTreeMap<String, String>;

const ATTR_PREFIX: &str = "::attr(";

/// A parsed selector expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSpec {
    /// CSS part used to locate the element
    pub css: String,

    /// Attribute to read; `None` reads the element's visible text
    pub attribute: Option<String>,
}

impl SelectorSpec {
    /// Parse a selector expression. Never fails: anything without a
    /// well-formed `::attr(..)` suffix is taken as plain CSS.
    pub fn parse(expression: &str) -> Self {
        let expression = expression.trim();

        if let Some(idx) = expression.rfind(ATTR_PREFIX) {
            let rest = &expression[idx + ATTR_PREFIX.len()..];
            if let Some(name) = rest.strip_suffix(')') {
                let name = name.trim();
                if !name.is_empty() {
                    return Self {
                        css: expression[..idx].trim().to_string(),
                        attribute: Some(name.to_string()),
                    };
                }
            }
        }

        Self {
            css: expression.to_string(),
            attribute: None,
        }
    }
}

/// Normalize a value read from a page: surrounding whitespace is dropped.
///
/// Applied to text and attribute values alike, by every engine.
pub fn normalize_value(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_css() {
        let spec = SelectorSpec::parse("  h1.title ");
        assert_eq!(spec.css, "h1.title");
        assert!(spec.attribute.is_none());
    }

    #[test]
    fn test_attribute_suffix() {
        let spec = SelectorSpec::parse("div.gallery img::attr(data-src)");
        assert_eq!(spec.css, "div.gallery img");
        assert_eq!(spec.attribute.as_deref(), Some("data-src"));
    }

    #[test]
    fn test_malformed_suffix_is_plain_css() {
        let spec = SelectorSpec::parse("img::attr(");
        assert_eq!(spec.css, "img::attr(");
        assert!(spec.attribute.is_none());

        let spec = SelectorSpec::parse("img::attr()");
        assert!(spec.attribute.is_none());
    }

    #[test]
    fn test_normalize_value_trims() {
        assert_eq!(normalize_value("  /img/a.png\n"), "/img/a.png");
        assert_eq!(normalize_value("\t$10 "), "$10");
        assert_eq!(normalize_value("   "), "");
    }
}
