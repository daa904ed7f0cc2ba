//! Selector evaluation over parsed HTML.

use extraction::{normalize_value, FieldMap, SelectorSet, SelectorSpec};
use scraper::{Html, Selector};
use tracing::warn;

/// Evaluate every selector in `selectors` against `html`.
///
/// Each field maps to the first matching element's text (text nodes joined
/// with spaces, then trimmed) or, for `::attr(NAME)` selectors, that
/// attribute's value. Fields whose selector matches nothing, or doesn't
/// parse as CSS, map to `None`.
pub fn extract_fields(html: &str, selectors: &SelectorSet) -> FieldMap {
    let document = Html::parse_document(html);

    selectors
        .iter()
        .map(|(field, expression)| (field.clone(), evaluate(&document, field, expression)))
        .collect()
}

fn evaluate(document: &Html, field: &str, expression: &str) -> Option<String> {
    let spec = SelectorSpec::parse(expression);

    let selector = match Selector::parse(&spec.css) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(field = %field, selector = %expression, error = %e, "Invalid CSS selector");
            return None;
        }
    };

    let element = document.select(&selector).next()?;

    match spec.attribute.as_deref() {
        Some(name) => element.value().attr(name).map(normalize_value),
        None => Some(normalize_value(&element.text().collect::<Vec<_>>().join(" "))),
    }
}
