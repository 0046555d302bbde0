//! Template field detection.
//!
//! Translations may carry `{{...}}` placeholders that require field data at
//! render time. The validator cross-checks placeholder presence against the
//! component's fields attribute, per language.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{.*\}\}").expect("template field regex"));

/// True when the string contains a `{{...}}` placeholder.
pub fn has_template_fields(text: &str) -> bool {
    TEMPLATE_RE.is_match(text)
}

/// Normalize a resolved translation value to its candidate strings.
///
/// For pluralized values the candidates are the mapping's own string values
/// (or the array's string elements); otherwise the value itself if it is a
/// string. Non-string members are never candidates.
pub fn candidate_values(value: Option<&Value>, pluralized: bool) -> Vec<&str> {
    match (pluralized, value) {
        (true, Some(Value::Array(items))) => items.iter().filter_map(Value::as_str).collect(),
        (true, Some(Value::Object(map))) => map.values().filter_map(Value::as_str).collect(),
        (true, _) => Vec::new(),
        (false, Some(v)) => v.as_str().into_iter().collect(),
        (false, None) => Vec::new(),
    }
}

/// True when any candidate string requires template field data.
pub fn requires_fields(value: Option<&Value>, pluralized: bool) -> bool {
    candidate_values(value, pluralized)
        .iter()
        .any(|candidate| has_template_fields(candidate))
}
