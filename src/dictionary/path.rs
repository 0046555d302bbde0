//! Dot-path lookup with ordered scope-prefix fallback.
//!
//! Translation keys are dot-delimited paths (`"a.b.c"`) resolved against a
//! nested JSON mapping. Each configured scope prefix is tried in order; the
//! first prefix that resolves to a defined value wins. Only an absent path
//! is missing: `null`, `0`, and `""` all count as present.

use serde_json::Value;

/// The default scope list: a single empty prefix.
pub const DEFAULT_SCOPES: &[String] = &[String::new()];

/// Resolve a dot-path against a single scope prefix.
///
/// Walks the dictionary one segment at a time. Fails (returns `None`) if an
/// intermediate segment is not itself a nested mapping.
fn get_scoped<'a>(dict: &'a Value, scope: &str, key: &str) -> Option<&'a Value> {
    let mut current = dict;
    let segments = scope
        .split('.')
        .filter(|s| !s.is_empty())
        .chain(key.split('.'));

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Get the value of a dot-notated key, trying each scope prefix in order.
///
/// Returns the first scope's resolved value that is defined, or `None` if no
/// scope resolves the key.
pub fn get<'a>(dict: &'a Value, key: &str, scopes: &[String]) -> Option<&'a Value> {
    scopes
        .iter()
        .find_map(|scope| get_scoped(dict, scope, key))
}

/// Determine whether the dot-notated key exists under any scope prefix.
pub fn has(dict: &Value, key: &str, scopes: &[String]) -> bool {
    get(dict, key, scopes).is_some()
}
