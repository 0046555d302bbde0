//! Pluralization key-form matching.
//!
//! A pluralized dictionary value that is a mapping must carry one of the
//! accepted key-form templates in full. Anything less is judged by a
//! best-effort policy: among templates with a partial match, the one with
//! the fewest missing members wins, catalog order breaking ties.

use serde_json::{Map, Value};

/// Accepted key-form templates, in catalog order.
pub const PLURAL_KEY_FORMS: &[&[&str]] = &[
    &["singular", "plural"],
    &["none", "one", "many"],
    &["zero", "one", "other"],
];

/// Outcome of matching a mapping against the key-form catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFormMatch {
    /// Some template's full member set is present.
    Valid,
    /// The best partial match, with its missing member names.
    Partial { missing: Vec<String> },
    /// No template has even one member present.
    Unrecognized,
}

/// Match a pluralized mapping against the key-form catalog.
pub fn match_key_forms(mapping: &Map<String, Value>) -> KeyFormMatch {
    let mut best: Option<Vec<String>> = None;

    for form in PLURAL_KEY_FORMS {
        let missing: Vec<String> = form
            .iter()
            .filter(|member| !mapping.contains_key(**member))
            .map(|member| member.to_string())
            .collect();

        if missing.is_empty() {
            return KeyFormMatch::Valid;
        }

        // A partial match has at least one member present.
        if missing.len() < form.len()
            && best.as_ref().is_none_or(|b| missing.len() < b.len())
        {
            best = Some(missing);
        }
    }

    match best {
        Some(missing) => KeyFormMatch::Partial { missing },
        None => KeyFormMatch::Unrecognized,
    }
}
