//! Disallowed text candidate detection.
//!
//! A text candidate is a literal that survives stripping line breaks and
//! trimming, and does not match the configured ignore pattern. Whether a
//! surviving candidate is actually reported depends on the element's
//! classification and ancestry, which the validator decides.

use regex::Regex;

use crate::markup::node::ValueNode;

/// Reduce raw text to a violation candidate.
///
/// Line breaks are removed outright (matching how markup collapses them),
/// then surrounding whitespace is trimmed. Empty results and ignored text
/// yield no candidate.
pub fn disallowed_text(raw: &str, ignore: Option<&Regex>) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\u{2028}' | '\u{2029}'))
        .collect();
    let trimmed = stripped.trim();

    if trimmed.is_empty() {
        return None;
    }
    if let Some(re) = ignore
        && re.is_match(trimmed)
    {
        return None;
    }

    Some(trimmed.to_string())
}

/// Reduce a literal-like value to a violation candidate.
///
/// Only plain string literals qualify; template literals and opaque
/// expressions are never candidates.
pub fn value_candidate(value: &ValueNode, ignore: Option<&Regex>) -> Option<String> {
    match value {
        ValueNode::Literal { value, .. } => disallowed_text(value, ignore),
        _ => None,
    }
}
