//! Component classification.
//!
//! Decides whether an element is an i18n component and which attribute
//! names carry its key, plural, and fields data. Pattern lists are ordered
//! and scanned linearly: earlier, more specific patterns shadow later,
//! more general ones, so first match wins.

use regex::Regex;

use crate::markup::node::Element;

pub const DEFAULT_ID_ATTR: &str = "id";
pub const DEFAULT_PLURAL_ATTR: &str = "plural";
pub const DEFAULT_FIELDS_ATTR: &str = "fields";

/// A compiled matching rule plus optional attribute-name overrides.
#[derive(Debug)]
pub struct ComponentPattern {
    pub name_regex: Regex,
    pub id: Option<String>,
    pub plural: Option<String>,
    pub fields: Option<String>,
}

/// The attribute names that apply to a matched component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub id: String,
    pub plural: String,
    pub fields: String,
}

/// Match an element against an ordered pattern list.
///
/// An element without a simple name never matches. The first pattern whose
/// regex matches the name wins; its overrides are merged with the default
/// attribute names.
pub fn classify(element: &Element, patterns: &[ComponentPattern]) -> Option<ResolvedComponent> {
    let name = element.name.as_deref()?;
    let pattern = patterns.iter().find(|p| p.name_regex.is_match(name))?;
    Some(ResolvedComponent {
        id: pattern.id.clone().unwrap_or_else(|| DEFAULT_ID_ATTR.to_string()),
        plural: pattern
            .plural
            .clone()
            .unwrap_or_else(|| DEFAULT_PLURAL_ATTR.to_string()),
        fields: pattern
            .fields
            .clone()
            .unwrap_or_else(|| DEFAULT_FIELDS_ATTR.to_string()),
    })
}
