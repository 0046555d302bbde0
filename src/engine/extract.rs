//! Key extraction from classified components.
//!
//! Pulls the literal key out of a component's id attribute and captures the
//! plural/fields attributes unevaluated. Template ids go through a narrow
//! static evaluator: every interpolation must be a bare identifier bound to
//! exactly one literal initializer in the element's scope chain, or the
//! whole extraction is inconclusive and the node is silently skipped.
//! Extraction never guesses: a partial resolution is a failed resolution.

use crate::markup::node::{Attribute, AttributeEntry, Element, TemplatePart, ValueNode};
use crate::markup::scopes::{ScopeId, ScopeTable};

use super::classify::ResolvedComponent;

/// The i18n-relevant attributes of one element.
#[derive(Debug, Default)]
pub struct I18nAttributes<'a> {
    /// The id attribute, set only when its value yielded a key.
    pub id: Option<&'a Attribute>,
    /// The extracted key.
    pub key: Option<String>,
    /// The plural attribute, captured unevaluated.
    pub plural: Option<&'a Attribute>,
    /// The fields attribute, captured unevaluated.
    pub fields: Option<&'a Attribute>,
}

impl I18nAttributes<'_> {
    pub fn plural_declared(&self) -> bool {
        self.plural.is_some()
    }

    /// A fields attribute was written on the element, in any form.
    pub fn fields_supplied(&self) -> bool {
        self.fields.is_some()
    }

    /// A fields attribute was supplied with something other than the bare
    /// identifier `undefined`.
    pub fn fields_usable(&self) -> bool {
        self.fields
            .is_some_and(|attr| !attr.value.is_undefined_ident())
    }
}

/// Extract the key and the plural/fields attribute nodes from an element.
///
/// Spread attributes are ignored: they can never be statically resolved.
pub fn extract<'a>(
    element: &'a Element,
    component: &ResolvedComponent,
    scopes: &ScopeTable,
) -> I18nAttributes<'a> {
    let mut result = I18nAttributes::default();

    for entry in &element.attributes {
        let AttributeEntry::Named(attr) = entry else {
            continue;
        };

        if attr.name == component.id {
            match &attr.value {
                ValueNode::Literal { value, .. } => {
                    result.id = Some(attr);
                    result.key = Some(value.clone());
                }
                ValueNode::Template { parts, .. } => {
                    if let Some(key) = resolve_template(parts, element.scope, scopes) {
                        result.id = Some(attr);
                        result.key = Some(key);
                    }
                }
                _ => {}
            }
        } else if attr.name == component.plural {
            result.plural = Some(attr);
        } else if attr.name == component.fields {
            result.fields = Some(attr);
        }
    }

    result
}

/// Resolve a template literal to a key by substituting interpolations.
///
/// Succeeds only when every interpolation is a bare identifier with a
/// unique literal initializer; any opaque part aborts the resolution.
pub fn resolve_template(
    parts: &[TemplatePart],
    scope: ScopeId,
    scopes: &ScopeTable,
) -> Option<String> {
    let mut key = String::new();
    for part in parts {
        match part {
            TemplatePart::Str(text) => key.push_str(text),
            TemplatePart::Interp(name) => key.push_str(scopes.lookup_literal(scope, name)?),
            TemplatePart::Opaque => return None,
        }
    }
    Some(key)
}
