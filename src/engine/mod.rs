//! The validation engine.
//!
//! One synchronous pass per document: each element is classified, its key
//! extracted, and the key judged against every configured language; the
//! disallowed-text scanner runs over the same traversal with its own
//! exemption logic. The engine never mutates the tree and no condition in
//! it aborts the run.
//!
//! ## Module Structure
//!
//! - `classify`: first-match-wins component pattern matching
//! - `extract`: key extraction, including the template sub-evaluator
//! - `plural`: pluralization key-form matching
//! - `fields`: `{{...}}` template field detection
//! - `text`: disallowed text candidate detection

pub mod classify;
pub mod extract;
pub mod fields;
pub mod plural;
pub mod text;

use serde_json::Value;

use crate::config::Settings;
use crate::dictionary::{DictionaryStore, LanguageEntry, ResolveOptions, path};
use crate::findings::{
    ArrayPluralLengthFinding, Finding, LanguageMissingFinding, MissingFieldsFinding,
    MissingKeyFinding, MissingPluralFormsFinding, NotAStringFinding, PluralAttributeMisuseFinding,
    SourceContext, UnrecognizedPluralFinding, UntranslatedAttributeFinding,
    UntranslatedTextFinding, UnusedFieldsFinding,
};
use crate::markup::node::{
    Attribute, AttributeEntry, Document, Element, HelperArg, HelperCall, Node,
};

use extract::I18nAttributes;
use plural::KeyFormMatch;

/// Validates documents against the configured languages.
///
/// Holds a mutable reference to the dictionary store so every node checked
/// goes through the store's TTL cache, exactly like resolving per node.
pub struct Validator<'a> {
    settings: &'a Settings,
    store: &'a mut DictionaryStore,
}

impl<'a> Validator<'a> {
    pub fn new(settings: &'a Settings, store: &'a mut DictionaryStore) -> Self {
        Self { settings, store }
    }

    /// Validate one document, returning findings in traversal order.
    pub fn validate(&mut self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        for root in &document.roots {
            self.check_node(root, document, false, &mut findings);
        }
        for call in &document.helper_calls {
            self.check_helper_call(call, document, &mut findings);
        }
        findings
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            disable_cache: self.settings.disable_cache,
            ttl_ms: self.settings.cache_ttl_ms,
        }
    }

    fn languages(&mut self) -> Vec<LanguageEntry> {
        self.store
            .resolve(&self.settings.language_files, self.resolve_options())
    }

    fn check_node(
        &mut self,
        node: &Node,
        document: &Document,
        markup_ancestor: bool,
        findings: &mut Vec<Finding>,
    ) {
        let Node::Element(element) = node else {
            return;
        };

        // Text classification takes priority over markup-text.
        let text_component = classify::classify(element, &self.settings.text_components);
        let markup_component = classify::classify(element, &self.settings.markup_text_components);

        if let Some(component) = text_component.as_ref().or(markup_component.as_ref()) {
            let attrs = extract::extract(element, component, &document.scopes);
            if let (Some(id), Some(key)) = (attrs.id, attrs.key.clone()) {
                self.check_component(element, id, &key, &attrs, document, findings);
            }
        } else {
            // The id/plural/fields attributes of an i18n component are not
            // plain text, so only unclassified elements get scanned.
            self.scan_attributes(element, document, findings);
        }

        let markup_here = markup_ancestor || markup_component.is_some();

        if text_component.is_none() {
            self.scan_children(element, document, markup_here, findings);
        }

        for child in &element.children {
            self.check_node(child, document, markup_here, findings);
        }
    }

    fn check_component(
        &mut self,
        element: &Element,
        id: &Attribute,
        key: &str,
        attrs: &I18nAttributes<'_>,
        document: &Document,
        findings: &mut Vec<Finding>,
    ) {
        let id_ctx = document.context_at(id.value_position());
        let element_ctx = document.context_at(element.pos);
        let plural = attrs.plural_declared();

        for LanguageEntry { name, translation } in self.languages() {
            let Some(translation) = translation else {
                findings.push(Finding::LanguageMissing(LanguageMissingFinding {
                    context: id_ctx.clone(),
                    language: name,
                }));
                continue;
            };

            self.check_key_shape(&translation, key, plural, &name, &id_ctx, findings);
            self.check_template_fields(&translation, key, attrs, &element_ctx, findings);
        }
    }

    /// The unknown-key checks for one resolved language.
    fn check_key_shape(
        &self,
        translation: &Value,
        key: &str,
        plural: bool,
        language: &str,
        ctx: &SourceContext,
        findings: &mut Vec<Finding>,
    ) {
        let scopes = &self.settings.scopes;

        if !plural {
            let Some(value) = path::get(translation, key, scopes) else {
                findings.push(Finding::MissingKey(MissingKeyFinding {
                    context: ctx.clone(),
                    key: key.to_string(),
                    language: language.to_string(),
                }));
                return;
            };
            if !value.is_string() {
                findings.push(Finding::NotAString(NotAStringFinding {
                    context: ctx.clone(),
                    key: key.to_string(),
                    language: language.to_string(),
                }));
            }
            return;
        }

        match path::get(translation, key, scopes) {
            Some(Value::String(_)) => {
                findings.push(Finding::PluralAttributeMisuse(PluralAttributeMisuseFinding {
                    context: ctx.clone(),
                    key: key.to_string(),
                }));
            }
            Some(Value::Array(items)) => {
                if items.len() != 2 {
                    findings.push(Finding::ArrayPluralLength(ArrayPluralLengthFinding {
                        context: ctx.clone(),
                        key: key.to_string(),
                    }));
                }
            }
            Some(Value::Object(mapping)) if !self.settings.ignore_plural_format => {
                match plural::match_key_forms(mapping) {
                    KeyFormMatch::Valid => {}
                    KeyFormMatch::Partial { missing } => {
                        findings.push(Finding::MissingPluralForms(MissingPluralFormsFinding {
                            context: ctx.clone(),
                            key: key.to_string(),
                            language: language.to_string(),
                            missing,
                        }));
                    }
                    KeyFormMatch::Unrecognized => {
                        findings.push(Finding::UnrecognizedPlural(UnrecognizedPluralFinding {
                            context: ctx.clone(),
                            key: key.to_string(),
                            language: language.to_string(),
                        }));
                    }
                }
            }
            Some(Value::Object(_)) => {}
            _ if !self.settings.ignore_plural_format => {
                findings.push(Finding::UnrecognizedPlural(UnrecognizedPluralFinding {
                    context: ctx.clone(),
                    key: key.to_string(),
                    language: language.to_string(),
                }));
            }
            _ => {}
        }
    }

    /// The template-fields checks for one resolved language.
    fn check_template_fields(
        &self,
        translation: &Value,
        key: &str,
        attrs: &I18nAttributes<'_>,
        ctx: &SourceContext,
        findings: &mut Vec<Finding>,
    ) {
        let value = path::get(translation, key, &self.settings.scopes);
        let needs_fields = fields::requires_fields(value, attrs.plural_declared());

        if needs_fields && !attrs.fields_usable() {
            findings.push(Finding::MissingFields(MissingFieldsFinding {
                context: ctx.clone(),
                key: key.to_string(),
            }));
        } else if !needs_fields && attrs.fields_supplied() {
            findings.push(Finding::UnusedFields(UnusedFieldsFinding {
                context: ctx.clone(),
                key: key.to_string(),
            }));
        }
    }

    fn check_helper_call(
        &mut self,
        call: &HelperCall,
        document: &Document,
        findings: &mut Vec<Finding>,
    ) {
        match &call.argument {
            Some(HelperArg::Literal { value, pos }) => {
                let ctx = document.context_at(*pos);
                for key in value.split(',') {
                    self.check_helper_key(key.trim(), &ctx, findings);
                }
            }
            Some(HelperArg::Object { entries }) => {
                for entry in entries {
                    let ctx = document.context_at(entry.pos);
                    self.check_helper_key(entry.value.trim(), &ctx, findings);
                }
            }
            Some(HelperArg::Other) | None => {}
        }
    }

    fn check_helper_key(&mut self, key: &str, ctx: &SourceContext, findings: &mut Vec<Finding>) {
        for LanguageEntry { name, translation } in self.languages() {
            let Some(translation) = translation else {
                findings.push(Finding::LanguageMissing(LanguageMissingFinding {
                    context: ctx.clone(),
                    language: name,
                }));
                continue;
            };
            self.check_key_shape(&translation, key, false, &name, ctx, findings);
        }
    }

    fn scan_attributes(
        &self,
        element: &Element,
        document: &Document,
        findings: &mut Vec<Finding>,
    ) {
        for entry in &element.attributes {
            let AttributeEntry::Named(attr) = entry else {
                continue;
            };
            if !self
                .settings
                .checked_attributes
                .iter()
                .any(|name| name == &attr.name)
            {
                continue;
            }
            let Some(text) = text::value_candidate(&attr.value, self.settings.ignore_text.as_ref())
            else {
                continue;
            };
            findings.push(Finding::UntranslatedAttribute(UntranslatedAttributeFinding {
                context: document.context_at(attr.pos),
                attribute: attr.name.clone(),
                text,
            }));
        }
    }

    fn scan_children(
        &self,
        element: &Element,
        document: &Document,
        markup_exempt: bool,
        findings: &mut Vec<Finding>,
    ) {
        for child in &element.children {
            let (candidate, pos) = match child {
                Node::Text(text) => (
                    text::disallowed_text(&text.value, self.settings.ignore_text.as_ref()),
                    text.pos,
                ),
                Node::Expression(expr) => (
                    text::value_candidate(&expr.value, self.settings.ignore_text.as_ref()),
                    expr.pos,
                ),
                Node::Element(_) => continue,
            };
            let Some(text) = candidate else {
                continue;
            };
            // Fallback markup content nested inside a markup-text component
            // is permitted.
            if markup_exempt {
                continue;
            }
            findings.push(Finding::UntranslatedText(UntranslatedTextFinding {
                context: document.context_at(pos),
                text,
            }));
        }
    }
}
