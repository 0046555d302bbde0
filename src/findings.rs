//! Finding types for i18n validation results.
//!
//! This module defines every diagnostic the validation engine can emit.
//! Each finding is self-contained: it carries the source location, the
//! message data, and maps onto a fixed severity and rule so the reporter
//! can display it without consulting the engine again.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each finding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnknownKey,
    TemplateFields,
    TextAsChildren,
    TextAsAttribute,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::TemplateFields => write!(f, "template-fields"),
            Rule::TextAsChildren => write!(f, "text-as-children"),
            Rule::TextAsAttribute => write!(f, "text-as-attribute"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// Position information in a scanned source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    /// Path to the source file (e.g., "./src/App.jsx").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// A source location together with the text of its line, for caret display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The full source line at `location.line`, for report output.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }
}

// ============================================================
// Finding Types - unknown-key rule
// ============================================================

/// A configured language dictionary failed to load or parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMissingFinding {
    pub context: SourceContext,
    pub language: String,
}

impl LanguageMissingFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A referenced translation key does not exist in a language dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyFinding {
    pub context: SourceContext,
    pub key: String,
    pub language: String,
}

impl MissingKeyFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A key resolved to a non-string value without a plural attribute declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAStringFinding {
    pub context: SourceContext,
    pub key: String,
    pub language: String,
}

impl NotAStringFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A plural attribute was declared but the dictionary holds a flat string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralAttributeMisuseFinding {
    pub context: SourceContext,
    pub key: String,
}

impl PluralAttributeMisuseFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// An array-pluralized key does not hold exactly two values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayPluralLengthFinding {
    pub context: SourceContext,
    pub key: String,
}

impl ArrayPluralLengthFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A pluralized mapping partially matches a key-form template.
///
/// `missing` lists the members of the best-matching template that are
/// absent from the dictionary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPluralFormsFinding {
    pub context: SourceContext,
    pub key: String,
    pub language: String,
    pub missing: Vec<String>,
}

impl MissingPluralFormsFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A pluralized mapping matches no known key-form template at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedPluralFinding {
    pub context: SourceContext,
    pub key: String,
    pub language: String,
}

impl UnrecognizedPluralFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

// ============================================================
// Finding Types - template-fields rule
// ============================================================

/// The translation contains `{{...}}` placeholders but no fields attribute
/// was supplied on the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldsFinding {
    pub context: SourceContext,
    pub key: String,
}

impl MissingFieldsFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TemplateFields
    }
}

/// A fields attribute was supplied but the translation has no placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedFieldsFinding {
    pub context: SourceContext,
    pub key: String,
}

impl UnusedFieldsFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TemplateFields
    }
}

// ============================================================
// Finding Types - untranslated text rules
// ============================================================

/// Plain text appears as a child of a non-i18n element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedTextFinding {
    pub context: SourceContext,
    pub text: String,
}

impl UntranslatedTextFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TextAsChildren
    }
}

/// Plain text appears in a user-visible attribute of a non-i18n element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedAttributeFinding {
    pub context: SourceContext,
    pub attribute: String,
    pub text: String,
}

impl UntranslatedAttributeFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TextAsAttribute
    }
}

// ============================================================
// Special Finding Types
// ============================================================

/// A source file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorFinding {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Finding Enum
// ============================================================

/// An i18n validation finding.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    LanguageMissing(LanguageMissingFinding),
    MissingKey(MissingKeyFinding),
    NotAString(NotAStringFinding),
    PluralAttributeMisuse(PluralAttributeMisuseFinding),
    ArrayPluralLength(ArrayPluralLengthFinding),
    MissingPluralForms(MissingPluralFormsFinding),
    UnrecognizedPlural(UnrecognizedPluralFinding),
    MissingFields(MissingFieldsFinding),
    UnusedFields(UnusedFieldsFinding),
    UntranslatedText(UntranslatedTextFinding),
    UntranslatedAttribute(UntranslatedAttributeFinding),
    ParseError(ParseErrorFinding),
}

impl Finding {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location with line context.
    Source(&'a SourceContext),
    /// File-level only (for parse errors - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to the CLI.
///
/// Implemented by all finding types to provide a consistent interface for
/// the report functions. Uses `enum_dispatch` for zero-cost dispatch on the
/// `Finding` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this finding.
    fn location(&self) -> ReportLocation<'_>;

    /// The full diagnostic message.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for LanguageMissingFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("'{}' language is missing", self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingKeyFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("'{}' is missing from '{}' language", self.key, self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for NotAStringFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "'{}' is not a string in '{}' language. Possibly missing plural attribute for pluralizable field.",
            self.key, self.language
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for PluralAttributeMisuseFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "plural attribute supplied for unpluralized key '{}'. Either pluralize key or remove plural attribute.",
            self.key
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ArrayPluralLengthFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "array pluralized key '{}' does not have exactly two values for [plural, singular]",
            self.key
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingPluralFormsFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "[{}] pluralization keys are missing for key '{}' in '{}' language",
            self.missing.join(","),
            self.key,
            self.language
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnrecognizedPluralFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "unrecognized pluralization format for key '{}' in '{}' language",
            self.key, self.language
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingFieldsFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("'{}' has template fields but no fields attribute.", self.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnusedFieldsFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("'{}' doesn't require any template field data.", self.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UntranslatedTextFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("Untranslated text '{}'", self.text)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UntranslatedAttributeFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "Untranslated attribute {} with \"{}\"",
            self.attribute, self.text
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Finding (for sorting in reports)
// ============================================================

impl Finding {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
