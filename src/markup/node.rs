//! The markup node model consumed by the validation engine.
//!
//! The engine never touches a parser AST. The lowering pass reduces parsed
//! source to this small fixed shape: elements with named/spread attributes
//! and children, literal-like value nodes, and the helper calls collected
//! along the way. Lowering loses everything the engine does not need;
//! anything it cannot represent becomes an opaque [`ValueNode::Expression`]
//! and is silently skipped by validation.

use crate::findings::{SourceContext, SourceLocation};
use crate::markup::scopes::{ScopeId, ScopeTable};

/// 1-indexed position within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// One lowered source file.
#[derive(Debug)]
pub struct Document {
    /// Display path of the source file (e.g., "./src/App.jsx").
    pub file_path: String,
    /// Source lines, for diagnostic context.
    pub lines: Vec<String>,
    /// Top-level markup trees found in the file.
    pub roots: Vec<Node>,
    /// Calls to configured i18n helper functions.
    pub helper_calls: Vec<HelperCall>,
    /// Lexical scopes for template-literal key resolution.
    pub scopes: ScopeTable,
}

impl Document {
    /// Build a finding context for a position in this document.
    pub fn context_at(&self, pos: Position) -> SourceContext {
        let source_line = self
            .lines
            .get(pos.line.saturating_sub(1))
            .cloned()
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(&self.file_path, pos.line, pos.col),
            source_line,
        )
    }
}

/// A node in the markup tree.
#[derive(Debug)]
pub enum Node {
    Element(Element),
    /// Raw text between tags.
    Text(TextNode),
    /// A `{...}` container child holding a literal-like expression.
    Expression(ExpressionChild),
}

#[derive(Debug)]
pub struct TextNode {
    pub value: String,
    pub pos: Position,
}

#[derive(Debug)]
pub struct ExpressionChild {
    pub value: ValueNode,
    pub pos: Position,
}

/// A markup element (or fragment, which has no name).
#[derive(Debug)]
pub struct Element {
    /// Tag name. `None` for fragments and member-expression tags, which
    /// never classify as i18n components.
    pub name: Option<String>,
    pub attributes: Vec<AttributeEntry>,
    pub children: Vec<Node>,
    pub pos: Position,
    /// The lexical scope this element was lowered in.
    pub scope: ScopeId,
}

impl Element {
    /// Look up a named attribute. Spread entries are never returned.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find_map(|entry| match entry {
            AttributeEntry::Named(attr) if attr.name == name => Some(attr),
            _ => None,
        })
    }
}

/// An attribute slot on an element.
#[derive(Debug)]
pub enum AttributeEntry {
    Named(Attribute),
    /// A spread (`{...props}`). Never statically resolvable.
    Spread { pos: Position },
}

#[derive(Debug)]
pub struct Attribute {
    pub name: String,
    pub value: ValueNode,
    pub pos: Position,
}

impl Attribute {
    /// Position of the attribute's value, falling back to the attribute
    /// itself for valueless attributes.
    pub fn value_position(&self) -> Position {
        self.value.position().unwrap_or(self.pos)
    }
}

/// A literal-like value shape: attribute values and `{...}` child contents.
#[derive(Debug)]
pub enum ValueNode {
    /// A plain string literal, quoted or `{"..."}`-wrapped.
    Literal { value: String, pos: Position },
    /// A template literal, possibly with interpolations.
    Template { parts: Vec<TemplatePart>, pos: Position },
    /// A bare identifier reference.
    Ident { name: String, pos: Position },
    /// Any other expression. Opaque to validation.
    Expression { pos: Position },
    /// A nested markup element or fragment used as a value.
    Element { pos: Position },
    /// A valueless attribute (e.g. `<Text id="x" plural />`).
    None,
}

impl ValueNode {
    pub fn position(&self) -> Option<Position> {
        match self {
            ValueNode::Literal { pos, .. }
            | ValueNode::Template { pos, .. }
            | ValueNode::Ident { pos, .. }
            | ValueNode::Expression { pos }
            | ValueNode::Element { pos } => Some(*pos),
            ValueNode::None => None,
        }
    }

    /// True when this value is the bare identifier `undefined`.
    pub fn is_undefined_ident(&self) -> bool {
        matches!(self, ValueNode::Ident { name, .. } if name == "undefined")
    }
}

/// One piece of a template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// A static quasi.
    Str(String),
    /// An interpolated bare identifier.
    Interp(String),
    /// An interpolation the lowering could not reduce to an identifier.
    Opaque,
}

/// A call to an i18n helper whose first argument names translation keys.
#[derive(Debug)]
pub struct HelperCall {
    pub callee: String,
    pub argument: Option<HelperArg>,
    pub pos: Position,
}

/// The first argument of a helper call.
#[derive(Debug)]
pub enum HelperArg {
    /// A string literal holding a comma-separated key list.
    Literal { value: String, pos: Position },
    /// An object whose string-literal property values are keys.
    Object { entries: Vec<HelperObjectEntry> },
    /// Anything else. Skipped.
    Other,
}

#[derive(Debug)]
pub struct HelperObjectEntry {
    pub value: String,
    pub pos: Position,
}
