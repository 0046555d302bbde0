//! Lowering: swc AST to the engine's markup node model.
//!
//! One pass over the parsed module does three jobs at once:
//!
//! - builds the markup tree (elements, text children, `{...}` literal
//!   containers), keeping nesting intact so ancestor-based exemptions work
//!   even across expression boundaries;
//! - records lexical scopes and `const` string bindings for the key
//!   extractor's template resolution;
//! - collects calls to the configured i18n helper functions.
//!
//! Anything outside this fixed shape lowers to an opaque value and is
//! skipped by validation.

use regex::Regex;
use swc_common::{BytePos, SourceMap, Spanned};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, Expr, FnDecl, Function, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXElement, JSXElementName, JSXExpr, JSXExprContainer, JSXFragment, JSXText, Lit, ObjectPatProp,
    Pat, Prop, PropOrSpread, Tpl, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::markup::node::{
    Attribute, AttributeEntry, Document, Element, ExpressionChild, HelperArg, HelperCall,
    HelperObjectEntry, Node, Position, TemplatePart, TextNode, ValueNode,
};
use crate::markup::parse::ParsedModule;
use crate::markup::scopes::{Binding, ScopeId, ScopeTable};

/// Lower a parsed module into a [`Document`].
pub fn lower(parsed: &ParsedModule, file_path: &str, source: &str, with_text: &Regex) -> Document {
    let mut lowerer = Lowerer {
        source_map: &parsed.source_map,
        with_text,
        scopes: ScopeTable::new(),
        current_scope: ScopeTable::ROOT,
        stack: Vec::new(),
        roots: Vec::new(),
        helper_calls: Vec::new(),
        in_attr_value: false,
    };
    parsed.module.visit_with(&mut lowerer);

    Document {
        file_path: file_path.to_string(),
        lines: source.lines().map(str::to_string).collect(),
        roots: lowerer.roots,
        helper_calls: lowerer.helper_calls,
        scopes: lowerer.scopes,
    }
}

struct PendingElement {
    name: Option<String>,
    attributes: Vec<AttributeEntry>,
    children: Vec<Node>,
    pos: Position,
    scope: ScopeId,
}

impl PendingElement {
    fn into_element(self) -> Element {
        Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
            pos: self.pos,
            scope: self.scope,
        }
    }
}

struct Lowerer<'a> {
    source_map: &'a SourceMap,
    with_text: &'a Regex,
    scopes: ScopeTable,
    current_scope: ScopeId,
    /// Elements currently being built, innermost last.
    stack: Vec<PendingElement>,
    roots: Vec<Node>,
    helper_calls: Vec<HelperCall>,
    /// True while visiting an opening tag, so attribute-value containers are
    /// not mistaken for element children.
    in_attr_value: bool,
}

impl Lowerer<'_> {
    fn pos(&self, lo: BytePos) -> Position {
        let loc = self.source_map.lookup_char_pos(lo);
        Position::new(loc.line, loc.col_display + 1)
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(pending) => pending.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn lower_attributes(&self, attrs: &[JSXAttrOrSpread]) -> Vec<AttributeEntry> {
        attrs
            .iter()
            .map(|attr| match attr {
                JSXAttrOrSpread::JSXAttr(attr) => AttributeEntry::Named(Attribute {
                    name: attr_name(&attr.name),
                    value: self.lower_attr_value(attr.value.as_ref()),
                    pos: self.pos(attr.span.lo),
                }),
                JSXAttrOrSpread::SpreadElement(spread) => AttributeEntry::Spread {
                    pos: self.pos(spread.dot3_token.lo),
                },
            })
            .collect()
    }

    fn lower_attr_value(&self, value: Option<&JSXAttrValue>) -> ValueNode {
        match value {
            None => ValueNode::None,
            Some(JSXAttrValue::Str(s)) => match s.value.as_str() {
                Some(text) => ValueNode::Literal {
                    value: text.to_string(),
                    pos: self.pos(s.span.lo),
                },
                None => ValueNode::Expression {
                    pos: self.pos(s.span.lo),
                },
            },
            Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
                JSXExpr::Expr(expr) => self.lower_value_expr(expr),
                JSXExpr::JSXEmptyExpr(_) => ValueNode::None,
            },
            Some(JSXAttrValue::JSXElement(el)) => ValueNode::Element {
                pos: self.pos(el.span.lo),
            },
            Some(JSXAttrValue::JSXFragment(fragment)) => ValueNode::Element {
                pos: self.pos(fragment.span.lo),
            },
        }
    }

    fn lower_value_expr(&self, expr: &Expr) -> ValueNode {
        match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                Some(text) => ValueNode::Literal {
                    value: text.to_string(),
                    pos: self.pos(s.span.lo),
                },
                None => ValueNode::Expression {
                    pos: self.pos(s.span.lo),
                },
            },
            Expr::Tpl(tpl) => self.lower_template(tpl),
            Expr::Ident(ident) => ValueNode::Ident {
                name: ident.sym.to_string(),
                pos: self.pos(ident.span.lo),
            },
            Expr::JSXElement(el) => ValueNode::Element {
                pos: self.pos(el.span.lo),
            },
            Expr::JSXFragment(fragment) => ValueNode::Element {
                pos: self.pos(fragment.span.lo),
            },
            other => ValueNode::Expression {
                pos: self.pos(other.span().lo),
            },
        }
    }

    fn lower_template(&self, tpl: &Tpl) -> ValueNode {
        let mut parts = Vec::new();
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            match quasi.cooked.as_ref().and_then(|c| c.as_str()) {
                Some(text) => {
                    if !text.is_empty() {
                        parts.push(TemplatePart::Str(text.to_string()));
                    }
                }
                None => parts.push(TemplatePart::Opaque),
            }
            if i < tpl.exprs.len() {
                match unwrap_paren(&tpl.exprs[i]) {
                    Expr::Ident(ident) => parts.push(TemplatePart::Interp(ident.sym.to_string())),
                    _ => parts.push(TemplatePart::Opaque),
                }
            }
        }
        ValueNode::Template {
            parts,
            pos: self.pos(tpl.span.lo),
        }
    }

    fn lower_helper_arg(&self, expr: &Expr) -> HelperArg {
        match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                Some(value) => HelperArg::Literal {
                    value: value.to_string(),
                    pos: self.pos(s.span.lo),
                },
                None => HelperArg::Other,
            },
            Expr::Object(obj) => {
                let mut entries = Vec::new();
                for prop in &obj.props {
                    if let PropOrSpread::Prop(prop) = prop
                        && let Prop::KeyValue(kv) = &**prop
                        && let Expr::Lit(Lit::Str(s)) = &*kv.value
                        && let Some(value) = s.value.as_str()
                    {
                        entries.push(HelperObjectEntry {
                            value: value.to_string(),
                            pos: self.pos(s.span.lo),
                        });
                    }
                }
                HelperArg::Object { entries }
            }
            _ => HelperArg::Other,
        }
    }

    fn bind_pattern(&mut self, pat: &Pat) {
        let mut names = Vec::new();
        collect_pat_idents(pat, &mut names);
        for name in names {
            self.scopes.bind(self.current_scope, name, Binding::Other);
        }
    }
}

impl Visit for Lowerer<'_> {
    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.stack.push(PendingElement {
            name: jsx_element_name(&node.opening.name),
            attributes: self.lower_attributes(&node.opening.attrs),
            children: Vec::new(),
            pos: self.pos(node.span.lo),
            scope: self.current_scope,
        });

        let prev = self.in_attr_value;
        self.in_attr_value = true;
        node.opening.visit_with(self);
        self.in_attr_value = false;
        for child in &node.children {
            child.visit_with(self);
        }
        self.in_attr_value = prev;

        if let Some(pending) = self.stack.pop() {
            self.push_node(Node::Element(pending.into_element()));
        }
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.stack.push(PendingElement {
            name: None,
            attributes: Vec::new(),
            children: Vec::new(),
            pos: self.pos(node.span.lo),
            scope: self.current_scope,
        });

        let prev = self.in_attr_value;
        self.in_attr_value = false;
        for child in &node.children {
            child.visit_with(self);
        }
        self.in_attr_value = prev;

        if let Some(pending) = self.stack.pop() {
            self.push_node(Node::Element(pending.into_element()));
        }
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let raw_value = &node.value;
        let trimmed = raw_value.trim();
        if trimmed.is_empty() {
            return;
        }

        // Point the position at the first non-whitespace character.
        let trim_start_offset = raw_value.len() - raw_value.trim_start().len();
        let actual_pos = node.span.lo + BytePos(trim_start_offset as u32);

        let pos = self.pos(actual_pos);
        self.push_node(Node::Text(TextNode {
            value: raw_value.to_string(),
            pos,
        }));
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        let JSXExpr::Expr(expr) = &node.expr else {
            return;
        };

        if !self.in_attr_value {
            let value = self.lower_value_expr(expr);
            if matches!(value, ValueNode::Literal { .. } | ValueNode::Template { .. }) {
                let pos = self.pos(node.span.lo);
                self.push_node(Node::Expression(ExpressionChild { value, pos }));
                return;
            }
        }

        expr.visit_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        for decl in &node.decls {
            if node.kind == VarDeclKind::Const
                && let Pat::Ident(ident) = &decl.name
                && let Some(init) = decl.init.as_deref()
            {
                let binding = match literal_initializer(init) {
                    Some(value) => Binding::Literal(value),
                    None => Binding::Other,
                };
                self.scopes
                    .bind(self.current_scope, ident.id.sym.to_string(), binding);
            } else {
                self.bind_pattern(&decl.name);
            }
        }
        node.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.scopes
            .bind(self.current_scope, node.ident.sym.to_string(), Binding::Other);

        let parent = self.current_scope;
        self.current_scope = self.scopes.push_scope(parent);
        for param in &node.function.params {
            self.bind_pattern(&param.pat);
        }
        node.function.visit_children_with(self);
        self.current_scope = parent;
    }

    fn visit_function(&mut self, node: &Function) {
        let parent = self.current_scope;
        self.current_scope = self.scopes.push_scope(parent);
        for param in &node.params {
            self.bind_pattern(&param.pat);
        }
        node.visit_children_with(self);
        self.current_scope = parent;
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        let parent = self.current_scope;
        self.current_scope = self.scopes.push_scope(parent);
        for pat in &node.params {
            self.bind_pattern(pat);
        }
        node.visit_children_with(self);
        self.current_scope = parent;
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && self.with_text.is_match(ident.sym.as_str())
        {
            let argument = node.args.first().map(|arg| self.lower_helper_arg(&arg.expr));
            self.helper_calls.push(HelperCall {
                callee: ident.sym.to_string(),
                argument,
                pos: self.pos(node.span.lo),
            });
        }
        node.visit_children_with(self);
    }
}

fn jsx_element_name(name: &JSXElementName) -> Option<String> {
    match name {
        JSXElementName::Ident(ident) => Some(ident.sym.to_string()),
        // Member-expression and namespaced tags have no simple name and
        // never classify as i18n components.
        JSXElementName::JSXMemberExpr(_) | JSXElementName::JSXNamespacedName(_) => None,
    }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        _ => expr,
    }
}

fn literal_initializer(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|c| c.as_str())
            .map(str::to_string),
        _ => None,
    }
}

fn collect_pat_idents(pat: &Pat, out: &mut Vec<String>) {
    match pat {
        Pat::Ident(ident) => out.push(ident.id.sym.to_string()),
        Pat::Array(array) => {
            for elem in array.elems.iter().flatten() {
                collect_pat_idents(elem, out);
            }
        }
        Pat::Rest(rest) => collect_pat_idents(&rest.arg, out),
        Pat::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => collect_pat_idents(&kv.value, out),
                    ObjectPatProp::Assign(assign) => out.push(assign.key.sym.to_string()),
                    ObjectPatProp::Rest(rest) => collect_pat_idents(&rest.arg, out),
                }
            }
        }
        Pat::Assign(assign) => collect_pat_idents(&assign.left, out),
        Pat::Invalid(_) | Pat::Expr(_) => {}
    }
}
