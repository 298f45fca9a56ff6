//! Small syntax-tree helpers shared by the builder and the extractor.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    Expr, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild,
    JSXElementName, JSXExpr, JSXObject, Lit, ObjectPatProp, Pat, Str, Tpl,
};

use crate::core::markup::text::clean_jsx_text;

/// Strip wrappers that do not change the runtime value: parentheses and
/// TypeScript `as`/`satisfies`/`!`/`<T>x` assertions.
pub fn unwrap_transparent(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(e) => unwrap_transparent(&e.expr),
        Expr::TsAs(e) => unwrap_transparent(&e.expr),
        Expr::TsSatisfies(e) => unwrap_transparent(&e.expr),
        Expr::TsNonNull(e) => unwrap_transparent(&e.expr),
        Expr::TsConstAssertion(e) => unwrap_transparent(&e.expr),
        Expr::TsTypeAssertion(e) => unwrap_transparent(&e.expr),
        _ => expr,
    }
}

pub fn str_value(s: &Str) -> String {
    s.value.to_string_lossy().into_owned()
}

/// Text of a template literal without `${...}`; `None` if it interpolates.
pub fn plain_template(tpl: &Tpl) -> Option<String> {
    if !tpl.exprs.is_empty() {
        return None;
    }
    Some(
        tpl.quasis
            .iter()
            .map(|q| match &q.cooked {
                Some(cooked) => cooked.to_string_lossy().into_owned(),
                None => q.raw.to_string(),
            })
            .collect(),
    )
}

/// A string literal or an interpolation-free template literal.
pub fn static_string(expr: &Expr) -> Option<String> {
    match unwrap_transparent(expr) {
        Expr::Lit(Lit::Str(s)) => Some(str_value(s)),
        Expr::Tpl(tpl) => plain_template(tpl),
        _ => None,
    }
}

/// Printable tag name: `div`, `gt.T`, `svg:path`.
pub fn jsx_element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => {
            format!("{}.{}", jsx_object_name(&member.obj), member.prop.sym)
        }
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn jsx_object_name(obj: &JSXObject) -> String {
    match obj {
        JSXObject::Ident(ident) => ident.sym.to_string(),
        JSXObject::JSXMemberExpr(member) => {
            format!("{}.{}", jsx_object_name(&member.obj), member.prop.sym)
        }
    }
}

/// Plain (non-namespaced) attribute name.
pub fn attr_name(attr: &JSXAttr) -> Option<&str> {
    match &attr.name {
        JSXAttrName::Ident(ident) => Some(ident.sym.as_str()),
        JSXAttrName::JSXNamespacedName(_) => None,
    }
}

pub fn find_attr<'a>(element: &'a JSXElement, name: &str) -> Option<&'a JSXAttr> {
    element.opening.attrs.iter().find_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) if attr_name(attr) == Some(name) => Some(attr),
        _ => None,
    })
}

/// How a metadata-like attribute (`id`, `context`, `name`) is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Static(String),
    /// Anything that is only known at runtime, with the offending span.
    Dynamic(Span),
}

/// Classify an attribute's value; a bare attribute (`<T id>`) is dynamic.
pub fn attr_value(attr: &JSXAttr) -> AttrValue {
    match &attr.value {
        Some(JSXAttrValue::Str(s)) => AttrValue::Static(str_value(s)),
        Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
            JSXExpr::Expr(expr) => match static_string(expr) {
                Some(value) => AttrValue::Static(value),
                None => AttrValue::Dynamic(expr.span()),
            },
            JSXExpr::JSXEmptyExpr(_) => AttrValue::Dynamic(container.span),
        },
        Some(other) => AttrValue::Dynamic(other.span()),
        None => AttrValue::Dynamic(attr.span),
    }
}

/// Whether a child renders anything: whitespace-only text and `{}` /
/// `{/* comment */}` do not.
pub fn is_meaningful_child(child: &JSXElementChild) -> bool {
    match child {
        JSXElementChild::JSXText(text) => clean_jsx_text(&text.value).is_some(),
        JSXElementChild::JSXExprContainer(container) => {
            !matches!(container.expr, JSXExpr::JSXEmptyExpr(_))
        }
        _ => true,
    }
}

/// Extract all binding names from a pattern.
///
/// Handles simple identifiers and destructuring patterns:
/// - `a` -> ["a"]
/// - `{ a, b }` -> ["a", "b"]
/// - `{ a: renamed }` -> ["renamed"]
/// - `[a, b]` -> ["a", "b"]
/// - `{ a = 1 }` -> ["a"]
/// - `...rest` -> ["rest"]
pub fn extract_binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => extract_binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => extract_binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr
            .elems
            .iter()
            .flatten()
            .flat_map(extract_binding_names)
            .collect(),
        Pat::Assign(assign) => extract_binding_names(&assign.left),
        Pat::Rest(rest) => extract_binding_names(&rest.arg),
        _ => vec![],
    }
}
