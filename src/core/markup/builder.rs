//! Recursive conversion of a translation scope's JSX into a [`MarkupNode`].
//!
//! One builder is created per translation scope. It owns the per-kind slot
//! counters of that scope and records whether any error was reported; a scope
//! with errors is never turned into a unit.

use std::collections::HashMap;

use indexmap::IndexMap;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    BinaryOp, Expr, JSXAttr, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, JSXExpr,
    Lit,
};

use super::text::{clean_jsx_text, collapse_whitespace};
use super::{Branch, MarkupNode, Opaque, Plural, PluralCategory, Slot, SlotKind};
use crate::core::data::{Diagnostic, DiagnosticKind};
use crate::core::output::ParsingOutput;
use crate::core::parsers::SourceUnit;
use crate::core::parsing_config::ParsingConfig;
use crate::core::symbols::{CapabilityTag, SymbolTable};
use crate::core::utils::{
    AttrValue, attr_name, attr_value, find_attr, is_meaningful_child, jsx_element_name,
    plain_template, str_value, unwrap_transparent,
};

/// Discriminant attribute of `<Branch>`.
const BRANCH_ATTR: &str = "branch";
/// Count attribute of `<Plural>`.
const PLURAL_ATTR: &str = "n";
/// Explicit slot name attribute.
const NAME_ATTR: &str = "name";

pub struct MarkupBuilder<'a> {
    unit: &'a SourceUnit,
    symbols: &'a SymbolTable,
    config: &'a ParsingConfig,
    output: &'a mut ParsingOutput,
    slot_counters: HashMap<SlotKind, usize>,
    failed: bool,
}

impl<'a> MarkupBuilder<'a> {
    pub fn new(
        unit: &'a SourceUnit,
        symbols: &'a SymbolTable,
        config: &'a ParsingConfig,
        output: &'a mut ParsingOutput,
    ) -> Self {
        Self {
            unit,
            symbols,
            config,
            output,
            slot_counters: HashMap::new(),
            failed: false,
        }
    }

    /// Build the content of a translation scope element.
    ///
    /// The children always form a `Fragment`. Returns `None` when an error
    /// was reported anywhere inside the scope.
    pub fn build_scope(mut self, scope: &JSXElement) -> Option<MarkupNode> {
        let children = self.build_children(&scope.children);
        if self.failed {
            None
        } else {
            Some(MarkupNode::Fragment(children))
        }
    }

    fn build_children(&mut self, children: &[JSXElementChild]) -> Vec<MarkupNode> {
        children
            .iter()
            .filter_map(|child| self.build_child(child))
            .collect()
    }

    fn build_child(&mut self, child: &JSXElementChild) -> Option<MarkupNode> {
        match child {
            JSXElementChild::JSXText(text) => clean_jsx_text(&text.value).map(MarkupNode::Text),
            JSXElementChild::JSXExprContainer(container) => match &container.expr {
                JSXExpr::JSXEmptyExpr(_) => None,
                JSXExpr::Expr(expr) => self.build_expr(expr),
            },
            JSXElementChild::JSXElement(element) => self.build_element(element),
            JSXElementChild::JSXFragment(fragment) => {
                Some(MarkupNode::Fragment(self.build_children(&fragment.children)))
            }
            JSXElementChild::JSXSpreadChild(spread) => {
                self.non_static(DiagnosticKind::NonStaticContent, spread.span, "spread child");
                None
            }
        }
    }

    /// `None` means "renders nothing" or "reported"; `failed` tells which.
    fn build_expr(&mut self, expr: &Expr) -> Option<MarkupNode> {
        let expr = unwrap_transparent(expr);
        match expr {
            Expr::Lit(Lit::Str(s)) => Some(MarkupNode::Text(str_value(s))),
            Expr::Lit(Lit::Num(num)) => Some(MarkupNode::Text(match &num.raw {
                Some(raw) => raw.to_string(),
                None => num.value.to_string(),
            })),
            Expr::Lit(Lit::BigInt(big)) => Some(MarkupNode::Text(match &big.raw {
                Some(raw) => raw.to_string(),
                None => format!("{}n", big.value),
            })),
            Expr::Lit(Lit::Bool(_)) | Expr::Lit(Lit::Null(_)) => None,
            Expr::Ident(ident) if ident.sym.as_str() == "undefined" => None,
            Expr::Tpl(tpl) => match plain_template(tpl) {
                Some(text) => Some(MarkupNode::Text(text)),
                None => {
                    self.non_static(
                        DiagnosticKind::TemplateLiteralWithInterpolation,
                        tpl.span,
                        "template literal with interpolation",
                    );
                    None
                }
            },
            Expr::JSXElement(element) => self.build_element(element),
            Expr::JSXFragment(fragment) => {
                Some(MarkupNode::Fragment(self.build_children(&fragment.children)))
            }
            Expr::Cond(cond) => {
                let when_true = self.build_expr(&cond.cons);
                let when_false = self.build_expr(&cond.alt);
                Some(self.boolean_branch(&cond.test, when_true, when_false))
            }
            Expr::Bin(bin) if bin.op == BinaryOp::LogicalAnd => {
                let when_true = self.build_expr(&bin.right);
                Some(self.boolean_branch(&bin.left, when_true, None))
            }
            other => {
                self.non_static(DiagnosticKind::NonStaticContent, other.span(), "expression");
                None
            }
        }
    }

    /// Inline `true`/`false` branch synthesized from `?:` and `&&`.
    fn boolean_branch(
        &self,
        test: &Expr,
        when_true: Option<MarkupNode>,
        when_false: Option<MarkupNode>,
    ) -> MarkupNode {
        let mut options = IndexMap::new();
        options.insert("true".to_string(), when_true.unwrap_or_else(MarkupNode::empty));
        options.insert("false".to_string(), when_false.unwrap_or_else(MarkupNode::empty));
        MarkupNode::Branch(Branch {
            discriminant: Opaque(self.unit.snippet(test.span())),
            options,
            default_content: None,
        })
    }

    fn build_element(&mut self, element: &JSXElement) -> Option<MarkupNode> {
        match self.symbols.resolve_jsx_name(&element.opening.name) {
            Some(CapabilityTag::TranslationScope) => {
                self.error(
                    DiagnosticKind::NestedTranslationScope,
                    element.span,
                    "translation scope nested inside another translation scope",
                );
                None
            }
            Some(CapabilityTag::BranchConstruct) => Some(self.build_branch(element)),
            Some(CapabilityTag::PluralConstruct) => Some(self.build_plural(element)),
            Some(tag) => match tag.slot_kind() {
                Some(kind) => Some(self.build_slot(element, kind)),
                None => Some(self.build_plain_element(element)),
            },
            None => Some(self.build_plain_element(element)),
        }
    }

    fn build_plain_element(&mut self, element: &JSXElement) -> MarkupNode {
        MarkupNode::Element {
            tag: jsx_element_name(&element.opening.name),
            children: self.build_children(&element.children),
        }
    }

    fn build_slot(&mut self, element: &JSXElement, kind: SlotKind) -> MarkupNode {
        let meaningful = element
            .children
            .iter()
            .filter(|child| is_meaningful_child(child))
            .count();
        if meaningful > 1 {
            self.warning(
                DiagnosticKind::AmbiguousSlot,
                element.span,
                format!("<{}> slot wraps {} children; expected at most one", kind, meaningful),
            );
        }

        let explicit_name = match find_attr(element, NAME_ATTR).map(attr_value) {
            Some(AttrValue::Static(name)) => Some(name),
            Some(AttrValue::Dynamic(span)) => {
                self.dynamic_metadata(NAME_ATTR, span);
                None
            }
            None => None,
        };
        let explicit = explicit_name.is_some();
        let name = match explicit_name {
            Some(name) => name,
            None => {
                let ordinal = self.slot_counters.entry(kind).or_insert(0);
                *ordinal += 1;
                format!("slot_{}_{}", kind, ordinal)
            }
        };

        let payload = match kind {
            SlotKind::Static => self.static_payload(&element.children),
            _ => None,
        };

        MarkupNode::VariableSlot(Slot {
            kind,
            name,
            explicit,
            payload,
        })
    }

    /// Whitespace-collapsed source text of a static marker's children.
    fn static_payload(&self, children: &[JSXElementChild]) -> Option<String> {
        let (first, last) = (children.first()?, children.last()?);
        let span = Span::new(first.span().lo, last.span().hi);
        let payload = collapse_whitespace(&self.unit.snippet(span));
        if payload.is_empty() {
            None
        } else {
            Some(payload)
        }
    }

    fn build_branch(&mut self, element: &JSXElement) -> MarkupNode {
        let mut discriminant = Opaque::default();
        let mut options = IndexMap::new();
        for attr in self.plain_attrs(element) {
            let Some(name) = attr_name(attr) else {
                continue;
            };
            if name == BRANCH_ATTR {
                discriminant = self.attr_snippet(attr);
                continue;
            }
            if let Some(node) = self.build_attr_content(attr) {
                options.insert(name.to_string(), node);
            }
        }
        let default_content = self.default_content(element);

        if options.is_empty() {
            return self.empty_construct(element, "<Branch>", default_content);
        }
        MarkupNode::Branch(Branch {
            discriminant,
            options,
            default_content,
        })
    }

    fn build_plural(&mut self, element: &JSXElement) -> MarkupNode {
        let mut count = Opaque::default();
        let mut forms = IndexMap::new();
        for attr in self.plain_attrs(element) {
            let Some(name) = attr_name(attr) else {
                continue;
            };
            if name == PLURAL_ATTR {
                count = self.attr_snippet(attr);
                continue;
            }
            // Unrelated props are not plural forms.
            let Some(category) = PluralCategory::parse(name) else {
                continue;
            };
            if let Some(node) = self.build_attr_content(attr) {
                forms.insert(category, node);
            }
        }
        let default_content = self.default_content(element);

        if forms.is_empty() {
            return self.empty_construct(element, "<Plural>", default_content);
        }
        MarkupNode::Plural(Plural {
            count,
            forms,
            default_content,
        })
    }

    /// Attributes of a branch-like element; spreads could hide options, so
    /// they are reported.
    fn plain_attrs<'e>(&mut self, element: &'e JSXElement) -> Vec<&'e JSXAttr> {
        let mut attrs = Vec::with_capacity(element.opening.attrs.len());
        for attr in &element.opening.attrs {
            match attr {
                JSXAttrOrSpread::JSXAttr(attr) => attrs.push(attr),
                JSXAttrOrSpread::SpreadElement(spread) => self.non_static(
                    DiagnosticKind::NonStaticContent,
                    spread.expr.span(),
                    "spread attribute",
                ),
            }
        }
        attrs
    }

    fn attr_snippet(&self, attr: &JSXAttr) -> Opaque {
        match &attr.value {
            Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
                JSXExpr::Expr(expr) => Opaque(self.unit.snippet(expr.span())),
                JSXExpr::JSXEmptyExpr(_) => Opaque::default(),
            },
            Some(value) => Opaque(self.unit.snippet(value.span())),
            None => Opaque::default(),
        }
    }

    fn build_attr_content(&mut self, attr: &JSXAttr) -> Option<MarkupNode> {
        match attr.value.as_ref()? {
            JSXAttrValue::Str(s) => Some(MarkupNode::Text(str_value(s))),
            JSXAttrValue::JSXExprContainer(container) => match &container.expr {
                JSXExpr::Expr(expr) => self.build_expr(expr),
                JSXExpr::JSXEmptyExpr(_) => None,
            },
            JSXAttrValue::JSXElement(element) => self.build_element(element),
            JSXAttrValue::JSXFragment(fragment) => {
                Some(MarkupNode::Fragment(self.build_children(&fragment.children)))
            }
        }
    }

    fn default_content(&mut self, element: &JSXElement) -> Option<Box<MarkupNode>> {
        if !element.children.iter().any(is_meaningful_child) {
            return None;
        }
        let children = self.build_children(&element.children);
        Some(Box::new(MarkupNode::Fragment(children)))
    }

    fn empty_construct(
        &mut self,
        element: &JSXElement,
        label: &str,
        default_content: Option<Box<MarkupNode>>,
    ) -> MarkupNode {
        self.warning(
            DiagnosticKind::EmptyConstruct,
            element.span,
            format!("{} has no options; using its children", label),
        );
        match default_content {
            Some(content) => *content,
            None => MarkupNode::empty(),
        }
    }

    fn dynamic_metadata(&mut self, attr: &str, span: Span) {
        if self.config.ignore_additional_data {
            self.warning(
                DiagnosticKind::NonStaticMetadata,
                span,
                format!("dynamic `{}` ignored", attr),
            );
        } else {
            self.error(
                DiagnosticKind::NonStaticMetadata,
                span,
                format!("`{}` must be a static string", attr),
            );
        }
    }

    fn non_static(&mut self, kind: DiagnosticKind, span: Span, what: &str) {
        if self.config.ignore_dynamic_content {
            return;
        }
        let snippet = collapse_whitespace(&self.unit.snippet(span));
        self.error(
            kind,
            span,
            format!("dynamic content `{}` ({}) inside translation scope", snippet, what),
        );
    }

    fn error(&mut self, kind: DiagnosticKind, span: Span, message: impl Into<String>) {
        self.failed = true;
        let context = self.unit.locate(span.lo);
        self.output.push_error(Diagnostic::at(kind, context, message));
    }

    fn warning(&mut self, kind: DiagnosticKind, span: Span, message: impl Into<String>) {
        let context = self.unit.locate(span.lo);
        self.output.push_warning(Diagnostic::at(kind, context, message));
    }
}
