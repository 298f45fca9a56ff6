//! Symbol resolution table.
//!
//! Before any content is extracted, each file's import declarations are
//! scanned once and every local binding that comes from a canonical module
//! source is mapped to a [`CapabilityTag`]. Traversal afterwards only does
//! table lookups; it never compares against literal component names.
//!
//! Aliases follow the original export name:
//!
//! ```typescript
//! import { T as Translate, Var } from "gt-next";   // Translate -> TranslationScope
//! import * as gt from "gt-next/client";            // <gt.Plural> -> PluralConstruct
//! const Scope = Translate;                         // Scope -> TranslationScope
//! ```
//!
//! Identifiers that do not resolve are capability-less: plain components and
//! calls, never an error.

use std::collections::HashMap;

use swc_ecma_ast::{
    Callee, Expr, ImportDecl, ImportSpecifier, JSXElementName, JSXObject, MemberProp, Module,
    ModuleExportName, ObjectPatProp, Pat, PropName, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::markup::SlotKind;

/// Module specifiers whose exports make up the translation vocabulary.
pub const CANONICAL_MODULES: &[&str] = &[
    "gt-next",
    "gt-next/client",
    "gt-next/server",
    "gt-react",
    "gt-react/client",
];

/// Canonical capability of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityTag {
    TranslationScope,
    VariableSlot,
    NumberSlot,
    DateSlot,
    CurrencySlot,
    BranchConstruct,
    PluralConstruct,
    StaticMarker,
    /// Accessor that must only run in synchronous code (`useGT`).
    SyncAccessor,
    /// Accessor that must only run in asynchronous code (`getGT`).
    AsyncAccessor,
}

impl CapabilityTag {
    /// Map an exported name of a canonical module to its capability.
    pub fn from_export(name: &str) -> Option<Self> {
        match name {
            "T" => Some(CapabilityTag::TranslationScope),
            "Var" => Some(CapabilityTag::VariableSlot),
            "Num" => Some(CapabilityTag::NumberSlot),
            "DateTime" => Some(CapabilityTag::DateSlot),
            "Currency" => Some(CapabilityTag::CurrencySlot),
            "Branch" => Some(CapabilityTag::BranchConstruct),
            "Plural" => Some(CapabilityTag::PluralConstruct),
            "Static" => Some(CapabilityTag::StaticMarker),
            "useGT" => Some(CapabilityTag::SyncAccessor),
            "getGT" => Some(CapabilityTag::AsyncAccessor),
            _ => None,
        }
    }

    /// The slot kind for slot-like capabilities.
    pub fn slot_kind(&self) -> Option<SlotKind> {
        match self {
            CapabilityTag::VariableSlot => Some(SlotKind::Variable),
            CapabilityTag::NumberSlot => Some(SlotKind::Number),
            CapabilityTag::DateSlot => Some(SlotKind::Date),
            CapabilityTag::CurrencySlot => Some(SlotKind::Currency),
            CapabilityTag::StaticMarker => Some(SlotKind::Static),
            _ => None,
        }
    }

    pub fn is_accessor(&self) -> bool {
        matches!(
            self,
            CapabilityTag::SyncAccessor | CapabilityTag::AsyncAccessor
        )
    }
}

/// What a local name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Capability(CapabilityTag),
    /// `import * as gt` / `import gt`: members resolve through the export table.
    Namespace,
}

/// Per-file mapping from local binding names to capability tags.
///
/// Built once per file with [`SymbolTable::build`]; read-only afterwards.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Binding>,
}

impl SymbolTable {
    /// Scan a module's imports (and local re-bindings) against the canonical
    /// sources plus `extra_modules`.
    pub fn build(module: &Module, extra_modules: &[String]) -> Self {
        let mut collector = SymbolCollector {
            table: SymbolTable::default(),
            extra_modules,
        };
        module.visit_with(&mut collector);
        collector.table
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Resolve a plain identifier.
    pub fn resolve(&self, local: &str) -> Option<CapabilityTag> {
        match self.bindings.get(local)? {
            Binding::Capability(tag) => Some(*tag),
            Binding::Namespace => None,
        }
    }

    /// Resolve `object.property` where `object` is a namespace import.
    pub fn resolve_member(&self, object: &str, property: &str) -> Option<CapabilityTag> {
        match self.bindings.get(object)? {
            Binding::Namespace => CapabilityTag::from_export(property),
            Binding::Capability(_) => None,
        }
    }

    /// Resolve a JSX tag name (`<T>`, `<gt.T>`).
    pub fn resolve_jsx_name(&self, name: &JSXElementName) -> Option<CapabilityTag> {
        match name {
            JSXElementName::Ident(ident) => self.resolve(ident.sym.as_str()),
            JSXElementName::JSXMemberExpr(member) => match &member.obj {
                JSXObject::Ident(obj) => {
                    self.resolve_member(obj.sym.as_str(), member.prop.sym.as_str())
                }
                JSXObject::JSXMemberExpr(_) => None,
            },
            JSXElementName::JSXNamespacedName(_) => None,
        }
    }

    /// Resolve a call target (`useGT()`, `gt.getGT()`).
    pub fn resolve_callee(&self, callee: &Callee) -> Option<CapabilityTag> {
        match callee {
            Callee::Expr(expr) => self.resolve_expr(expr),
            _ => None,
        }
    }

    fn resolve_expr(&self, expr: &Expr) -> Option<CapabilityTag> {
        match expr {
            Expr::Ident(ident) => self.resolve(ident.sym.as_str()),
            Expr::Member(member) => {
                let Expr::Ident(obj) = &*member.obj else {
                    return None;
                };
                let MemberProp::Ident(prop) = &member.prop else {
                    return None;
                };
                self.resolve_member(obj.sym.as_str(), prop.sym.as_str())
            }
            Expr::Paren(paren) => self.resolve_expr(&paren.expr),
            _ => None,
        }
    }

    fn insert(&mut self, local: String, binding: Binding) {
        self.bindings.insert(local, binding);
    }
}

struct SymbolCollector<'a> {
    table: SymbolTable,
    extra_modules: &'a [String],
}

impl SymbolCollector<'_> {
    fn is_canonical_source(&self, specifier: &str) -> bool {
        CANONICAL_MODULES.contains(&specifier) || self.extra_modules.iter().any(|m| m == specifier)
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

impl Visit for SymbolCollector<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if node.type_only {
            return;
        }
        let Some(specifier) = node.src.value.as_str() else {
            return;
        };
        if !self.is_canonical_source(specifier) {
            return;
        }

        for spec in &node.specifiers {
            match spec {
                ImportSpecifier::Named(named) => {
                    if named.is_type_only {
                        continue;
                    }
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local_name.clone());
                    if let Some(tag) = CapabilityTag::from_export(&imported_name) {
                        self.table.insert(local_name, Binding::Capability(tag));
                    }
                }
                ImportSpecifier::Default(default) => {
                    self.table
                        .insert(default.local.sym.to_string(), Binding::Namespace);
                }
                ImportSpecifier::Namespace(ns) => {
                    self.table
                        .insert(ns.local.sym.to_string(), Binding::Namespace);
                }
            }
        }
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init {
            match (&node.name, &**init) {
                // const Scope = T;  const Scope = gt.T;
                (Pat::Ident(binding), init) => {
                    if let Some(tag) = self.table.resolve_expr(init) {
                        self.table
                            .insert(binding.id.sym.to_string(), Binding::Capability(tag));
                    }
                }
                // const { T: Scope, Var } = gt;
                (Pat::Object(obj), Expr::Ident(source))
                    if self.table.bindings.get(source.sym.as_str())
                        == Some(&Binding::Namespace) =>
                {
                    for prop in &obj.props {
                        match prop {
                            ObjectPatProp::KeyValue(kv) => {
                                let key = match &kv.key {
                                    PropName::Ident(ident) => Some(ident.sym.to_string()),
                                    PropName::Str(s) => s.value.as_str().map(str::to_string),
                                    _ => None,
                                };
                                if let Some(tag) =
                                    key.as_deref().and_then(CapabilityTag::from_export)
                                    && let Pat::Ident(local) = &*kv.value
                                {
                                    self.table
                                        .insert(local.id.sym.to_string(), Binding::Capability(tag));
                                }
                            }
                            ObjectPatProp::Assign(assign) => {
                                if let Some(tag) =
                                    CapabilityTag::from_export(assign.key.sym.as_str())
                                {
                                    self.table.insert(
                                        assign.key.sym.to_string(),
                                        Binding::Capability(tag),
                                    );
                                }
                            }
                            ObjectPatProp::Rest(_) => {}
                        }
                    }
                }
                _ => {}
            }
        }
        node.visit_children_with(self);
    }
}
