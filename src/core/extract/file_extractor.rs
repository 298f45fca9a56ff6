//! Single-pass extractor for one parsed file.
//!
//! Walks the module once and:
//! - turns every outermost translation scope (`<T>`) into a JSX unit via the
//!   [`MarkupBuilder`],
//! - tracks translator bindings (`const t = useGT()`) and turns `t("...")`
//!   calls into ICU units,
//! - enforces the call-context rule for the sync/async accessors.
//!
//! All diagnostics go into the extractor's own [`ParsingOutput`], which is
//! returned to the caller when the walk is done.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, CallExpr, Callee, CatchClause, Expr, ExprOrSpread, ForInStmt,
    ForOfStmt, ForStmt, Function, JSXElement, Pat, Prop, PropName, PropOrSpread, VarDecl,
    VarDeclKind, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{Diagnostic, DiagnosticKind};
use crate::core::extract::scope::{DeclScope, FunctionKind, ScopeStack};
use crate::core::icu::validate_icu;
use crate::core::markup::MarkupBuilder;
use crate::core::markup::text::collapse_whitespace;
use crate::core::output::ParsingOutput;
use crate::core::parsers::SourceUnit;
use crate::core::parsing_config::ParsingConfig;
use crate::core::symbols::{CapabilityTag, SymbolTable};
use crate::core::unit::{DataFormat, TranslationUnit, UnitSource};
use crate::core::utils::{
    AttrValue, attr_value, extract_binding_names, find_attr, static_string, str_value,
    unwrap_transparent,
};

const ID_ATTR: &str = "id";
const CONTEXT_ATTR: &str = "context";
const ID_OPTION: &str = "$id";
const CONTEXT_OPTION: &str = "$context";

pub struct FileExtractor<'a> {
    unit: &'a SourceUnit,
    symbols: &'a SymbolTable,
    config: &'a ParsingConfig,
    output: ParsingOutput,
    scopes: ScopeStack,
    /// Where the declarators currently being visited bind.
    decl_scope: DeclScope,
    /// Inside an outer translation scope; nested ones are not emitted again.
    /// Reset inside functions: a callback's `<T>` is its own scope.
    in_scope: bool,
}

impl<'a> FileExtractor<'a> {
    pub fn new(unit: &'a SourceUnit, symbols: &'a SymbolTable, config: &'a ParsingConfig) -> Self {
        Self {
            unit,
            symbols,
            config,
            output: ParsingOutput::new(),
            scopes: ScopeStack::new(),
            decl_scope: DeclScope::Block,
            in_scope: false,
        }
    }

    /// Run the walk and hand back this file's private output.
    pub fn extract(mut self) -> ParsingOutput {
        // Nothing imported from a translation module: nothing to find.
        if self.symbols.is_empty() {
            return self.output;
        }
        let unit = self.unit;
        unit.module.visit_with(&mut self);
        self.output
    }

    fn extract_scope(&mut self, element: &JSXElement) {
        let id = self.attr_metadata(element, ID_ATTR);
        let context = self.attr_metadata(element, CONTEXT_ATTR);
        for result in [&id, &context] {
            if let Err(diagnostic) = result {
                self.output.push_error(diagnostic.clone());
            }
        }

        let content =
            MarkupBuilder::new(self.unit, self.symbols, self.config, &mut self.output)
                .build_scope(element);

        if let (Some(content), Ok(id), Ok(context)) = (content, id, context) {
            self.output.push_update(TranslationUnit::new(
                DataFormat::Jsx,
                UnitSource::Markup(content),
                id,
                context,
                &self.unit.file_path,
            ));
        }
    }

    fn attr_metadata(
        &mut self,
        element: &JSXElement,
        name: &str,
    ) -> Result<Option<String>, Diagnostic> {
        match find_attr(element, name).map(attr_value) {
            None => Ok(None),
            Some(AttrValue::Static(value)) => Ok(Some(value)),
            Some(AttrValue::Dynamic(span)) => self.dynamic_metadata(name, span),
        }
    }

    /// Dropped with a warning under `ignore_additional_data`, otherwise an error.
    fn dynamic_metadata(&mut self, name: &str, span: Span) -> Result<Option<String>, Diagnostic> {
        let context = self.unit.locate(span.lo);
        if self.config.ignore_additional_data {
            self.output.push_warning(Diagnostic::at(
                DiagnosticKind::NonStaticMetadata,
                context,
                format!("dynamic `{}` ignored", name),
            ));
            Ok(None)
        } else {
            Err(Diagnostic::at(
                DiagnosticKind::NonStaticMetadata,
                context,
                format!("`{}` must be a static string", name),
            ))
        }
    }

    /// `$id` / `$context` from a translator call's options object.
    fn call_metadata(
        &mut self,
        options: Option<&ExprOrSpread>,
    ) -> Result<(Option<String>, Option<String>), Diagnostic> {
        let mut id = None;
        let mut context = None;
        let Some(options) = options else {
            return Ok((id, context));
        };
        let Expr::Object(object) = unwrap_transparent(&options.expr) else {
            return Ok((id, context));
        };

        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            let key = match &kv.key {
                PropName::Ident(ident) => ident.sym.to_string(),
                PropName::Str(s) => str_value(s),
                _ => continue,
            };
            let slot = match key.as_str() {
                ID_OPTION => &mut id,
                CONTEXT_OPTION => &mut context,
                _ => continue,
            };
            *slot = match static_string(&kv.value) {
                Some(value) => Some(value),
                None => self.dynamic_metadata(&key, kv.value.span())?,
            };
        }
        Ok((id, context))
    }

    /// `t("Hello {name}", { $id: "greeting" })`
    fn extract_string_call(&mut self, call: &CallExpr) {
        let Some(first) = call.args.first() else {
            return;
        };
        let content = match (&first.spread, static_string(&first.expr)) {
            (None, Some(content)) => content,
            _ => {
                let kind = match unwrap_transparent(&first.expr) {
                    Expr::Tpl(_) => DiagnosticKind::TemplateLiteralWithInterpolation,
                    _ => DiagnosticKind::NonStaticContent,
                };
                self.dynamic_string(kind, first.expr.span());
                return;
            }
        };

        let (id, context) = match self.call_metadata(call.args.get(1)) {
            Ok(metadata) => metadata,
            Err(diagnostic) => {
                self.output.push_error(diagnostic);
                return;
            }
        };

        if let Err(err) = validate_icu(&content) {
            let diagnostic = Diagnostic::at(
                DiagnosticKind::InvalidIcu,
                self.unit.locate(first.expr.span().lo),
                format!("invalid ICU message: {}", err),
            );
            if self.config.ignore_invalid_icu {
                self.output.push_warning(diagnostic);
            } else {
                self.output.push_error(diagnostic);
            }
            return;
        }

        self.output.push_update(TranslationUnit::new(
            DataFormat::Icu,
            UnitSource::Message(content),
            id,
            context,
            &self.unit.file_path,
        ));
    }

    fn dynamic_string(&mut self, kind: DiagnosticKind, span: Span) {
        if self.config.ignore_dynamic_content {
            return;
        }
        let snippet = collapse_whitespace(&self.unit.snippet(span));
        self.output.push_error(Diagnostic::at(
            kind,
            self.unit.locate(span.lo),
            format!("translator called with dynamic content `{}`", snippet),
        ));
    }

    fn check_call_context(&mut self, accessor: CapabilityTag, call: &CallExpr) {
        let expected = match (accessor, self.scopes.current_function()) {
            (CapabilityTag::SyncAccessor, Some(FunctionKind::Async)) => "a synchronous",
            (CapabilityTag::AsyncAccessor, Some(FunctionKind::Sync)) => "an async",
            _ => return,
        };
        let callee = self.unit.snippet(call.callee.span());
        self.output.push_error(Diagnostic::at(
            DiagnosticKind::AsyncSyncRuleViolation,
            self.unit.locate(call.span.lo),
            format!("`{}` must be called from {} function", callee, expected),
        ));
    }

    /// Accessor behind `useGT()`, `await getGT()`, `gt.useGT()`.
    fn accessor_call(&self, init: &Expr) -> Option<CapabilityTag> {
        let call = match unwrap_transparent(init) {
            Expr::Call(call) => call,
            Expr::Await(await_expr) => match unwrap_transparent(&await_expr.arg) {
                Expr::Call(call) => call,
                _ => return None,
            },
            _ => return None,
        };
        self.symbols
            .resolve_callee(&call.callee)
            .filter(CapabilityTag::is_accessor)
    }

    fn shadow_bindings<'p>(
        &mut self,
        pats: impl IntoIterator<Item = &'p Pat>,
        scope: DeclScope,
    ) {
        for pat in pats {
            for name in extract_binding_names(pat) {
                self.scopes.shadow(name, scope);
            }
        }
    }

    fn enter_function(&mut self, is_async: bool) -> bool {
        self.scopes.enter_function(FunctionKind::from_async(is_async));
        std::mem::replace(&mut self.in_scope, false)
    }

    fn exit_function(&mut self, in_scope: bool) {
        self.scopes.exit_function();
        self.in_scope = in_scope;
    }
}

impl Visit for FileExtractor<'_> {
    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let is_outer_scope = !self.in_scope
            && self.symbols.resolve_jsx_name(&node.opening.name)
                == Some(CapabilityTag::TranslationScope);
        if !is_outer_scope {
            node.visit_children_with(self);
            return;
        }

        self.extract_scope(node);
        // Still walk the children for translator calls inside slots.
        self.in_scope = true;
        node.visit_children_with(self);
        self.in_scope = false;
    }

    fn visit_function(&mut self, node: &Function) {
        let in_scope = self.enter_function(node.is_async);
        self.shadow_bindings(node.params.iter().map(|p| &p.pat), DeclScope::Function);
        node.visit_children_with(self);
        self.exit_function(in_scope);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        let in_scope = self.enter_function(node.is_async);
        self.shadow_bindings(&node.params, DeclScope::Function);
        node.visit_children_with(self);
        self.exit_function(in_scope);
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.scopes.enter_block();
        node.visit_children_with(self);
        self.scopes.exit_block();
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.scopes.enter_block();
        self.shadow_bindings(node.param.as_ref(), DeclScope::Block);
        node.body.visit_with(self);
        self.scopes.exit_block();
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.scopes.enter_block();
        node.visit_children_with(self);
        self.scopes.exit_block();
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.scopes.enter_block();
        node.visit_children_with(self);
        self.scopes.exit_block();
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.scopes.enter_block();
        node.visit_children_with(self);
        self.scopes.exit_block();
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        let scope = match node.kind {
            VarDeclKind::Var => DeclScope::Function,
            VarDeclKind::Let | VarDeclKind::Const => DeclScope::Block,
        };
        let outer = std::mem::replace(&mut self.decl_scope, scope);
        node.visit_children_with(self);
        self.decl_scope = outer;
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let accessor = node.init.as_deref().and_then(|init| self.accessor_call(init));
        match (&node.name, accessor) {
            (Pat::Ident(binding), Some(tag)) => {
                self.scopes
                    .insert_translator(binding.id.sym.to_string(), tag, self.decl_scope);
            }
            (pat, _) => self.shadow_bindings([pat], self.decl_scope),
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(accessor) = self.symbols.resolve_callee(&node.callee)
            && accessor.is_accessor()
        {
            self.check_call_context(accessor, node);
        }

        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && self.scopes.translator(ident.sym.as_str()).is_some()
        {
            self.extract_string_call(node);
        }

        node.visit_children_with(self);
    }
}
