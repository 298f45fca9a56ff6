//! Lexical scope tracking for the extractor.
//!
//! Tracks translator bindings (e.g., `const t = useGT()`) with proper scope
//! handling for nested functions and arrow functions, together with whether
//! the innermost enclosing function is `async`.

use std::collections::HashMap;

use crate::core::symbols::CapabilityTag;

/// What a local name refers to, as far as the extractor cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorBinding {
    /// Result of calling an accessor (`useGT()` / `await getGT()`).
    Translator(CapabilityTag),
    /// A parameter or local that hides an outer translator.
    Shadowed,
}

/// Where a declaration binds: `let`/`const`/`catch` bind to the innermost
/// block, `var` and parameters to the enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclScope {
    Block,
    Function,
}

/// Synchronous or asynchronous function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Sync,
    Async,
}

impl FunctionKind {
    pub fn from_async(is_async: bool) -> Self {
        if is_async {
            FunctionKind::Async
        } else {
            FunctionKind::Sync
        }
    }
}

/// Stack of function and block scopes.
///
/// ```ignore
/// const t = useGT();          // scope 0: t -> Translator(SyncAccessor)
/// function inner(t) {         // push scope 1: t -> Shadowed
///     t("Hello");             // not a translator call
/// }                           // pop scope 1
/// if (x) { const t = 1; }     // block scope: t hidden only inside
/// ```
pub struct ScopeStack {
    /// Binding scopes (innermost last). Index 0 is the module scope.
    bindings_stack: Vec<HashMap<String, TranslatorBinding>>,
    /// Enclosing functions (innermost last); empty at module level.
    functions: Vec<FunctionKind>,
    /// Index into `bindings_stack` of each function's own scope, module first.
    function_scopes: Vec<usize>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            bindings_stack: vec![HashMap::new()],
            functions: Vec::new(),
            function_scopes: vec![0],
        }
    }

    /// Enter a function body.
    pub fn enter_function(&mut self, kind: FunctionKind) {
        self.function_scopes.push(self.bindings_stack.len());
        self.bindings_stack.push(HashMap::new());
        self.functions.push(kind);
    }

    /// Leave a function body. The module scope is never popped.
    pub fn exit_function(&mut self) {
        if self.function_scopes.len() > 1
            && let Some(start) = self.function_scopes.pop()
        {
            self.bindings_stack.truncate(start.max(1));
        }
        self.functions.pop();
    }

    /// Enter a block (`{ ... }`, loop head, `catch`).
    pub fn enter_block(&mut self) {
        self.bindings_stack.push(HashMap::new());
    }

    /// Leave a block. Never pops a function or module scope.
    pub fn exit_block(&mut self) {
        let function_scope = self.function_scopes.last().copied().unwrap_or(0);
        if self.bindings_stack.len() > function_scope + 1 {
            self.bindings_stack.pop();
        }
    }

    /// The innermost enclosing function, or `None` at module level.
    pub fn current_function(&self) -> Option<FunctionKind> {
        self.functions.last().copied()
    }

    pub fn insert_translator(&mut self, name: String, accessor: CapabilityTag, scope: DeclScope) {
        self.insert(name, TranslatorBinding::Translator(accessor), scope);
    }

    /// Hide any outer binding of `name` from `scope` inward.
    pub fn shadow(&mut self, name: String, scope: DeclScope) {
        self.insert(name, TranslatorBinding::Shadowed, scope);
    }

    fn insert(&mut self, name: String, binding: TranslatorBinding, scope: DeclScope) {
        let index = match scope {
            DeclScope::Block => self.bindings_stack.len().saturating_sub(1),
            DeclScope::Function => self.function_scopes.last().copied().unwrap_or(0),
        };
        if let Some(bindings) = self.bindings_stack.get_mut(index) {
            bindings.insert(name, binding);
        }
    }

    /// The accessor a name's translator came from, searching innermost first.
    pub fn translator(&self, name: &str) -> Option<CapabilityTag> {
        for scope in self.bindings_stack.iter().rev() {
            match scope.get(name) {
                Some(TranslatorBinding::Translator(tag)) => return Some(*tag),
                Some(TranslatorBinding::Shadowed) => return None,
                None => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_module_level() {
        let stack = ScopeStack::new();
        assert_eq!(stack.bindings_stack.len(), 1);
        assert_eq!(stack.current_function(), None);
    }

    #[test]
    fn test_enter_exit_function() {
        let mut stack = ScopeStack::new();
        stack.enter_function(FunctionKind::Async);
        assert_eq!(stack.current_function(), Some(FunctionKind::Async));
        stack.enter_function(FunctionKind::Sync);
        assert_eq!(stack.current_function(), Some(FunctionKind::Sync));
        stack.exit_function();
        assert_eq!(stack.current_function(), Some(FunctionKind::Async));
        stack.exit_function();
        assert_eq!(stack.current_function(), None);
    }

    #[test]
    fn test_exit_keeps_module_scope() {
        let mut stack = ScopeStack::new();
        stack.exit_function();
        assert_eq!(stack.bindings_stack.len(), 1);
    }

    #[test]
    fn test_inner_scope_sees_outer_translator() {
        let mut stack = ScopeStack::new();
        stack.insert_translator("t".to_string(), CapabilityTag::SyncAccessor, DeclScope::Block);
        stack.enter_function(FunctionKind::Sync);
        assert_eq!(stack.translator("t"), Some(CapabilityTag::SyncAccessor));
        stack.exit_function();
    }

    #[test]
    fn test_shadowing_hides_outer_translator() {
        let mut stack = ScopeStack::new();
        stack.insert_translator("t".to_string(), CapabilityTag::SyncAccessor, DeclScope::Block);

        stack.enter_function(FunctionKind::Sync);
        stack.shadow("t".to_string(), DeclScope::Function);
        assert_eq!(stack.translator("t"), None);
        stack.exit_function();

        assert_eq!(stack.translator("t"), Some(CapabilityTag::SyncAccessor));
    }

    #[test]
    fn test_inner_translator_wins() {
        let mut stack = ScopeStack::new();
        stack.insert_translator("t".to_string(), CapabilityTag::SyncAccessor, DeclScope::Block);
        stack.enter_function(FunctionKind::Async);
        stack.insert_translator("t".to_string(), CapabilityTag::AsyncAccessor, DeclScope::Block);
        assert_eq!(stack.translator("t"), Some(CapabilityTag::AsyncAccessor));
    }

    #[test]
    fn test_block_shadow_ends_with_block() {
        let mut stack = ScopeStack::new();
        stack.enter_function(FunctionKind::Sync);
        stack.enter_block();
        stack.insert_translator("t".to_string(), CapabilityTag::SyncAccessor, DeclScope::Block);

        stack.enter_block();
        stack.shadow("t".to_string(), DeclScope::Block);
        assert_eq!(stack.translator("t"), None);
        stack.exit_block();

        assert_eq!(stack.translator("t"), Some(CapabilityTag::SyncAccessor));
    }

    #[test]
    fn test_function_scoped_shadow_outlives_block() {
        let mut stack = ScopeStack::new();
        stack.insert_translator("t".to_string(), CapabilityTag::SyncAccessor, DeclScope::Block);
        stack.enter_function(FunctionKind::Sync);
        stack.enter_block();
        stack.enter_block();
        stack.shadow("t".to_string(), DeclScope::Function);
        stack.exit_block();
        assert_eq!(stack.translator("t"), None);
        stack.exit_block();
        stack.exit_function();
        assert_eq!(stack.translator("t"), Some(CapabilityTag::SyncAccessor));
    }

    #[test]
    fn test_exit_function_drops_unclosed_blocks() {
        let mut stack = ScopeStack::new();
        stack.enter_function(FunctionKind::Async);
        stack.enter_block();
        stack.exit_function();
        assert_eq!(stack.bindings_stack.len(), 1);
        stack.exit_block();
        assert_eq!(stack.bindings_stack.len(), 1);
    }
}
