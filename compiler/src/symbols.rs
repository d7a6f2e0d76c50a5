//! Custom-function symbol table.
//!
//! Tracks the declared function names, the dependency edges between them,
//! and the closures finalized so far. Compilation walks the topological
//! order of the graph, so by the time a function compiles, everything it
//! calls has already been finalized here.

use std::collections::HashMap;

use mathfn_core::CompiledFn;
use mathfn_graph::DependencyGraph;

/// Prefix of names synthesized for unnamed expressions. Declared names must
/// start with a letter, so the two namespaces cannot collide.
const GENERATED_PREFIX: &str = "_";

/// Name for the unnamed expression at `index`.
pub(crate) fn generated_name(index: usize) -> String {
    format!("{GENERATED_PREFIX}{index}")
}

pub(crate) fn is_generated_name(name: &str) -> bool {
    name.starts_with(GENERATED_PREFIX)
}

#[derive(Default)]
pub(crate) struct SymbolTable {
    graph: DependencyGraph<String>,
    compiled: HashMap<String, CompiledFn>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declare a custom function name.
    pub(crate) fn add_function(&mut self, name: &str) {
        self.graph.add_node(name.to_string());
    }

    /// Record that `caller`'s expression calls `callee`. References to
    /// anything other than a declared, non-generated function are not
    /// dependencies (built-ins are always available) and are dropped.
    pub(crate) fn add_reference(&mut self, caller: &str, callee: &str) {
        if caller.is_empty()
            || callee.is_empty()
            || is_generated_name(callee)
            || !self.graph.contains(callee)
        {
            return;
        }

        // callee → caller: the callee must compile first
        self.graph.add_edge(callee.to_string(), caller.to_string());
    }

    /// An order in which every function compiles after its callees, or
    /// `None` when the call graph is cyclic.
    pub(crate) fn compilation_order(&self) -> Option<Vec<String>> {
        self.graph.topological_sort()
    }

    /// Store the compiled closure for `name`, making it callable from
    /// functions compiled later.
    pub(crate) fn finalize(&mut self, name: &str, function: CompiledFn) {
        self.compiled.insert(name.to_string(), function);
    }

    /// The finalized closure for `name`, if it has compiled already.
    pub(crate) fn resolve(&self, name: &str) -> Option<&CompiledFn> {
        self.compiled.get(name)
    }

    /// True when `name` is a declared custom function, compiled or not.
    pub(crate) fn is_custom(&self, name: &str) -> bool {
        self.graph.contains(name)
    }

    pub(crate) fn into_parts(self) -> (HashMap<String, CompiledFn>, DependencyGraph<String>) {
        (self.compiled, self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn generated_names_are_recognized() {
        assert!(is_generated_name(&generated_name(0)));
        assert!(is_generated_name("_17"));
        assert!(!is_generated_name("f"));
    }

    #[test]
    fn references_to_undeclared_names_are_dropped() {
        let mut symbols = SymbolTable::new();
        symbols.add_function("f");
        symbols.add_function("g");
        symbols.add_reference("f", "g");
        symbols.add_reference("f", "sin"); // built-in, not declared
        symbols.add_reference("f", "_0"); // generated

        let order = symbols.compilation_order().unwrap();
        assert_eq!(order, vec!["g".to_string(), "f".to_string()]);
    }

    #[test]
    fn cyclic_references_have_no_order() {
        let mut symbols = SymbolTable::new();
        symbols.add_function("f");
        symbols.add_function("g");
        symbols.add_reference("f", "g");
        symbols.add_reference("g", "f");

        assert!(symbols.compilation_order().is_none());
    }

    #[test]
    fn finalized_functions_resolve() {
        let mut symbols = SymbolTable::new();
        symbols.add_function("f");
        assert!(symbols.resolve("f").is_none());
        assert!(symbols.is_custom("f"));

        symbols.finalize("f", Arc::new(|x| x + 1.0));
        let f = symbols.resolve("f").unwrap();
        assert_eq!(f(1.0), 2.0);
    }
}
