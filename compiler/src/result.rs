//! The public compilation result.

use mathfn_core::{CompileError, CompiledFn};
use mathfn_graph::DependencyGraph;

/// Outcome of compiling a batch of function definitions.
///
/// On success, `functions()` holds one compiled function per input, in
/// declaration order. On failure the function list is empty and `errors()`
/// reports what went wrong.
pub struct CompileResult {
    functions: Vec<CompiledFn>,
    errors: Vec<CompileError>,
    graph: DependencyGraph<String>,
}

impl CompileResult {
    pub(crate) fn success(functions: Vec<CompiledFn>, graph: DependencyGraph<String>) -> Self {
        Self {
            functions,
            errors: Vec::new(),
            graph,
        }
    }

    pub(crate) fn failure(error: CompileError) -> Self {
        Self {
            functions: Vec::new(),
            errors: vec![error],
            graph: DependencyGraph::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Compiled functions in declaration order; empty on failure.
    pub fn functions(&self) -> &[CompiledFn] {
        &self.functions
    }

    pub fn into_functions(self) -> Vec<CompiledFn> {
        self.functions
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    /// Every function whose value could change when `name` changes: `name`
    /// itself plus all its direct and transitive callers. Empty when the
    /// name is unknown or compilation failed.
    pub fn dependent_functions(&self, name: &str) -> Vec<String> {
        self.graph.closure(name)
    }
}
