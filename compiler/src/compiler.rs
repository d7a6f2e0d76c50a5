//! Compilation orchestration.
//!
//! Takes a batch of `"name=expression"` (or bare expression) strings through
//! the full pipeline: name extraction and validation, parsing, dependency
//! ordering, and closure compilation. The first error aborts the batch.

use std::collections::{HashMap, HashSet};

use mathfn_core::{AngleUnit, CompileError, CompiledFn, ErrorKind, NumberFormat};
use mathfn_graph::DependencyGraph;
use mathfn_parser::{parse, ParsedExpr};

use crate::compile::ExprCompiler;
use crate::result::CompileResult;
use crate::symbols::{generated_name, SymbolTable};

/// Compile a batch of function definitions with the default configuration
/// (radians, invariant number format).
pub fn compile<S: AsRef<str>>(sources: &[S]) -> CompileResult {
    Compiler::new().compile(sources)
}

/// Compile a single definition, returning its function when compilation
/// succeeds.
pub fn compile_function(source: &str) -> Option<CompiledFn> {
    Compiler::new().compile_function(source)
}

/// Compiler configuration.
///
/// ```
/// use mathfn_compiler::{AngleUnit, Compiler};
///
/// let result = Compiler::new()
///     .angle_unit(AngleUnit::Degree)
///     .compile(&["sin(x)"]);
/// assert!(result.is_success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    angle_unit: AngleUnit,
    format: NumberFormat,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How the trigonometric built-ins interpret their input.
    pub fn angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    /// The locale characters the lexer and number parser honor.
    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Compile a batch of definitions. The result holds the compiled
    /// functions in declaration order, or the error that stopped the batch.
    pub fn compile<S: AsRef<str>>(&self, sources: &[S]) -> CompileResult {
        match self.compile_batch(sources) {
            Ok((functions, graph)) => CompileResult::success(functions, graph),
            Err(error) => CompileResult::failure(error),
        }
    }

    /// Compile a single definition to its function, `None` on any error.
    pub fn compile_function(&self, source: &str) -> Option<CompiledFn> {
        self.compile(&[source]).into_functions().into_iter().next()
    }

    fn compile_batch<S: AsRef<str>>(
        &self,
        sources: &[S],
    ) -> Result<(Vec<CompiledFn>, DependencyGraph<String>), CompileError> {
        let entries = create_function_map(sources)?;

        let mut symbols = SymbolTable::new();
        for (name, _) in &entries {
            symbols.add_function(name);
        }

        let mut parsed: HashMap<&str, ParsedExpr> = HashMap::with_capacity(entries.len());
        for (name, expression) in &entries {
            let expr = parse(expression, self.format)?;
            for callee in &expr.calls {
                symbols.add_reference(name, callee);
            }
            parsed.insert(name.as_str(), expr);
        }

        let Some(order) = symbols.compilation_order() else {
            return Err(CompileError::new(ErrorKind::CyclicFunctions));
        };

        for name in &order {
            let Some(expr) = parsed.get(name.as_str()) else {
                return Err(CompileError::with_message(
                    ErrorKind::UnknownFunction,
                    format!("unknown function '{name}'"),
                ));
            };

            let function =
                ExprCompiler::new(&symbols, self.angle_unit, self.format).compile(&expr.root)?;
            symbols.finalize(name, function);
        }

        let (mut compiled, graph) = symbols.into_parts();
        let mut functions = Vec::with_capacity(entries.len());
        for (name, _) in &entries {
            let Some(function) = compiled.remove(name) else {
                return Err(CompileError::with_message(
                    ErrorKind::UnknownFunction,
                    format!("unknown function '{name}'"),
                ));
            };
            functions.push(function);
        }

        Ok((functions, graph))
    }
}

/// Split each source at the first `=` into a (name, expression) pair,
/// keeping declaration order. Unnamed sources get a generated name.
fn create_function_map<S: AsRef<str>>(sources: &[S]) -> Result<Vec<(String, String)>, CompileError> {
    let mut entries = Vec::with_capacity(sources.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(sources.len());

    for (index, source) in sources.iter().enumerate() {
        let source = source.as_ref();
        let (name, expression) = match source.split_once('=') {
            Some((name, expression)) => (validate_function_name(name)?, expression.to_string()),
            None => (generated_name(index), source.to_string()),
        };

        if !seen.insert(name.clone()) {
            return Err(CompileError::with_message(
                ErrorKind::InvalidFunctionName,
                format!("duplicate function name '{name}'"),
            ));
        }

        entries.push((name, expression));
    }

    Ok(entries)
}

/// Validate the declared name left of the `=`: trimmed, an optional
/// parenthesized parameter suffix stripped (`f(x)` declares `f`), the rest
/// a letter followed by letters and digits. Same character classes as the
/// lexer's identifier rule, so every valid name is also callable.
fn validate_function_name(raw: &str) -> Result<String, CompileError> {
    let name = raw.trim();
    let name = match name.find('(') {
        Some(paren) => name[..paren].trim_end(),
        None => name,
    };

    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => first.is_alphabetic() && chars.all(char::is_alphanumeric),
        None => false,
    };

    if !valid {
        return Err(CompileError::with_message(
            ErrorKind::InvalidFunctionName,
            format!("invalid function name '{name}'"),
        ));
    }

    Ok(name.to_string())
}
