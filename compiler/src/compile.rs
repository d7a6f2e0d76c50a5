//! Expression-to-closure compilation.
//!
//! Each syntax node compiles to a `CompiledFn`; interior nodes capture their
//! children's closures, so the tree becomes a tree of nested calls with no
//! interpretation step left at evaluation time. Domain violations (log of a
//! negative, division by zero) are not compile errors; they surface as
//! NaN or infinity when the function runs.

use std::sync::Arc;

use mathfn_core::builtins;
use mathfn_core::{AngleUnit, CompileError, CompiledFn, ErrorKind, NumberFormat};
use mathfn_parser::{BinaryOp, SyntaxNode, Token};

use crate::symbols::SymbolTable;

pub(crate) struct ExprCompiler<'a> {
    symbols: &'a SymbolTable,
    angle_unit: AngleUnit,
    format: NumberFormat,
}

impl<'a> ExprCompiler<'a> {
    pub(crate) fn new(symbols: &'a SymbolTable, angle_unit: AngleUnit, format: NumberFormat) -> Self {
        Self {
            symbols,
            angle_unit,
            format,
        }
    }

    pub(crate) fn compile(&self, node: &SyntaxNode) -> Result<CompiledFn, CompileError> {
        match node {
            SyntaxNode::Number(token) => self.compile_number(token),
            SyntaxNode::Identifier(token) => self.compile_identifier(token),
            SyntaxNode::Negation(operand) => {
                let operand = self.compile(operand)?;
                Ok(Arc::new(move |x| -operand(x)))
            }
            SyntaxNode::Binary(op, left, right) => self.compile_binary(*op, left, right),
            SyntaxNode::Call(name, args) => self.compile_call(name, args),
        }
    }

    /// Parse the literal as an `f64` after normalizing the locale characters
    /// back to the invariant forms `f64::from_str` understands.
    fn compile_number(&self, token: &Token) -> Result<CompiledFn, CompileError> {
        let text: String = token
            .text
            .chars()
            .map(|c| {
                if c == self.format.decimal_separator {
                    '.'
                } else if c == self.format.positive_sign {
                    '+'
                } else if c == self.format.negative_sign {
                    '-'
                } else {
                    c
                }
            })
            .collect();

        let value: f64 = text
            .parse()
            .map_err(|_| CompileError::at(ErrorKind::InvalidNumber, token.start))?;

        Ok(Arc::new(move |_| value))
    }

    fn compile_identifier(&self, token: &Token) -> Result<CompiledFn, CompileError> {
        let name = token.text.as_str();

        if name.eq_ignore_ascii_case("x") {
            return Ok(Arc::new(|x| x));
        }

        if let Some(value) = builtins::constant(name) {
            return Ok(Arc::new(move |_| value));
        }

        if builtins::is_builtin_function(name) || self.symbols.is_custom(name) {
            return Err(CompileError::for_name(
                ErrorKind::ParenthesesRequired,
                name,
                token.start,
            ));
        }

        Err(CompileError::for_name(
            ErrorKind::UnknownIdentifier,
            name,
            token.start,
        ))
    }

    fn compile_binary(
        &self,
        op: BinaryOp,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> Result<CompiledFn, CompileError> {
        let left = self.compile(left)?;
        let right = self.compile(right)?;

        let function: CompiledFn = match op {
            BinaryOp::Add => Arc::new(move |x| left(x) + right(x)),
            BinaryOp::Subtract => Arc::new(move |x| left(x) - right(x)),
            BinaryOp::Multiply => Arc::new(move |x| left(x) * right(x)),
            BinaryOp::Divide => Arc::new(move |x| left(x) / right(x)),
            BinaryOp::Modulus => Arc::new(move |x| left(x) % right(x)),
            BinaryOp::Power => Arc::new(move |x| left(x).powf(right(x))),
        };

        Ok(function)
    }

    /// Compile a call. The callee resolves before any argument compiles, so
    /// an unknown name is reported even when an argument is itself broken.
    /// Lookup is arity-tiered: a name that exists only at another arity is
    /// unresolved here, not an arity error (`max(1)` is an unknown
    /// function, `max` being known only with two arguments).
    fn compile_call(&self, name: &Token, args: &[SyntaxNode]) -> Result<CompiledFn, CompileError> {
        match args.len() {
            1 => {
                if let Some(function) = builtins::monadic(&name.text, self.angle_unit) {
                    let arg = self.compile(&args[0])?;
                    return Ok(Arc::new(move |x| function(arg(x))));
                }

                if let Some(target) = self.symbols.resolve(&name.text) {
                    let target = Arc::clone(target);
                    let arg = self.compile(&args[0])?;
                    return Ok(Arc::new(move |x| target(arg(x))));
                }

                Err(self.unknown_function(name))
            }
            2 => {
                if let Some(function) = builtins::dyadic(&name.text) {
                    let first = self.compile(&args[0])?;
                    let second = self.compile(&args[1])?;
                    return Ok(Arc::new(move |x| function(first(x), second(x))));
                }

                Err(self.unknown_function(name))
            }
            // The parser guarantees at least one argument; nothing accepts
            // more than two, whatever the name resolves to.
            _ => Err(CompileError::at(ErrorKind::ExcessArguments, name.start)),
        }
    }

    fn unknown_function(&self, name: &Token) -> CompileError {
        CompileError::for_name(ErrorKind::UnknownFunction, &name.text, name.start)
    }
}
