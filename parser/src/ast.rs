//! Syntax tree for parsed expressions.

use crate::lexer::Token;

/// Binary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Power,
}

/// A node in an expression tree.
///
/// Trees are exclusively owned by their parse; they are never shared and
/// never cyclic. Terminal nodes keep their token so later stages can report
/// positions.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Number(Token),
    Identifier(Token),
    Negation(Box<SyntaxNode>),
    Binary(BinaryOp, Box<SyntaxNode>, Box<SyntaxNode>),
    /// A call: the callee's name token and the ordered arguments.
    Call(Token, Vec<SyntaxNode>),
}
