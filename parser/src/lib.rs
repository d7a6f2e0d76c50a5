//! mathfn Parser
//!
//! This crate turns expression text into syntax trees:
//! - Locale-aware tokenization (decimal separator, argument separator,
//!   sign characters)
//! - Precedence-climbing expression parsing with implied multiplication
//! - Call-reference collection for dependency analysis

mod ast;
mod lexer;
mod parser;

pub use ast::{BinaryOp, SyntaxNode};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse, ParsedExpr, Parser};

/// Result type for lexing and parsing operations.
pub type ParseResult<T> = Result<T, mathfn_core::CompileError>;
