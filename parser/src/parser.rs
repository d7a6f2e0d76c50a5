//! Precedence-climbing expression parser.
//!
//! Binding power: addition/subtraction 1, multiplication/division/modulus 2,
//! unary negation 3, power 4. Power is the only right-associative operator:
//! its right operand recurses at the same precedence, so chained powers nest
//! from the right. Calls bind tightest of all (6) but are consumed whole in
//! `parse_term`, so their precedence never drives the climb.
//!
//! Multiplication is implied when a number, identifier, or `(` immediately
//! follows a completed operand: `2x`, `2(x)`, and `(x)2` all parse as
//! products.

use mathfn_core::{CompileError, ErrorKind, NumberFormat};

use crate::ast::{BinaryOp, SyntaxNode};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::ParseResult;

const PREC_ADDITIVE: u8 = 1;
const PREC_MULTIPLICATIVE: u8 = 2;
const PREC_NEGATION: u8 = 3;
const PREC_POWER: u8 = 4;

/// A parsed expression plus the callee names of every call it contains, in
/// parse order. The caller decides which of those become dependency edges.
#[derive(Debug, Clone)]
pub struct ParsedExpr {
    pub root: SyntaxNode,
    pub calls: Vec<String>,
}

/// Lex and parse a single expression.
pub fn parse(input: &str, format: NumberFormat) -> ParseResult<ParsedExpr> {
    let tokens = Lexer::new(input, format).tokenize()?;
    Parser::new(tokens, input.len()).parse()
}

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Source length; the offset reported for end-of-input errors.
    end: usize,
    calls: Vec<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            calls: Vec::new(),
        }
    }

    /// Parse one complete expression. Anything left over afterwards is
    /// `invalid-syntax`; the first error ends the parse.
    pub fn parse(mut self) -> ParseResult<ParsedExpr> {
        let root = self.parse_expression(0)?;

        if self.pos < self.tokens.len() {
            return Err(CompileError::at(
                ErrorKind::InvalidSyntax,
                self.error_position(),
            ));
        }

        Ok(ParsedExpr {
            root,
            calls: self.calls,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Offset of the current token, or end-of-input.
    fn error_position(&self) -> usize {
        self.peek().map(|t| t.start).unwrap_or(self.end)
    }

    fn parse_expression(&mut self, precedence: u8) -> ParseResult<SyntaxNode> {
        let Some(token) = self.peek() else {
            return Err(CompileError::at(ErrorKind::ExpressionExpected, self.end));
        };

        let mut left = if token.kind == TokenKind::Minus {
            self.advance();
            if self.peek().is_none() {
                return Err(CompileError::at(ErrorKind::InvalidTerm, self.end));
            }
            // Negation binds looser than power: -2^x is -(2^x).
            let operand = self.parse_expression(PREC_NEGATION)?;
            SyntaxNode::Negation(Box::new(operand))
        } else {
            self.parse_term()?
        };

        while let Some(token) = self.peek() {
            // An explicit operator continues the climb; failing that, an
            // operand-starting token implies a multiplication and consumes
            // no operator token at all.
            let (op, implied) = match binary_op(token.kind) {
                Some(op) => (op, false),
                None if implies_multiplication(token.kind) => (BinaryOp::Multiply, true),
                None => break,
            };

            let next = precedence_of(op);
            if next < precedence || (next == precedence && !is_right_associative(op)) {
                break;
            }

            if !implied {
                self.advance();
            }

            let right = self.parse_expression(next)?;
            left = SyntaxNode::Binary(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<SyntaxNode> {
        let Some(token) = self.peek().cloned() else {
            return Err(CompileError::at(ErrorKind::InvalidTerm, self.end));
        };

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(SyntaxNode::Number(token))
            }
            TokenKind::Identifier => {
                self.advance();
                if self.peek_kind() == Some(TokenKind::LParen) {
                    self.parse_call(token)
                } else {
                    Ok(SyntaxNode::Identifier(token))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(CompileError::at(ErrorKind::InvalidTerm, token.start)),
        }
    }

    /// Parse `name(arg, ...)` with the name token already consumed. At
    /// least one argument is required; arity is validated later against the
    /// resolved callee.
    fn parse_call(&mut self, name: Token) -> ParseResult<SyntaxNode> {
        self.calls.push(name.text.clone());
        self.expect(TokenKind::LParen)?;

        if self.peek_kind() == Some(TokenKind::RParen) {
            return Err(CompileError::at(
                ErrorKind::ArgumentExpected,
                self.error_position(),
            ));
        }

        let mut args = vec![self.parse_expression(0)?];
        while self.peek_kind() == Some(TokenKind::ListSep) {
            self.advance();
            args.push(self.parse_expression(0)?);
        }

        self.expect(TokenKind::RParen)?;
        Ok(SyntaxNode::Call(name, args))
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(())
            }
            _ => Err(CompileError::with_message_at(
                ErrorKind::MissingToken,
                format!("expected '{}'", kind.name()),
                self.error_position(),
            )),
        }
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Subtract),
        TokenKind::Star => Some(BinaryOp::Multiply),
        TokenKind::Slash => Some(BinaryOp::Divide),
        TokenKind::Percent => Some(BinaryOp::Modulus),
        TokenKind::Caret => Some(BinaryOp::Power),
        _ => None,
    }
}

/// True when the token can start an operand, which after a completed
/// operand implies a multiplication.
fn implies_multiplication(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number | TokenKind::Identifier | TokenKind::LParen
    )
}

fn precedence_of(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add | BinaryOp::Subtract => PREC_ADDITIVE,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulus => PREC_MULTIPLICATIVE,
        BinaryOp::Power => PREC_POWER,
    }
}

fn is_right_associative(op: BinaryOp) -> bool {
    op == BinaryOp::Power
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_root(input: &str) -> SyntaxNode {
        parse(input, NumberFormat::invariant()).unwrap().root
    }

    fn parse_error(input: &str) -> CompileError {
        parse(input, NumberFormat::invariant()).unwrap_err()
    }

    fn number(text: &str, start: usize) -> SyntaxNode {
        SyntaxNode::Number(Token::new(text, start, TokenKind::Number))
    }

    fn identifier(text: &str, start: usize) -> SyntaxNode {
        SyntaxNode::Identifier(Token::new(text, start, TokenKind::Identifier))
    }

    fn binary(op: BinaryOp, left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Binary(op, Box::new(left), Box::new(right))
    }

    #[test]
    fn additive_is_left_associative() {
        // (1 - 2) + 3
        assert_eq!(
            parse_root("1 - 2 + 3"),
            binary(
                BinaryOp::Add,
                binary(BinaryOp::Subtract, number("1", 0), number("2", 4)),
                number("3", 8),
            )
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 1 + (2 * 3)
        assert_eq!(
            parse_root("1+2*3"),
            binary(
                BinaryOp::Add,
                number("1", 0),
                binary(BinaryOp::Multiply, number("2", 2), number("3", 4)),
            )
        );
    }

    #[test]
    fn power_is_right_associative() {
        // 4 ^ (3 ^ 2)
        assert_eq!(
            parse_root("4^3^2"),
            binary(
                BinaryOp::Power,
                number("4", 0),
                binary(BinaryOp::Power, number("3", 2), number("2", 4)),
            )
        );
    }

    #[test]
    fn negation_binds_looser_than_power() {
        // -(2 ^ x)
        assert_eq!(
            parse_root("-2^x"),
            SyntaxNode::Negation(Box::new(binary(
                BinaryOp::Power,
                number("2", 1),
                identifier("x", 3),
            )))
        );
    }

    #[test]
    fn negation_binds_tighter_than_multiplication() {
        // (-2) * x
        assert_eq!(
            parse_root("-2*x"),
            binary(
                BinaryOp::Multiply,
                SyntaxNode::Negation(Box::new(number("2", 1))),
                identifier("x", 3),
            )
        );
    }

    #[test]
    fn double_negation_nests() {
        assert_eq!(
            parse_root("--5"),
            SyntaxNode::Negation(Box::new(SyntaxNode::Negation(Box::new(number("5", 2)))))
        );
    }

    #[test]
    fn implied_multiplication_forms() {
        let expected = binary(BinaryOp::Multiply, number("2", 0), identifier("x", 1));
        assert_eq!(parse_root("2x"), expected);

        let spaced = binary(BinaryOp::Multiply, number("2", 0), identifier("x", 2));
        assert_eq!(parse_root("2 x"), spaced);

        let parens = binary(BinaryOp::Multiply, number("2", 0), identifier("x", 2));
        assert_eq!(parse_root("2(x)"), parens);

        let postfix = binary(BinaryOp::Multiply, identifier("x", 1), number("2", 3));
        assert_eq!(parse_root("(x)2"), postfix);
    }

    #[test]
    fn implied_multiplication_has_multiplicative_precedence() {
        // 1 + (2 * x)
        assert_eq!(
            parse_root("1+2x"),
            binary(
                BinaryOp::Add,
                number("1", 0),
                binary(BinaryOp::Multiply, number("2", 2), identifier("x", 3)),
            )
        );
    }

    #[test]
    fn call_with_arguments() {
        let parsed = parse("max(x, 2)", NumberFormat::invariant()).unwrap();
        assert_eq!(parsed.calls, vec!["max".to_string()]);
        assert_eq!(
            parsed.root,
            SyntaxNode::Call(
                Token::new("max", 0, TokenKind::Identifier),
                vec![identifier("x", 4), number("2", 7)],
            )
        );
    }

    #[test]
    fn nested_calls_record_every_callee() {
        let parsed = parse("sin(cos(x))", NumberFormat::invariant()).unwrap();
        assert_eq!(parsed.calls, vec!["sin".to_string(), "cos".to_string()]);
    }

    #[test]
    fn empty_call_is_argument_expected() {
        let error = parse_error("tan()");
        assert_eq!(error.kind(), ErrorKind::ArgumentExpected);
        assert_eq!(error.position(), Some(4));
    }

    #[test]
    fn missing_close_paren() {
        let error = parse_error("(1 + 2");
        assert_eq!(error.kind(), ErrorKind::MissingToken);
        assert_eq!(error.position(), Some(6));
    }

    #[test]
    fn trailing_tokens_are_invalid_syntax() {
        let error = parse_error("1 + 2 )");
        assert_eq!(error.kind(), ErrorKind::InvalidSyntax);
        assert_eq!(error.position(), Some(6));
    }

    #[test]
    fn empty_input_is_expression_expected() {
        let error = parse_error("");
        assert_eq!(error.kind(), ErrorKind::ExpressionExpected);
        assert_eq!(error.position(), Some(0));
    }

    #[test]
    fn standalone_decimal_separator_is_invalid_term() {
        let error = parse_error(".");
        assert_eq!(error.kind(), ErrorKind::InvalidTerm);
        assert_eq!(error.position(), Some(0));
    }

    #[test]
    fn dangling_minus_is_invalid_term() {
        let error = parse_error("-");
        assert_eq!(error.kind(), ErrorKind::InvalidTerm);
        assert_eq!(error.position(), Some(1));
    }

    #[test]
    fn dangling_operator_expects_an_expression() {
        let error = parse_error("1 -");
        assert_eq!(error.kind(), ErrorKind::ExpressionExpected);
        assert_eq!(error.position(), Some(3));
    }
}
