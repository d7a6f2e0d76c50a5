//! Lexer (tokenizer) for expression text.
//!
//! Which characters mean "decimal separator", "argument separator", and
//! "sign" comes from the active [`NumberFormat`], so the same grammar
//! accepts `2.5` or `2,5` depending on configuration.

use mathfn_core::{CompileError, ErrorKind, NumberFormat};

use crate::ParseResult;

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Plus,
    Minus,
    Star,    // *
    Slash,   // /
    Caret,   // ^
    Percent, // %
    LParen,  // (
    RParen,  // )
    /// The locale's argument separator.
    ListSep,
    /// The locale's decimal separator outside a numeric literal.
    DecimalSep,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Percent => "%",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::ListSep => "argument separator",
            TokenKind::DecimalSep => "decimal separator",
        }
    }
}

/// A token with its 0-based source offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            start,
            kind,
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    format: NumberFormat,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, format: NumberFormat) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            format,
        }
    }

    /// Tokenize all input. Scanning halts at the first lexical error.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek `n` characters past the current one without consuming anything.
    fn lookahead(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.pos = pos + c.len_utf8();
        Some(c)
    }

    /// Consume the current character into `text`.
    fn bump_into(&mut self, text: &mut String) {
        if let Some(c) = self.next_char() {
            text.push(c);
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.next_char();
        }
    }

    fn next_token(&mut self) -> ParseResult<Option<Token>> {
        self.skip_whitespace();

        let Some(&(start, c)) = self.chars.peek() else {
            return Ok(None);
        };
        self.next_char();

        // Locale-dependent characters take precedence over the fixed ones.
        let kind = if c == self.format.decimal_separator {
            if matches!(self.peek_char(), Some(d) if d.is_ascii_digit()) {
                return self.scan_number(start, c.to_string(), true).map(Some);
            }
            TokenKind::DecimalSep
        } else if c == self.format.list_separator {
            TokenKind::ListSep
        } else if c == self.format.positive_sign {
            TokenKind::Plus
        } else if c == self.format.negative_sign {
            TokenKind::Minus
        } else {
            match c {
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '^' => TokenKind::Caret,
                '%' => TokenKind::Percent,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ if c.is_ascii_digit() => {
                    return self.scan_number(start, c.to_string(), false).map(Some);
                }
                _ if c.is_alphabetic() => return Ok(Some(self.scan_identifier(start, c))),
                _ => return Err(CompileError::at(ErrorKind::InvalidCharacter, start)),
            }
        };

        Ok(Some(Token::new(c.to_string(), start, kind)))
    }

    /// Scan the remainder of a numeric literal whose first character is
    /// already in `text`. `seen_decimal` is true when the literal began
    /// with the decimal separator itself.
    fn scan_number(
        &mut self,
        start: usize,
        mut text: String,
        seen_decimal: bool,
    ) -> ParseResult<Token> {
        self.take_digits(&mut text);

        if !seen_decimal && self.peek_char() == Some(self.format.decimal_separator) {
            if matches!(self.lookahead(1), Some(d) if d.is_ascii_digit()) {
                self.bump_into(&mut text);
                self.take_digits(&mut text);
            } else {
                // trailing decimal separator, e.g. "14."
                return Err(CompileError::at(ErrorKind::InvalidNumber, self.pos));
            }
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            // Absorb the exponent only when digits follow, optionally after
            // an explicit sign; otherwise the marker starts a new token
            // ("2e" is the literal 2 followed by the identifier e).
            let has_sign = matches!(
                self.lookahead(1),
                Some(s) if s == self.format.positive_sign || s == self.format.negative_sign
            );
            let digit_at = if has_sign { 2 } else { 1 };

            if matches!(self.lookahead(digit_at), Some(d) if d.is_ascii_digit()) {
                self.bump_into(&mut text);
                if has_sign {
                    self.bump_into(&mut text);
                }
                self.take_digits(&mut text);
            }
        }

        // A decimal separator immediately after a completed literal is a
        // second separator ("5.7.11") or a fractional exponent ("1e1.1");
        // neither can ever form a valid number.
        if self.peek_char() == Some(self.format.decimal_separator) {
            return Err(CompileError::at(ErrorKind::InvalidNumber, self.pos));
        }

        Ok(Token::new(text, start, TokenKind::Number))
    }

    fn take_digits(&mut self, text: &mut String) {
        while matches!(self.peek_char(), Some(d) if d.is_ascii_digit()) {
            self.bump_into(text);
        }
    }

    fn scan_identifier(&mut self, start: usize, first: char) -> Token {
        let mut text = first.to_string();
        while matches!(self.peek_char(), Some(c) if c.is_alphanumeric()) {
            self.bump_into(&mut text);
        }

        Token::new(text, start, TokenKind::Identifier)
    }
}
