//! Compile error types.

use thiserror::Error;

/// The closed set of failures the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCharacter,
    InvalidNumber,
    ExpressionExpected,
    VariableExpected,
    InvalidTerm,
    UnknownIdentifier,
    CyclicFunctions,
    InvalidFunctionName,
    InvalidSyntax,
    UnknownFunction,
    ParenthesesRequired,
    ArgumentExpected,
    ExcessArguments,
    UnexpectedToken,
    MissingToken,
}

impl ErrorKind {
    /// Default message for errors that carry no formatted text.
    pub fn describe(self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::ExpressionExpected => "expression expected",
            ErrorKind::VariableExpected => "variable expected",
            ErrorKind::InvalidTerm => "invalid term",
            ErrorKind::UnknownIdentifier => "unknown identifier",
            ErrorKind::CyclicFunctions => "functions contain a cyclic dependency",
            ErrorKind::InvalidFunctionName => "invalid function name",
            ErrorKind::InvalidSyntax => "invalid syntax",
            ErrorKind::UnknownFunction => "unknown function",
            ErrorKind::ParenthesesRequired => "parentheses are required to call a function",
            ErrorKind::ArgumentExpected => "argument expected",
            ErrorKind::ExcessArguments => "too many arguments",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::MissingToken => "missing token",
        }
    }
}

/// A compilation failure: what went wrong, an optional formatted message,
/// and an optional 0-based offset into the offending expression.
#[derive(Debug, Clone, Error)]
#[error("{}", self.render())]
pub struct CompileError {
    kind: ErrorKind,
    message: Option<String>,
    position: Option<usize>,
}

impl CompileError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            position: None,
        }
    }

    /// An error positioned at a source offset.
    pub fn at(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            message: None,
            position: Some(position),
        }
    }

    /// An error carrying an already-formatted message.
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            position: None,
        }
    }

    /// An error carrying both a formatted message and a source offset.
    pub fn with_message_at(kind: ErrorKind, message: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            position: Some(position),
        }
    }

    /// An error that embeds the offending name in its message.
    pub fn for_name(kind: ErrorKind, name: &str, position: usize) -> Self {
        let message = match kind {
            ErrorKind::UnknownFunction => format!("unknown function '{name}'"),
            ErrorKind::UnknownIdentifier => format!("unknown identifier '{name}'"),
            ErrorKind::ParenthesesRequired => {
                format!("'{name}' is a function; parentheses are required to call it")
            }
            _ => format!("{}: '{name}'", kind.describe()),
        };

        Self {
            kind,
            message: Some(message),
            position: Some(position),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 0-based offset into the expression the error refers to, when known.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The human-readable message: the formatted text when present, the
    /// kind's default otherwise.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or_else(|| self.kind.describe())
    }

    fn render(&self) -> String {
        match self.position {
            Some(position) => format!("{} (at position {})", self.text(), position),
            None => self.text().to_string(),
        }
    }
}
