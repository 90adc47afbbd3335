//! Query syntax errors

use cardex_ast::Span;
use serde::Serialize;
use thiserror::Error;

/// A malformed query, carrying the byte offset of the offending input so a
/// front end can point at the exact character.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SyntaxError {
    #[error("unterminated string literal starting at offset {}", .span.start)]
    UnterminatedString { span: Span },

    #[error("unterminated regex literal starting at offset {}", .span.start)]
    UnterminatedRegex { span: Span },

    #[error("empty regex pattern at offset {}", .span.start)]
    EmptyRegex { span: Span },

    #[error("invalid regex pattern at offset {}: {message}", .span.start)]
    InvalidRegex { span: Span, message: String },

    #[error("unknown field '{name}' at offset {}", .span.start)]
    UnknownField { name: String, span: Span },

    #[error("expected a value after ':' at offset {}", .span.start)]
    MissingValue { span: Span },

    #[error("unexpected ':' at offset {}", .span.start)]
    UnexpectedColon { span: Span },

    #[error("unexpected character '{found}' at offset {}", .span.start)]
    UnexpectedCharacter { found: char, span: Span },
}

impl SyntaxError {
    /// The span of the offending input
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnterminatedString { span }
            | SyntaxError::UnterminatedRegex { span }
            | SyntaxError::EmptyRegex { span }
            | SyntaxError::InvalidRegex { span, .. }
            | SyntaxError::UnknownField { span, .. }
            | SyntaxError::MissingValue { span }
            | SyntaxError::UnexpectedColon { span }
            | SyntaxError::UnexpectedCharacter { span, .. } => *span,
        }
    }

    /// Byte offset where the offending input begins
    pub fn offset(&self) -> usize {
        self.span().start
    }
}
