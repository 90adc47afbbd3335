//! Query tokenizer built on logos
//!
//! The awkward part of this syntax is that `"` and `/` open literals whose
//! contents must not be split on `:` or whitespace; the token patterns
//! recognize the delimiters before any other rule applies, so
//! `name:"a: b"` and `oracle:/a b/` each lex as three tokens.

mod token;

pub use token::*;

use cardex_ast::Span;
use logos::Logos;

/// Tokenize a query string into a vector of tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => TokenKind::Error,
        };
        tokens.push(Token { kind, span });
    }

    // Add EOF token
    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
    });

    tokens
}

/// A token with its span
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}
