//! Term grouping over the token stream
//!
//! A query is a flat sequence of terms and the only structure is the
//! implicit conjunction, so parsing is a single loop with one token of
//! lookahead to spot the `field:value` shape.

use cardex_ast::{Field, MatchMode, Predicate};
use cardex_lexer::{Token, TokenKind};
use regex::Regex;

use crate::error::SyntaxError;

/// Parsing knobs
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Field an unqualified term searches. Name is what the observed query
    /// shapes suggest, but the choice is not locked in.
    pub default_field: Field,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_field: Field::Name,
        }
    }
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            options,
        }
    }

    /// Consume the whole token stream into a conjunction of terms
    pub fn parse_query(&mut self) -> Result<Predicate, SyntaxError> {
        let mut terms = Vec::new();
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Word if self.peek().kind == TokenKind::Colon => {
                    let keyword = token.text(self.source);
                    let field =
                        Field::from_keyword(keyword).ok_or_else(|| SyntaxError::UnknownField {
                            name: keyword.to_string(),
                            span: token.span,
                        })?;
                    let colon = self.advance();
                    terms.push(self.parse_value(field, colon)?);
                }
                TokenKind::Word => terms.push(Predicate::BareTerm {
                    value: token.text(self.source).to_string(),
                }),
                TokenKind::Quoted => terms.push(Predicate::FieldMatch {
                    field: self.options.default_field,
                    mode: MatchMode::Exact,
                    value: unescape_quoted(inner(token.text(self.source))),
                }),
                TokenKind::Pattern => {
                    terms.push(self.pattern_match(self.options.default_field, token)?)
                }
                TokenKind::Colon => return Err(SyntaxError::UnexpectedColon { span: token.span }),
                TokenKind::Error => return Err(unmatched_input(token, self.source)),
            }
        }
        Ok(Predicate::Conjunction { terms })
    }

    /// The value side of a `field:` term
    fn parse_value(&mut self, field: Field, colon: Token) -> Result<Predicate, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Word => Ok(Predicate::FieldMatch {
                field,
                mode: MatchMode::Substring,
                value: token.text(self.source).to_string(),
            }),
            TokenKind::Quoted => Ok(Predicate::FieldMatch {
                field,
                mode: MatchMode::Exact,
                value: unescape_quoted(inner(token.text(self.source))),
            }),
            TokenKind::Pattern => self.pattern_match(field, token),
            TokenKind::Colon => Err(SyntaxError::UnexpectedColon { span: token.span }),
            TokenKind::Error => Err(unmatched_input(token, self.source)),
            TokenKind::Eof => Err(SyntaxError::MissingValue { span: colon.span }),
        }
    }

    /// A `/.../` leaf. The pattern compiles here so a bad one surfaces as a
    /// parse failure with a position; evaluation may assume it is valid.
    fn pattern_match(&self, field: Field, token: Token) -> Result<Predicate, SyntaxError> {
        let pattern = unescape_pattern(inner(token.text(self.source)));
        if pattern.is_empty() {
            return Err(SyntaxError::EmptyRegex { span: token.span });
        }
        if let Err(err) = Regex::new(&pattern) {
            return Err(SyntaxError::InvalidRegex {
                span: token.span,
                message: err.to_string(),
            });
        }
        Ok(Predicate::FieldMatch {
            field,
            mode: MatchMode::Regex,
            value: pattern,
        })
    }

    fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }
}

/// Strip the single-byte delimiters off a quoted or pattern token
fn inner(text: &str) -> &str {
    &text[1..text.len() - 1]
}

/// Process `\"` and `\\` in a quoted value; other escapes pass through
fn unescape_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Process `\/` in a pattern; every other escape belongs to the regex engine
fn unescape_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Map an unmatched-input token to the error its first character implies
fn unmatched_input(token: Token, source: &str) -> SyntaxError {
    match token.text(source).chars().next() {
        Some('"') => SyntaxError::UnterminatedString { span: token.span },
        Some('/') => SyntaxError::UnterminatedRegex { span: token.span },
        Some(found) => SyntaxError::UnexpectedCharacter {
            found,
            span: token.span,
        },
        // An empty error token should not happen; report the position anyway.
        None => SyntaxError::UnexpectedCharacter {
            found: '\u{FFFD}',
            span: token.span,
        },
    }
}
