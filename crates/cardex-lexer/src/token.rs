use logos::Logos;

/// The token classes of the query language
///
/// `Error` and `Eof` are never produced by the logos patterns; the driver in
/// `lib.rs` substitutes them for unmatched input and end of input.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// Separates a field keyword from its value
    #[token(":")]
    Colon,

    /// `"..."` with backslash escapes; whitespace and colons inside do not
    /// terminate the token
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    /// `/.../` with backslash escapes; the first unescaped `/` closes it
    #[regex(r"/([^/\\]|\\.)*/")]
    Pattern,

    /// A bare run of characters, ended by whitespace or a delimiter
    #[regex(r#"[^ \t\r\n\f:"/]+"#)]
    Word,

    /// Unmatched input, most often an unterminated quote or pattern
    Error,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether this token can stand in value position after a `:`
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Word | TokenKind::Quoted | TokenKind::Pattern
        )
    }
}
