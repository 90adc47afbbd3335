//! Query parser for the card search language
//!
//! A query is a sequence of whitespace-separated terms combined as an
//! implicit conjunction. A term is `field:value` or a bare value; values are
//! bare words (case-insensitive substring), quoted strings (exact phrase),
//! or `/regex/` literals. Malformed input is always a typed [`SyntaxError`]
//! with a byte offset, never a silently adjusted query.

mod error;
mod parser;

pub use error::*;
pub use parser::*;

use cardex_ast::Predicate;
use cardex_lexer::tokenize;

/// Parse a query string into a predicate tree with default options
pub fn parse(query: &str) -> Result<Predicate, SyntaxError> {
    parse_with(query, &ParseOptions::default())
}

/// Parse a query string with explicit options
pub fn parse_with(query: &str, options: &ParseOptions) -> Result<Predicate, SyntaxError> {
    let tokens = tokenize(query);
    let mut parser = Parser::new(query, tokens, options.clone());
    parser.parse_query()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardex_ast::{Field, MatchMode, Predicate};

    fn field_match(field: Field, mode: MatchMode, value: &str) -> Predicate {
        Predicate::FieldMatch {
            field,
            mode,
            value: value.to_string(),
        }
    }

    fn terms(query: &str) -> Vec<Predicate> {
        match parse(query).unwrap() {
            Predicate::Conjunction { terms } => terms,
            other => panic!("expected conjunction root, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_query_is_empty_conjunction() {
        assert_eq!(parse("").unwrap(), Predicate::Conjunction { terms: vec![] });
        assert_eq!(
            parse("   \t ").unwrap(),
            Predicate::Conjunction { terms: vec![] }
        );
    }

    #[test]
    fn test_field_substring_term() {
        assert_eq!(
            terms("name:goblin"),
            vec![field_match(Field::Name, MatchMode::Substring, "goblin")]
        );
    }

    #[test]
    fn test_field_aliases() {
        assert_eq!(
            terms("t:creature o:draw fo:deathtouch"),
            vec![
                field_match(Field::TypeLine, MatchMode::Substring, "creature"),
                field_match(Field::Oracle, MatchMode::Substring, "draw"),
                field_match(Field::FullOracle, MatchMode::Substring, "deathtouch"),
            ]
        );
    }

    #[test]
    fn test_field_keyword_case_insensitive() {
        assert_eq!(
            terms("NAME:goblin Type:artifact"),
            vec![
                field_match(Field::Name, MatchMode::Substring, "goblin"),
                field_match(Field::TypeLine, MatchMode::Substring, "artifact"),
            ]
        );
    }

    #[test]
    fn test_bare_term() {
        assert_eq!(
            terms("goblin"),
            vec![Predicate::BareTerm {
                value: "goblin".into()
            }]
        );
    }

    #[test]
    fn test_multiple_terms_form_conjunction() {
        assert_eq!(
            terms("name:goblin t:creature guide"),
            vec![
                field_match(Field::Name, MatchMode::Substring, "goblin"),
                field_match(Field::TypeLine, MatchMode::Substring, "creature"),
                Predicate::BareTerm {
                    value: "guide".into()
                },
            ]
        );
    }

    #[test]
    fn test_quoted_value_is_exact_phrase() {
        assert_eq!(
            terms(r#"name:"Goblin Guide""#),
            vec![field_match(Field::Name, MatchMode::Exact, "Goblin Guide")]
        );
    }

    #[test]
    fn test_quoted_value_unescapes_quotes_and_backslashes() {
        assert_eq!(
            terms(r#"name:"a \"b\" \\ c""#),
            vec![field_match(Field::Name, MatchMode::Exact, r#"a "b" \ c"#)]
        );
    }

    #[test]
    fn test_bare_quoted_term_hits_default_field() {
        assert_eq!(
            terms(r#""Goblin Guide""#),
            vec![field_match(Field::Name, MatchMode::Exact, "Goblin Guide")]
        );
    }

    #[test]
    fn test_regex_value() {
        assert_eq!(
            terms("oracle:/create.*token/"),
            vec![field_match(Field::Oracle, MatchMode::Regex, "create.*token")]
        );
    }

    #[test]
    fn test_bare_regex_term_hits_default_field() {
        assert_eq!(
            terms("/sword .f/"),
            vec![field_match(Field::Name, MatchMode::Regex, "sword .f")]
        );
    }

    #[test]
    fn test_regex_with_escaped_slash() {
        assert_eq!(
            terms(r"oracle:/1\/1/"),
            vec![field_match(Field::Oracle, MatchMode::Regex, "1/1")]
        );
    }

    #[test]
    fn test_regex_keeps_character_classes() {
        assert_eq!(
            terms(r"oracle:/\d+ damage/"),
            vec![field_match(Field::Oracle, MatchMode::Regex, r"\d+ damage")]
        );
    }

    #[test]
    fn test_default_field_is_adjustable() {
        let options = ParseOptions {
            default_field: Field::Oracle,
        };
        let parsed = parse_with("/token/", &options).unwrap();
        assert_eq!(
            parsed,
            Predicate::Conjunction {
                terms: vec![field_match(Field::Oracle, MatchMode::Regex, "token")]
            }
        );
    }

    // === Error Cases ===

    #[test]
    fn test_unknown_field() {
        let err = parse("foo:bar").unwrap_err();
        match err {
            SyntaxError::UnknownField { ref name, span } => {
                assert_eq!(name, "foo");
                assert_eq!(span.start, 0);
            }
            other => panic!("expected unknown field error, got {other:?}"),
        }
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse(r#"name:"unclosed"#).unwrap_err();
        assert!(matches!(err, SyntaxError::UnterminatedString { span } if span.start == 5));
    }

    #[test]
    fn test_unterminated_regex() {
        let err = parse("oracle:/unclosed").unwrap_err();
        assert!(matches!(err, SyntaxError::UnterminatedRegex { span } if span.start == 7));
    }

    #[test]
    fn test_empty_regex_pattern() {
        let err = parse("name://").unwrap_err();
        assert!(matches!(err, SyntaxError::EmptyRegex { .. }));
    }

    #[test]
    fn test_invalid_regex_pattern() {
        let err = parse("oracle:/(/").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidRegex { .. }));
    }

    #[test]
    fn test_missing_value_after_colon() {
        let err = parse("name:").unwrap_err();
        assert!(matches!(err, SyntaxError::MissingValue { span } if span.start == 4));
    }

    #[test]
    fn test_stray_colon_in_term() {
        let err = parse("name:a:b").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedColon { span } if span.start == 6));
    }

    #[test]
    fn test_leading_colon() {
        let err = parse(":goblin").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedColon { span } if span.start == 0));
    }

    #[test]
    fn test_error_offset_accessor() {
        let err = parse("name:goblin foo:bar").unwrap_err();
        assert_eq!(err.offset(), 12);
    }

    #[test]
    fn test_syntax_error_serializes() {
        let err = parse("foo:bar").unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["UnknownField"]["name"], "foo");
        assert_eq!(json["UnknownField"]["span"]["start"], 0);
    }
}
