//! Property-based tests for the scanner.
//!
//! Arbitrary input, including malformed input, must never stop a scan, and
//! the tokens that come out must always be faithful slices of the source.

use proptest::prelude::*;
use rlox_scanner::{Literal, Scanner, TokenKind};

/// Source text biased towards characters the scanner cares about.
fn lox_like_source() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[a-zA-Z0-9_ .+\-*/=!<>;,(){}"\n\t#@eE]{0,64}"#)
        .expect("valid regex")
}

fn any_source() -> impl Strategy<Value = String> {
    prop_oneof![lox_like_source(), any::<String>()]
}

proptest! {
    #[test]
    fn fresh_scanners_produce_equal_tokens(source in any_source()) {
        let first = Scanner::new(&source).scan_tokens();
        let second = Scanner::new(&source).scan_tokens();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lexemes_are_ordered_slices_of_the_source(source in any_source()) {
        let tokens = Scanner::new(&source).scan_tokens();
        let mut pos = 0;
        for token in &tokens {
            prop_assert!(!token.lexeme.is_empty());
            let offset = source[pos..].find(token.lexeme.as_str());
            prop_assert!(offset.is_some(), "lexeme {:?} not found after {}", token.lexeme, pos);
            pos += offset.unwrap_or(0) + token.lexeme.len();
        }
    }

    #[test]
    fn lines_never_decrease(source in any_source()) {
        let mut scanner = Scanner::new(&source);
        let tokens = scanner.scan_tokens();
        let newlines = source.matches('\n').count();
        let mut last = 1;
        for token in &tokens {
            prop_assert!(token.line >= last);
            last = token.line;
        }
        prop_assert_eq!(scanner.line(), newlines + 1);
        prop_assert!(scanner.is_at_end());
    }

    #[test]
    fn literals_only_on_strings_and_numbers(source in any_source()) {
        for token in Scanner::new(&source).scan_tokens() {
            match (token.kind, &token.literal) {
                (TokenKind::String, Some(Literal::String(s))) => {
                    prop_assert_eq!(&format!("\"{}\"", s), &token.lexeme);
                }
                (TokenKind::Number, Some(Literal::Number(n))) => prop_assert!(!n.is_nan()),
                (TokenKind::String | TokenKind::Number, other) => {
                    prop_assert!(false, "unexpected literal {:?}", other);
                }
                (_, literal) => prop_assert!(literal.is_none()),
            }
        }
    }
}
