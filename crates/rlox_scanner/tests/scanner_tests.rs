//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes the rlox language, including
//! the quirks of its number recognizer and string handling.

use rlox_diagnostics::{ErrorBus, Reporter};
use rlox_scanner::{scan, Literal, ReservedWords, Scanner, Token, TokenKind};
use std::sync::{Arc, Mutex};

/// Helper: scan all tokens from source and return as (kind, lexeme) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    Scanner::new(source)
        .scan_tokens()
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: the diagnostic messages produced for `source`.
fn messages(source: &str) -> Vec<String> {
    let (_, diagnostics) = scan(source);
    diagnostics
        .diagnostics()
        .iter()
        .map(|d| d.message_text.clone())
        .collect()
}

fn number_value(token: &Token) -> f64 {
    match token.literal {
        Some(Literal::Number(n)) => n,
        ref other => panic!("expected number literal, got {:?}", other),
    }
}

#[test]
fn test_empty_source() {
    let (tokens, diagnostics) = scan("");
    assert!(tokens.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_whitespace_only() {
    let tokens = scan_all("   \n\t \r\n ");
    assert!(tokens.is_empty());
}

// ========================================================================
// Punctuation and operators
// ========================================================================

#[test]
fn test_single_character_tokens() {
    let cases = [
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Star),
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        (";", TokenKind::Semicolon),
    ];
    for (source, kind) in cases {
        let tokens = Scanner::new(source).scan_tokens();
        assert_eq!(tokens.len(), 1, "source {:?}", source);
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].lexeme, source);
        assert_eq!(tokens[0].literal, None);
        assert_eq!(tokens[0].line, 1);
    }
}

#[test]
fn test_two_character_operators() {
    let cases = [
        ("!=", TokenKind::BangEqual),
        ("==", TokenKind::EqualEqual),
        ("<=", TokenKind::LessEqual),
        (">=", TokenKind::GreaterEqual),
        ("!", TokenKind::Bang),
        ("=", TokenKind::Equal),
        ("<", TokenKind::Less),
        (">", TokenKind::Greater),
    ];
    for (source, kind) in cases {
        assert_eq!(
            scan_all(source),
            vec![(kind, source.to_string())],
            "source {:?}",
            source
        );
    }
}

#[test]
fn test_comment_then_number() {
    let mut scanner = Scanner::new("// comment\n123");
    let tokens = scanner.scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "123");
    assert_eq!(number_value(&tokens[0]), 123.0);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(scanner.line(), 2);
}

#[test]
fn test_slash_is_not_a_token() {
    assert_eq!(
        scan_kinds("( / )"),
        vec![TokenKind::LeftParen, TokenKind::RightParen]
    );
    assert!(messages("/").is_empty());
}

// ========================================================================
// Strings
// ========================================================================

#[test]
fn test_string_literal() {
    let tokens = Scanner::new(r#""hello""#).scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[0].literal, Some(Literal::String("hello".into())));
}

#[test]
fn test_multiline_string_records_terminating_line() {
    let tokens = Scanner::new("\"hello\nworld\"").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"hello\nworld\"");
    assert_eq!(
        tokens[0].literal,
        Some(Literal::String("hello\nworld".into()))
    );
    assert_eq!(tokens[0].line, 2);
}

#[test]
fn test_empty_string_is_unterminated() {
    let (tokens, diagnostics) = scan("\"\"");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::String));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "unterminated string."
    );
}

#[test]
fn test_missing_closing_quote() {
    let (tokens, diagnostics) = scan("print \"oops\n;");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Print]
    );
    assert_eq!(diagnostics.len(), 1);
    // The line counter has moved past the embedded newline.
    assert_eq!(diagnostics.diagnostics()[0].line, Some(2));
}

// ========================================================================
// Identifiers and keywords
// ========================================================================

#[test]
fn test_keyword_then_identifier() {
    assert_eq!(
        scan_all("if x"),
        vec![
            (TokenKind::If, "if".to_string()),
            (TokenKind::Identifier, "x".to_string()),
        ]
    );
}

#[test]
fn test_all_keywords() {
    let source = "and class else false for fun if nil or print return super this true var while";
    assert_eq!(
        scan_kinds(source),
        vec![
            TokenKind::And,
            TokenKind::Class,
            TokenKind::Else,
            TokenKind::False,
            TokenKind::For,
            TokenKind::Fun,
            TokenKind::If,
            TokenKind::Nil,
            TokenKind::Or,
            TokenKind::Print,
            TokenKind::Return,
            TokenKind::Super,
            TokenKind::This,
            TokenKind::True,
            TokenKind::Var,
            TokenKind::While,
        ]
    );
}

#[test]
fn test_identifiers() {
    let tokens = scan_all("foo _bar baz9 orchid While");
    assert_eq!(tokens.len(), 5);
    for (kind, _) in &tokens {
        assert_eq!(*kind, TokenKind::Identifier);
    }
    assert_eq!(tokens[2].1, "baz9");
    assert_eq!(tokens[3].1, "orchid");
}

#[test]
fn test_identifier_absorbs_caret_and_backtick() {
    assert_eq!(
        scan_all("a^b`c"),
        vec![(TokenKind::Identifier, "a^b`c".to_string())]
    );
}

#[test]
fn test_custom_keyword_table_reference() {
    let table = ReservedWords::global().clone();
    let tokens = Scanner::new("fun f").with_keywords(&table).scan_tokens();
    assert_eq!(tokens[0].kind, TokenKind::Fun);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

// ========================================================================
// Numbers
// ========================================================================

#[test]
fn test_scientific_notation() {
    let tokens = Scanner::new("1.5e-3").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1.5e-3");
    assert_eq!(number_value(&tokens[0]), 0.0015);
}

#[test]
fn test_integer_and_decimal() {
    let tokens = Scanner::new("42;3.14").scan_tokens();
    assert_eq!(tokens.len(), 3);
    assert_eq!(number_value(&tokens[0]), 42.0);
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
    assert_eq!(number_value(&tokens[2]), 3.14);
}

#[test]
fn test_single_digit_at_end_of_input() {
    let tokens = Scanner::new("7").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(number_value(&tokens[0]), 7.0);
}

#[test]
fn test_single_digit_followed_by_space_is_invalid() {
    let (tokens, diagnostics) = scan("5 ;");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Semicolon]
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "invalid number format"
    );
}

#[test]
fn test_sign_after_first_digit_joins_the_number() {
    let tokens = Scanner::new("1+2").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1+2");
    assert_eq!(number_value(&tokens[0]), 1.0);
}

#[test]
fn test_exponent_requires_decimal_point() {
    // Without a `.`, `e` ends the number and starts an identifier.
    assert_eq!(
        scan_all("12e5"),
        vec![
            (TokenKind::Number, "12".to_string()),
            (TokenKind::Identifier, "e5".to_string()),
        ]
    );
}

#[test]
fn test_second_decimal_point_ends_the_number() {
    assert_eq!(
        scan_all("1.2.3"),
        vec![
            (TokenKind::Number, "1.2".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Number, "3".to_string()),
        ]
    );
}

#[test]
fn test_trailing_decimal_point() {
    let tokens = Scanner::new("10.").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme, "10.");
    assert_eq!(number_value(&tokens[0]), 10.0);
}

#[test]
fn test_dangling_exponent_marker() {
    let tokens = Scanner::new("2.5e").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme, "2.5e");
    assert_eq!(number_value(&tokens[0]), 2.5);
}

// ========================================================================
// Errors and reporting
// ========================================================================

#[test]
fn test_unexpected_character() {
    let (tokens, diagnostics) = scan("#");
    assert!(tokens.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "Unexpected character '#"
    );
}

#[test]
fn test_scan_continues_after_errors() {
    let (tokens, diagnostics) = scan("@ ( # )\n$");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::LeftParen, TokenKind::RightParen]
    );
    let lines: Vec<_> = diagnostics.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![Some(1), Some(1), Some(2)]);
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn test_reports_reach_every_listener() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut bus = ErrorBus::new();
    let sink = Arc::clone(&seen);
    bus.subscribe(move |line, message| {
        sink.lock().unwrap().push((line, message.to_string()));
    });
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    bus.subscribe(move |_, _| *counter.lock().unwrap() += 1);

    let mut scanner = Scanner::new("#\n\"abc").with_reporter(&bus);
    scanner.scan_tokens();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (1, "Unexpected character '#".to_string()),
            (2, "unterminated string.".to_string()),
        ]
    );
    assert_eq!(*count.lock().unwrap(), 2);
    assert_eq!(scanner.diagnostics().len(), 2);
}

#[test]
fn test_custom_reporter() {
    struct Lines(Mutex<Vec<usize>>);

    impl Reporter for Lines {
        fn report(&self, line: usize, _message: &str) {
            self.0.lock().unwrap().push(line);
        }
    }

    let reporter = Lines(Mutex::new(Vec::new()));
    Scanner::new("(\n\n%").with_reporter(&reporter).scan_tokens();
    assert_eq!(*reporter.0.lock().unwrap(), vec![3]);
}

// ========================================================================
// Whole programs
// ========================================================================

#[test]
fn test_small_program() {
    let source = "var greeting = \"hi\";\nwhile (count <= 10) {\n  print greeting;\n}\n";
    let (tokens, diagnostics) = scan(source);
    assert!(diagnostics.is_empty());
    let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "VAR var null",
            "IDENTIFIER greeting null",
            "EQUAL = null",
            "STRING \"hi\" hi",
            "SEMICOLON ; null",
            "WHILE while null",
            "LEFT_PAREN ( null",
            "IDENTIFIER count null",
            "LESS_EQUAL <= null",
            "NUMBER 10 10.0",
            "RIGHT_PAREN ) null",
            "LEFT_BRACE { null",
            "PRINT print null",
            "IDENTIFIER greeting null",
            "SEMICOLON ; null",
            "RIGHT_BRACE } null",
        ]
    );
    assert_eq!(tokens.last().map(|t| t.line), Some(4));
}

#[test]
fn test_fresh_scanners_agree() {
    let source = "fun add(a, b) { return a + b; } // sum\nprint add(12, 34.5e+1);";
    let first = Scanner::new(source).scan_tokens();
    let second = Scanner::new(source).scan_tokens();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_scanners_share_keyword_table() {
    let source = "class Foo { init() { this.x = nil; } }";
    let expected = Scanner::new(source).scan_tokens();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| Scanner::new(source).scan_tokens()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
