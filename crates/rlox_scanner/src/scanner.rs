//! The scanner.
//!
//! Converts a fully materialized source text into an ordered list of tokens.
//! Malformed input never stops a scan: each problem is recorded as a
//! diagnostic, forwarded to the attached [`Reporter`] (if any), and the
//! offending span simply produces no token.

use crate::char_codes::*;
use crate::keywords::ReservedWords;
use crate::token::{Literal, Token, TokenKind};
use rlox_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage, Reporter};

/// The scanner converts source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    source: &'a str,
    /// Byte offset of the first character of the current token.
    start: usize,
    /// Byte offset of the next unread character.
    current: usize,
    /// Current 1-based line. Never decreases.
    line: usize,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    keywords: &'a ReservedWords,
    reporter: Option<&'a dyn Reporter>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            keywords: ReservedWords::global(),
            reporter: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Forward every report to `reporter` in addition to recording it.
    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Use a specific reserved-word table instead of the global one.
    pub fn with_keywords(mut self, keywords: &'a ReservedWords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Scan the whole source and return the tokens in source order.
    ///
    /// The scanner is exhausted afterwards; calling this again returns an
    /// empty list.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        tracing::debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            lines = self.line,
            "scan complete"
        );
        std::mem::take(&mut self.tokens)
    }

    /// Whether every character of the source has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// The line the scanner is currently on.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    fn scan_token(&mut self) {
        let ch = self.advance();
        match classify(ch) {
            CharClass::Single(kind) => self.add_token(kind),
            CharClass::WithEquals { bare, with_equals } => {
                let kind = if self.match_char(EQUALS) { with_equals } else { bare };
                self.add_token(kind);
            }
            CharClass::Slash => {
                if self.match_char(SLASH) {
                    while self.peek() != LINE_FEED && !self.is_at_end() {
                        self.advance();
                    }
                }
            }
            CharClass::Whitespace => {}
            CharClass::LineFeed => self.line += 1,
            CharClass::Quote => self.scan_string(),
            CharClass::Digit => self.scan_number(),
            CharClass::Alpha => self.scan_identifier(),
            CharClass::Unexpected => {
                let mut buf = [0u8; 4];
                let text: &str = ch.encode_utf8(&mut buf);
                self.error(&messages::UNEXPECTED_CHARACTER, &[text]);
            }
        }
    }

    /// Consume and return the next character.
    #[inline]
    pub(crate) fn advance(&mut self) -> char {
        let ch = self.peek();
        debug_assert!(!self.is_at_end(), "advance past end of source");
        self.current += ch.len_utf8();
        ch
    }

    /// Look at the next character without consuming it. Returns
    /// [`NULL_CHARACTER`] at end of input.
    #[inline]
    pub(crate) fn peek(&self) -> char {
        self.source[self.current..]
            .chars()
            .next()
            .unwrap_or(NULL_CHARACTER)
    }

    /// Consume the next character only if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    /// The source text of the token being scanned.
    #[inline]
    pub(crate) fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push_token(kind, None);
    }

    pub(crate) fn add_token_with_literal(&mut self, kind: TokenKind, literal: Literal) {
        self.push_token(kind, Some(literal));
    }

    fn push_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let token = Token::new(kind, self.lexeme(), literal, self.line);
        tracing::trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, "token");
        self.tokens.push(token);
    }

    /// Record a diagnostic on the current line and notify the reporter.
    pub(crate) fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let diagnostic = Diagnostic::at_line(self.line, message, args);
        tracing::trace!(line = self.line, code = diagnostic.code, "scan error");
        if let Some(reporter) = self.reporter {
            reporter.report(self.line, &diagnostic.message_text);
        }
        self.diagnostics.add(diagnostic);
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Scan a string literal. The opening quote has been consumed.
    ///
    /// An empty literal `""` is rejected the same way as a missing closing
    /// quote; both quotes are consumed so the span is reported once.
    fn scan_string(&mut self) {
        while self.peek() != DOUBLE_QUOTE && !self.is_at_end() {
            if self.peek() == LINE_FEED {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(&messages::UNTERMINATED_STRING, &[]);
            return;
        }

        // Closing quote
        self.advance();

        let value = &self.source[self.start + 1..self.current - 1];
        if value.is_empty() {
            self.error(&messages::UNTERMINATED_STRING, &[]);
            return;
        }
        self.add_token_with_literal(TokenKind::String, Literal::String(value.to_string()));
    }

    fn scan_identifier(&mut self) {
        while is_alpha(self.peek(), true) {
            self.advance();
        }

        let kind = self
            .keywords
            .get(self.lexeme())
            .unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }
}
