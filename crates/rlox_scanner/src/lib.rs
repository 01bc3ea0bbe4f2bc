//! rlox_scanner: Lexer for the rlox scripting language.
//!
//! Converts a complete source text into an ordered list of tokens:
//! - Single and double character operators
//! - `//` line comments
//! - String literals, which may span lines
//! - Number literals, recognized by a small state machine
//! - Identifiers and the reserved words

mod char_codes;
mod keywords;
mod number;
mod scanner;
mod token;

pub use char_codes::{is_alpha, is_digit};
pub use keywords::ReservedWords;
pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind};

use rlox_diagnostics::DiagnosticCollection;

/// Scan `source` with a fresh scanner, returning its tokens and diagnostics.
pub fn scan(source: &str) -> (Vec<Token>, DiagnosticCollection) {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    (tokens, scanner.take_diagnostics())
}
