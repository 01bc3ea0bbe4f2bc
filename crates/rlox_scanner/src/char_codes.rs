//! Character constants and classifiers used by the scanner.

use crate::token::TokenKind;

pub const NULL_CHARACTER: char = '\0';
pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const TAB: char = '\t';
pub const SPACE: char = ' ';
pub const DOUBLE_QUOTE: char = '"';
pub const SLASH: char = '/';
pub const EQUALS: char = '=';
pub const DOT: char = '.';
pub const PLUS: char = '+';
pub const MINUS: char = '-';
pub const UNDERSCORE: char = '_';

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character can appear in an identifier.
///
/// The upper-case range runs from `'A'` to lower-case `'z'`, so the six
/// characters between `'Z'` and `'a'` (`[ \ ] ^ _` and backtick) are accepted
/// as letters. With `check_number`, digits are accepted as well.
#[inline]
pub fn is_alpha(ch: char, check_number: bool) -> bool {
    ('a'..='z').contains(&ch)
        || ('A'..='z').contains(&ch)
        || ch == UNDERSCORE
        || (check_number && is_digit(ch))
}

/// How the scanner handles the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Always a one-character token.
    Single(TokenKind),
    /// One-character token, or the two-character form when followed by `=`.
    WithEquals { bare: TokenKind, with_equals: TokenKind },
    /// `/`: starts a line comment when doubled, otherwise produces nothing.
    Slash,
    /// Space, tab and carriage return.
    Whitespace,
    LineFeed,
    Quote,
    Digit,
    Alpha,
    Unexpected,
}

pub(crate) fn classify(ch: char) -> CharClass {
    match ch {
        '(' => CharClass::Single(TokenKind::LeftParen),
        ')' => CharClass::Single(TokenKind::RightParen),
        '{' => CharClass::Single(TokenKind::LeftBrace),
        '}' => CharClass::Single(TokenKind::RightBrace),
        ',' => CharClass::Single(TokenKind::Comma),
        DOT => CharClass::Single(TokenKind::Dot),
        MINUS => CharClass::Single(TokenKind::Minus),
        PLUS => CharClass::Single(TokenKind::Plus),
        ';' => CharClass::Single(TokenKind::Semicolon),
        '*' => CharClass::Single(TokenKind::Star),
        '!' => CharClass::WithEquals {
            bare: TokenKind::Bang,
            with_equals: TokenKind::BangEqual,
        },
        EQUALS => CharClass::WithEquals {
            bare: TokenKind::Equal,
            with_equals: TokenKind::EqualEqual,
        },
        '<' => CharClass::WithEquals {
            bare: TokenKind::Less,
            with_equals: TokenKind::LessEqual,
        },
        '>' => CharClass::WithEquals {
            bare: TokenKind::Greater,
            with_equals: TokenKind::GreaterEqual,
        },
        SLASH => CharClass::Slash,
        CARRIAGE_RETURN | SPACE | TAB => CharClass::Whitespace,
        LINE_FEED => CharClass::LineFeed,
        DOUBLE_QUOTE => CharClass::Quote,
        c if is_digit(c) => CharClass::Digit,
        c if is_alpha(c, false) => CharClass::Alpha,
        _ => CharClass::Unexpected,
    }
}
