//! The reserved-word table.

use crate::token::TokenKind;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

const RESERVED: [(&str, TokenKind); 16] = [
    ("and", TokenKind::And),
    ("class", TokenKind::Class),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("for", TokenKind::For),
    ("fun", TokenKind::Fun),
    ("if", TokenKind::If),
    ("nil", TokenKind::Nil),
    ("or", TokenKind::Or),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("true", TokenKind::True),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
];

/// Maps exact keyword spellings to their token kinds.
///
/// The table never changes after construction and can be shared by any number
/// of scanners, on any thread.
#[derive(Debug, Clone)]
pub struct ReservedWords {
    map: FxHashMap<&'static str, TokenKind>,
}

impl ReservedWords {
    fn new() -> Self {
        Self {
            map: RESERVED.iter().copied().collect(),
        }
    }

    /// The process-wide table, built on first use.
    pub fn global() -> &'static ReservedWords {
        static TABLE: OnceLock<ReservedWords> = OnceLock::new();
        TABLE.get_or_init(ReservedWords::new)
    }

    /// Look up a keyword. Matching is case-sensitive.
    #[inline]
    pub fn get(&self, text: &str) -> Option<TokenKind> {
        self.map.get(text).copied()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.map.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, TokenKind)> + '_ {
        self.map.iter().map(|(text, kind)| (*text, *kind))
    }
}
