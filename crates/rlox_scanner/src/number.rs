//! Number literal scanning.
//!
//! Numbers are recognized by a small state machine driven by `peek()`. The
//! first digit has already been consumed when scanning starts, so the machine
//! only ever sees what follows it.

use crate::char_codes::{is_digit, DOT, MINUS, PLUS};
use crate::scanner::Scanner;
use crate::token::{Literal, TokenKind};
use rlox_diagnostics::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberState {
    BeforeSign,
    BeforeDecimal,
    AfterDecimal,
    BeforeExpSign,
    InExp,
    End,
    Failure,
}

impl NumberState {
    fn is_terminal(self) -> bool {
        matches!(self, NumberState::End | NumberState::Failure)
    }

    /// Returns the next state and whether `ch` is consumed on the way.
    pub(crate) fn step(self, ch: char) -> (NumberState, bool) {
        use NumberState::*;

        match (self, ch) {
            (BeforeSign, c) if is_digit(c) => (BeforeDecimal, true),
            (BeforeSign, DOT) => (AfterDecimal, true),
            (BeforeSign, PLUS | MINUS) => (BeforeDecimal, true),
            (BeforeSign, _) => (Failure, false),

            (BeforeDecimal, c) if is_digit(c) => (BeforeDecimal, true),
            (BeforeDecimal, DOT) => (AfterDecimal, true),
            (BeforeDecimal, _) => (End, false),

            (AfterDecimal, c) if is_digit(c) => (AfterDecimal, true),
            (AfterDecimal, 'e' | 'E') => (BeforeExpSign, true),
            (AfterDecimal, _) => (End, false),

            (BeforeExpSign, c) if is_digit(c) => (InExp, true),
            (BeforeExpSign, PLUS | MINUS) => (InExp, true),
            (BeforeExpSign, _) => (End, false),

            (InExp, c) if is_digit(c) => (InExp, true),
            (InExp, _) => (End, false),

            (End, _) => (End, false),
            (Failure, _) => (Failure, false),
        }
    }
}

impl Scanner<'_> {
    pub(crate) fn scan_number(&mut self) {
        let mut state = NumberState::BeforeSign;

        while !self.is_at_end() && !state.is_terminal() {
            let (next, consume) = state.step(self.peek());
            state = next;
            if consume {
                self.advance();
                if self.is_at_end() {
                    state = NumberState::End;
                }
            }
        }

        // Running out of input in any other state still yields a number.
        if state == NumberState::Failure {
            self.error(&messages::INVALID_NUMBER_FORMAT, &[]);
            return;
        }

        let value = parse_number_prefix(self.lexeme());
        self.add_token_with_literal(TokenKind::Number, Literal::Number(value));
    }
}

/// Parse the longest prefix of `text` that is a valid float, or NaN if none is.
///
/// Lexemes such as `1e`, `1+2` or `3.5e-` are accepted by the state machine
/// but are not complete floats on their own.
pub(crate) fn parse_number_prefix(text: &str) -> f64 {
    if let Ok(value) = text.parse::<f64>() {
        return value;
    }
    text.char_indices()
        .rev()
        .find_map(|(end, _)| text[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
