//! # Path Data Lexer
//!
//! Cursor over the raw `d` attribute text. Two jobs:
//!
//! - **Classify** the next significant character as an absolute command,
//!   a relative command, the start of a number, or end of input. Anything
//!   outside `[a-zA-Z0-9.-]` (whitespace, commas, stray bytes) is skipped.
//! - **Lex** a number starting at the cursor. The accepted grammar is
//!   deliberately small: digits, at most one `.`, and a `-` only as the first
//!   character. No exponents, no `+`.
//!
//! Classification never consumes the token itself; the caller decides.

use crate::error::PathError;

/// Classification of the next significant character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    AbsoluteCommand,
    RelativeCommand,
    NumericValue,
    EndOfInput,
}

/// A byte cursor over one path string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Skip insignificant bytes and classify what the cursor lands on.
    pub fn classify(&mut self) -> Token {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'a'..=b'z' => return Token::RelativeCommand,
                b'A'..=b'Z' => return Token::AbsoluteCommand,
                b'0'..=b'9' | b'.' | b'-' => return Token::NumericValue,
                _ => self.pos += 1,
            }
        }
        Token::EndOfInput
    }

    /// Consume the command letter under the cursor.
    pub fn read_command(&mut self) -> Result<char, PathError> {
        match self.classify() {
            Token::AbsoluteCommand | Token::RelativeCommand => {
                let c = self.src.as_bytes()[self.pos] as char;
                self.pos += 1;
                Ok(c)
            }
            _ => Err(PathError::ExpectedCommand { offset: self.pos }),
        }
    }

    /// Consume the next number. A command letter where a number is required
    /// is `ExpectedValue`; running out of input is `TruncatedCommand`.
    pub fn read_value(&mut self) -> Result<f64, PathError> {
        match self.classify() {
            Token::NumericValue => self.lex_number(),
            Token::AbsoluteCommand | Token::RelativeCommand => {
                Err(PathError::ExpectedValue { offset: self.pos })
            }
            Token::EndOfInput => Err(PathError::TruncatedCommand { offset: self.pos }),
        }
    }

    /// Scan the longest valid numeric run from the cursor and parse it.
    fn lex_number(&mut self) -> Result<f64, PathError> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;
        let mut seen_dot = false;

        while end < bytes.len() {
            match bytes[end] {
                b'0'..=b'9' => {}
                b'.' if !seen_dot => seen_dot = true,
                b'-' if end == start => {}
                _ => break,
            }
            end += 1;
        }

        let lexeme = &self.src[start..end];
        let value = match lexeme.parse::<f64>() {
            Ok(v) if v.is_finite() && end > start => v,
            _ => {
                return Err(PathError::MalformedNumber {
                    lexeme: lexeme.to_string(),
                    offset: start,
                })
            }
        };

        self.pos = end;
        Ok(value)
    }
}
