//! Structured error types for pathd.
//!
//! Path parsing failures carry the byte offset where the interpreter stopped,
//! so a caller driving many paths can report the position and move on to the
//! next one. Configuration and SVG document errors are kept separate because
//! they happen before any path text is read.

use thiserror::Error;

/// A failure while compiling one path string. Always fatal to that call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A command letter was required but something else was found.
    #[error("expected command at offset {offset}")]
    ExpectedCommand { offset: usize },

    /// A numeric operand was required but a command letter was found.
    #[error("expected value at offset {offset}")]
    ExpectedValue { offset: usize },

    /// The numeric lexeme was empty or did not parse to a finite float.
    #[error("invalid float value '{lexeme}' at offset {offset}")]
    MalformedNumber { lexeme: String, offset: usize },

    /// The input ended in the middle of an operand tuple.
    #[error("path ends mid-command at offset {offset}")]
    TruncatedCommand { offset: usize },
}

impl PathError {
    /// Byte offset into the input where the failure was detected.
    pub fn offset(&self) -> usize {
        match self {
            PathError::ExpectedCommand { offset }
            | PathError::ExpectedValue { offset }
            | PathError::MalformedNumber { offset, .. }
            | PathError::TruncatedCommand { offset } => *offset,
        }
    }
}

/// Invalid construction-time configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A canvas dimension was zero, negative, or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// A `WIDTHxHEIGHT` size argument could not be parsed.
    #[error("invalid size '{0}', expected WIDTHxHEIGHT (e.g. 24x24)")]
    InvalidSize(String),
}

/// Errors from reading `<path>` elements out of an SVG document.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The document is not well-formed XML.
    #[error("SVG parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute value was not valid UTF-8.
    #[error("attribute '{0}' is not valid UTF-8")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_accessor() {
        let e = PathError::MalformedNumber {
            lexeme: "-".to_string(),
            offset: 7,
        };
        assert_eq!(e.offset(), 7);
        assert_eq!(PathError::TruncatedCommand { offset: 3 }.offset(), 3);
    }

    #[test]
    fn test_display_includes_lexeme() {
        let e = PathError::MalformedNumber {
            lexeme: "-.".to_string(),
            offset: 2,
        };
        assert_eq!(e.to_string(), "invalid float value '-.' at offset 2");
    }
}
