//! Error types for the character-history log parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while decoding log lines.

use thiserror::Error;

/// Maximum number of characters of the offending text kept as error context.
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing a log.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Missing taxon index in annotation group")]
    MissingTaxonIndex,
    #[error("Invalid token '{0}', expected key=value")]
    InvalidToken(String),
    #[error("Invalid area string '{0}'")]
    InvalidAreas(String),
    #[error("Invalid event list - {0}")]
    InvalidEventList(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (line number and offending text).
#[derive(Error, Debug)]
#[error("{kind} at line {line}{}", context_suffix(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    line: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type, a 1-based line number and
    /// the text that failed to decode.
    pub fn at_line(kind: ParsingErrorType, line: usize, text: &str) -> Self {
        Self {
            kind,
            line,
            context: text.chars().take(DEFAULT_CONTEXT_LENGTH).collect(),
        }
    }

    /// Convenience constructor for MissingColumn
    pub fn missing_column(line: usize, column: &'static str, text: &str) -> Self {
        Self::at_line(ParsingErrorType::MissingColumn(column), line, text)
    }

    /// Convenience constructor for InvalidNumber
    pub fn invalid_number(line: usize, value: &str) -> Self {
        Self::at_line(ParsingErrorType::InvalidNumber(value.to_string()), line, value)
    }

    /// Create a ParsingError without line context (for IO errors)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            line: 0,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the 1-based line where the error occurred (0 if unknown)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the text the error refers to
    pub fn context(&self) -> &str {
        &self.context
    }
}

fn context_suffix(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (first {} chars): {}", context.chars().count(), context)
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_and_context() {
        let err = ParsingError::invalid_number(7, "1.2.3");
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid number '1.2.3' at line 7"));
        assert!(msg.contains("Context (first 5 chars): 1.2.3"));
    }

    #[test]
    fn test_context_is_truncated() {
        let long = "x".repeat(200);
        let err = ParsingError::at_line(ParsingErrorType::MissingTaxonIndex, 1, &long);
        assert_eq!(err.context().len(), DEFAULT_CONTEXT_LENGTH);
    }

    #[test]
    fn test_io_error_has_no_line() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ParsingError = io.into();
        assert_eq!(err.line(), 0);
        assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
        assert_eq!(err.to_string(), "IO error - gone at line 0");
    }
}
