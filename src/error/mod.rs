//! Error handling and diagnostics for the Quill front end
//!
//! This module provides the error types produced by lexical analysis and
//! parsing, plus diagnostic formatting for reporting them.

use std::fmt;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Quill operations
pub type QuillResult<T> = Result<T, QuillError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Character offset from the start of the source (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(offset: usize, line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            offset,
            line,
            column,
            filename,
        }
    }

    /// Create a source location without an offset or filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(0, line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Main error type for the Quill front end
///
/// Both variants are fail-fast: the first error aborts the enclosing
/// tokenize/parse call and no partial result is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum QuillError {
    /// Lexical analysis error
    LexerError {
        message: String,
        location: SourceLocation,
    },
    /// Parsing error
    ParseError {
        message: String,
        location: SourceLocation,
    },
}

impl QuillError {
    /// Create a new lexer error
    pub fn lexer_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::LexerError {
            message: message.into(),
            location,
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::LexerError { .. } => "Lexer Error",
            Self::ParseError { .. } => "Parse Error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::LexerError { message, .. } | Self::ParseError { message, .. } => message,
        }
    }

    /// Get the source location of the error
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::LexerError { location, .. } | Self::ParseError { location, .. } => location,
        }
    }
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind(), self.message(), self.location())
    }
}

impl std::error::Error for QuillError {}
