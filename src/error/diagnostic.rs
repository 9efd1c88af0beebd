//! Diagnostic formatting for better error messages
//!
//! Renders a `QuillError` with source code context and a caret pointing at
//! the offending column. The core lexer/parser only return error values;
//! all rendering happens here, on the caller's side.

use super::{QuillError, SourceLocation};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic {
    error: QuillError,
    source: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic from an error
    pub fn new(error: QuillError) -> Self {
        Self {
            error,
            source: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: QuillError, source: &str) -> Self {
        Self {
            error,
            source: Some(source.to_string()),
        }
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let kind = self.error.kind().red().bold();
        output.push_str(&format!("{}: {}\n", kind, self.error.message()));

        let location = self.error.location();
        output.push_str(&format!("  {} {}\n", "-->".blue().bold(), location));

        if let Some(ref source) = self.source {
            output.push_str(&self.format_source_context(source, location));
        }

        output
    }

    /// Format source code context around the error location
    fn format_source_context(&self, source: &str, location: &SourceLocation) -> String {
        let lines: Vec<&str> = source.lines().collect();

        if location.line == 0 || location.line > lines.len() {
            return String::new();
        }

        let line_idx = location.line - 1;
        let width = location.line.to_string().len();
        let mut output = String::new();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", location.line, width = width).blue().bold(),
            lines[line_idx]
        ));

        // Caret under the offending column
        let padding = " ".repeat(width + 2 + location.column - 1);
        output.push_str(&format!("{}{}\n", padding, "^".red().bold()));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
