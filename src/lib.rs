//! # Quill Programming Language
//!
//! The front end for Quill, a small curly-brace scripting language with
//! static `as`-style type annotations:
//!
//! ```text
//! let age as int = 18;
//! if (age > 18) { printer.print("You are an adult.") }
//! ```
//!
//! ## Architecture
//!
//! The front end is organized into three modules:
//! - `lexer`: tokenization of source code (trivia is discarded)
//! - `parser`: recursive-descent parsing of tokens into an AST
//! - `error`: error values and diagnostic formatting
//!
//! Scanning and parsing are pure functions from an in-memory source buffer
//! to a value: no I/O happens inside the core, and the first lexical or
//! syntactic error aborts the whole call. Semantic analysis, type checking,
//! and execution are downstream consumers of the returned [`parser::Program`].

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use error::{QuillError, QuillResult, SourceLocation};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{Parser, Program};

/// Version of the Quill front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a complete Quill compilation unit into an AST
///
/// This is the main entry point for the front end. It performs lexical
/// analysis and parsing; on success the returned tree is final and immutable.
///
/// # Arguments
///
/// * `source` - The complete source text of one compilation unit
/// * `filename` - Optional filename for error reporting
///
/// # Returns
///
/// Returns the [`Program`] AST, or a [`QuillError`] from whichever stage
/// failed first. A partial tree is never returned.
pub fn parse(source: &str, filename: Option<&str>) -> QuillResult<Program> {
    // Phase 1: Lexical Analysis
    let mut lexer = Lexer::new(source, filename);
    let tokens = lexer.tokenize()?;

    // Phase 2: Parsing
    Parser::new(tokens).parse()
}
