//! Lexical analysis module
//!
//! This module handles tokenization of Quill source code.

pub mod scanner;
pub mod token;

pub use scanner::Lexer;
pub use token::{Keyword, Literal, Token, TokenType};
