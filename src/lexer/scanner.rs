//! Lexer/Scanner implementation for the Quill language
//!
//! This module implements lexical analysis, converting source code into
//! tokens. At each position the rules are tried in a fixed priority order
//! with maximal munch: comments first, then two-character operators, then
//! identifiers/keywords, numbers, strings, and finally single-character
//! punctuation. Whitespace and comments are consumed and dropped.

use super::token::{Keyword, Literal, Token, TokenType};
use crate::error::{QuillError, QuillResult, SourceLocation};

/// Lexer for Quill source code
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    filename: Option<String>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            filename: filename.map(|s| s.to_string()),
        }
    }

    /// Tokenize the source code
    ///
    /// Fails with a lexer error at the first character no rule matches.
    pub fn tokenize(&mut self) -> QuillResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        // End-of-stream sentinel for the parser's cursor
        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            self.current_location(),
        ));

        Ok(self.tokens.clone())
    }

    /// Scan a single token
    fn scan_token(&mut self) -> QuillResult<()> {
        let c = self.advance();

        match c {
            // Whitespace (skip)
            ' ' | '\r' | '\t' => Ok(()),

            // Newline
            '\n' => {
                self.line += 1;
                self.column = 1;
                Ok(())
            }

            // Single-character tokens
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            ':' => self.add_token(TokenType::Colon),
            ';' => self.add_token(TokenType::Semicolon),
            '+' => self.add_token(TokenType::Plus),
            '-' => self.add_token(TokenType::Minus),
            '*' => self.add_token(TokenType::Star),
            '&' => self.add_token(TokenType::Ampersand),
            '|' => self.add_token(TokenType::Pipe),

            // Two-character tokens (matched before their one-character prefixes)
            '=' => {
                if self.match_char('=') {
                    self.add_token(TokenType::Equal)
                } else {
                    self.add_token(TokenType::Assign)
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenType::NotEqual)
                } else {
                    self.add_token(TokenType::Bang)
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenType::LessEqual)
                } else {
                    self.add_token(TokenType::Less)
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.add_token(TokenType::GreaterEqual)
                } else {
                    self.add_token(TokenType::Greater)
                }
            }

            // Comments
            '/' => {
                if self.match_char('/') {
                    // Single-line comment: skip until end of line
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                    Ok(())
                } else if self.match_char('*') {
                    self.scan_block_comment()
                } else {
                    self.add_token(TokenType::Slash)
                }
            }

            // String literals
            '"' => self.scan_string(),

            // Number literals
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            // Unexpected character
            _ => Err(self.error(&format!("Unexpected character '{}'", c))),
        }
    }

    /// Scan a string literal
    ///
    /// No escape processing: the characters between the quotes are taken
    /// verbatim. A newline or end of input before the closing quote is an
    /// error, reported at the opening quote.
    fn scan_string(&mut self) -> QuillResult<()> {
        while self.peek() != '"' && self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }

        if self.is_at_end() || self.peek() == '\n' {
            return Err(self.error("Unterminated string"));
        }

        // Consume closing quote
        self.advance();

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_token(TokenType::Literal(Literal::String(value)))
    }

    /// Scan a number literal (integer or single-dot decimal)
    fn scan_number(&mut self) -> QuillResult<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A dot only joins the number when a digit follows it
        let is_float = if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            true
        } else {
            false
        };

        let lexeme: String = self.source[self.start..self.current].iter().collect();

        if is_float {
            let value = lexeme
                .parse::<f64>()
                .map_err(|_| self.error(&format!("Invalid float literal '{}'", lexeme)))?;
            self.add_token(TokenType::Literal(Literal::Float(value)))
        } else {
            let value = lexeme
                .parse::<i64>()
                .map_err(|_| self.error(&format!("Invalid integer literal '{}'", lexeme)))?;
            self.add_token(TokenType::Literal(Literal::Integer(value)))
        }
    }

    /// Scan an identifier or keyword
    ///
    /// The identifier rule matches first; the lexeme is then looked up in the
    /// keyword table. This keeps an identifier that merely starts with a
    /// keyword ("classroom") from being split.
    fn scan_identifier(&mut self) -> QuillResult<()> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme: String = self.source[self.start..self.current].iter().collect();

        let token_type = if let Some(keyword) = Keyword::from_str(&lexeme) {
            TokenType::Keyword(keyword)
        } else {
            TokenType::Identifier
        };

        self.add_token(token_type)
    }

    /// Scan a block comment (not nesting), discarding its contents
    fn scan_block_comment(&mut self) -> QuillResult<()> {
        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                return Ok(());
            }
            if self.peek() == '\n' {
                self.line += 1;
                self.column = 1;
            }
            self.advance();
        }

        Err(self.error("Unterminated block comment"))
    }

    /// Add a token to the token list
    fn add_token(&mut self, token_type: TokenType) -> QuillResult<()> {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(token_type, lexeme, self.start_location()));
        Ok(())
    }

    /// Advance to the next character
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    /// Check if the next character matches and consume it if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            self.column += 1;
            true
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    /// Peek at the next character without consuming it
    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    /// Check if we've reached the end of the source
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Location of the character the lexer is currently at
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.current, self.line, self.column, self.filename.clone())
    }

    /// Location of the start of the token being scanned
    ///
    /// Valid while the token lies on a single line, which holds for every
    /// token kind (strings may not span newlines).
    fn start_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.start,
            self.line,
            self.column - (self.current - self.start),
            self.filename.clone(),
        )
    }

    /// Create an error at the start of the token being scanned
    fn error(&self, message: &str) -> QuillError {
        QuillError::lexer_error(message, self.start_location())
    }
}
