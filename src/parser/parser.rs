//! Parser implementation
//!
//! Recursive-descent parser for the Quill language: one procedure per
//! grammar nonterminal, dispatching on a single token of lookahead, with a
//! precedence-climbing expression parser. The first failure aborts the whole
//! parse; no partial tree is ever returned.

use super::ast::*;
use crate::error::{QuillError, QuillResult};
use crate::lexer::{Keyword, Literal as TokenLiteral, Token, TokenType};

/// Parser for Quill token streams
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a new parser from tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse tokens into a program AST
    pub fn parse(&mut self) -> QuillResult<Program> {
        let statements = self.parse_statements()?;

        // A top-level '}' has no opening counterpart
        if !self.is_at_end() {
            return Err(self.unexpected_token());
        }

        Ok(Program { statements })
    }

    // ===== Statements =====

    /// Parse statements up to the caller's terminator: '}' inside a block,
    /// end of input at the top level. Semicolons are statement separators,
    /// never required; one is consumed after each statement if present.
    fn parse_statements(&mut self) -> QuillResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.match_token(TokenType::Semicolon);
        }

        Ok(statements)
    }

    /// Parse a brace-delimited body, consuming the closing '}'
    fn block_statements(&mut self) -> QuillResult<Vec<Stmt>> {
        let statements = self.parse_statements()?;
        self.consume(TokenType::RightBrace, "Expected '}' after block")?;
        Ok(statements)
    }

    fn parse_statement(&mut self) -> QuillResult<Stmt> {
        if self.match_keyword(Keyword::Let) {
            self.var_declaration()
        } else if self.match_keyword(Keyword::If) {
            self.if_statement()
        } else if self.match_keyword(Keyword::Function) {
            self.function_definition()
        } else if self.match_keyword(Keyword::Class) {
            self.class_definition()
        } else if self.match_keyword(Keyword::Import) {
            self.import_statement()
        } else if self.match_keyword(Keyword::Export) {
            self.export_statement()
        } else if self.match_keyword(Keyword::Try) {
            self.try_catch_statement()
        } else if self.can_begin_expression() {
            self.expression_statement()
        } else {
            Err(self.unexpected_token())
        }
    }

    fn var_declaration(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();
        let name = self.consume_identifier("Expected variable name after 'let'")?;
        self.consume_keyword(Keyword::As, "Expected 'as' after variable name")?;
        let declared_type = self.consume_identifier("Expected type name after 'as'")?;

        let initializer = if self.match_token(TokenType::Assign) {
            Some(self.expression()?)
        } else {
            None
        };

        Ok(Stmt::VarDecl {
            name,
            declared_type,
            initializer,
            location,
        })
    }

    fn if_statement(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();

        self.consume(TokenType::LeftParen, "Expected '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expected ')' after if condition")?;

        self.consume(TokenType::LeftBrace, "Expected '{' before if body")?;
        let then_body = self.block_statements()?;

        let else_body = if self.match_keyword(Keyword::Else) {
            self.consume(TokenType::LeftBrace, "Expected '{' after 'else'")?;
            Some(self.block_statements()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_body,
            else_body,
            location,
        })
    }

    fn function_definition(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();
        let name = self.consume_identifier("Expected function name")?;

        self.consume(TokenType::LeftParen, "Expected '(' after function name")?;
        let params = if self.check(TokenType::RightParen) {
            Vec::new()
        } else {
            self.typed_name_list("parameter")?
        };
        self.consume(TokenType::RightParen, "Expected ')' after parameters")?;

        self.consume(TokenType::LeftBrace, "Expected '{' before function body")?;
        let body = self.block_statements()?;

        Ok(Stmt::Function {
            name,
            params,
            body,
            location,
        })
    }

    fn class_definition(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();
        let name = self.consume_identifier("Expected class name")?;

        self.consume(TokenType::LeftBrace, "Expected '{' after class name")?;
        let properties = if self.check(TokenType::RightBrace) {
            Vec::new()
        } else {
            self.typed_name_list("property")?
        };
        self.consume(TokenType::RightBrace, "Expected '}' after class properties")?;

        Ok(Stmt::Class {
            name,
            properties,
            location,
        })
    }

    /// Parse a comma-separated `name as type` list (function parameters,
    /// class properties)
    fn typed_name_list(&mut self, what: &str) -> QuillResult<Vec<TypedName>> {
        let mut names = Vec::new();

        loop {
            let name = self.consume_identifier(&format!("Expected {} name", what))?;
            self.consume_keyword(Keyword::As, &format!("Expected 'as' after {} name", what))?;
            let type_name = self.consume_identifier("Expected type name after 'as'")?;
            names.push(TypedName { name, type_name });

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        Ok(names)
    }

    fn import_statement(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();

        self.consume(TokenType::LeftBrace, "Expected '{' after 'import'")?;
        let mut names = vec![self.consume_identifier("Expected imported name")?];
        while self.match_token(TokenType::Comma) {
            names.push(self.consume_identifier("Expected imported name after ','")?);
        }
        // The list's '}' is checked once, after the comma loop
        self.consume(TokenType::RightBrace, "Expected '}' after import list")?;

        self.consume_keyword(Keyword::From, "Expected 'from' after import list")?;
        let module = self.consume_identifier("Expected module name after 'from'")?;

        self.consume_keyword(Keyword::As, "Expected 'as' after module name")?;
        let alias = self.consume_string("Expected alias string after 'as'")?;

        Ok(Stmt::Import {
            names,
            module,
            alias,
            location,
        })
    }

    fn export_statement(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();

        self.consume_keyword(Keyword::Default, "Expected 'default' after 'export'")?;
        let exported_item = self.consume_identifier("Expected exported name after 'default'")?;

        Ok(Stmt::Export {
            exported_item,
            location,
        })
    }

    fn try_catch_statement(&mut self) -> QuillResult<Stmt> {
        let location = self.previous().location.clone();

        self.consume(TokenType::LeftBrace, "Expected '{' after 'try'")?;
        let try_body = self.block_statements()?;

        self.consume_keyword(Keyword::Catch, "Expected 'catch' after try block")?;
        self.consume(TokenType::LeftParen, "Expected '(' after 'catch'")?;
        let exception_var = self.consume_identifier("Expected exception variable name")?;
        self.consume(TokenType::RightParen, "Expected ')' after exception variable")?;

        self.consume(TokenType::LeftBrace, "Expected '{' before catch body")?;
        let catch_body = self.block_statements()?;

        Ok(Stmt::TryCatch {
            try_body,
            exception_var,
            catch_body,
            location,
        })
    }

    fn expression_statement(&mut self) -> QuillResult<Stmt> {
        let expr = self.expression()?;
        let location = expr.location().clone();
        Ok(Stmt::Expression { expr, location })
    }

    /// Whether the current token can start an expression
    fn can_begin_expression(&self) -> bool {
        matches!(
            self.peek().token_type,
            TokenType::Literal(_)
                | TokenType::Identifier
                | TokenType::LeftParen
                | TokenType::Minus
                | TokenType::Bang
                | TokenType::Keyword(Keyword::True)
                | TokenType::Keyword(Keyword::False)
        )
    }

    // ===== Expressions =====

    fn expression(&mut self) -> QuillResult<Expr> {
        self.logical()
    }

    fn logical(&mut self) -> QuillResult<Expr> {
        let mut expr = self.equality()?;

        while self.match_tokens(&[TokenType::Ampersand, TokenType::Pipe]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Ampersand => BinaryOp::And,
                TokenType::Pipe => BinaryOp::Or,
                _ => unreachable!(),
            };
            let right = Box::new(self.equality()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> QuillResult<Expr> {
        let mut expr = self.comparison()?;

        while self.match_tokens(&[TokenType::Equal, TokenType::NotEqual]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Equal => BinaryOp::Equal,
                TokenType::NotEqual => BinaryOp::NotEqual,
                _ => unreachable!(),
            };
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> QuillResult<Expr> {
        let mut expr = self.term()?;

        while self.match_tokens(&[
            TokenType::Greater,
            TokenType::GreaterEqual,
            TokenType::Less,
            TokenType::LessEqual,
        ]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Greater => BinaryOp::Greater,
                TokenType::GreaterEqual => BinaryOp::GreaterEqual,
                TokenType::Less => BinaryOp::Less,
                TokenType::LessEqual => BinaryOp::LessEqual,
                _ => unreachable!(),
            };
            let right = Box::new(self.term()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> QuillResult<Expr> {
        let mut expr = self.factor()?;

        while self.match_tokens(&[TokenType::Plus, TokenType::Minus]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            let right = Box::new(self.factor()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> QuillResult<Expr> {
        let mut expr = self.unary()?;

        while self.match_tokens(&[TokenType::Star, TokenType::Slash]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Star => BinaryOp::Multiply,
                TokenType::Slash => BinaryOp::Divide,
                _ => unreachable!(),
            };
            let right = Box::new(self.unary()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> QuillResult<Expr> {
        if self.match_tokens(&[TokenType::Minus, TokenType::Bang]) {
            let location = self.previous().location.clone();
            let operator = match &self.previous().token_type {
                TokenType::Minus => UnaryOp::Negate,
                TokenType::Bang => UnaryOp::Not,
                _ => unreachable!(),
            };
            let operand = Box::new(self.unary()?);
            return Ok(Expr::Unary {
                operator,
                operand,
                location,
            });
        }

        self.call()
    }

    /// Postfix chains: calls and member accesses bind tighter than every
    /// binary operator and associate to the left
    fn call(&mut self) -> QuillResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.match_token(TokenType::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_token(TokenType::Dot) {
                let location = self.previous().location.clone();
                let property = self.consume_identifier("Expected property name after '.'")?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                    location,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> QuillResult<Expr> {
        let location = self.previous().location.clone();
        let mut arguments = Vec::new();

        if !self.check(TokenType::RightParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenType::RightParen, "Expected ')' after arguments")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            arguments,
            location,
        })
    }

    fn primary(&mut self) -> QuillResult<Expr> {
        let location = self.peek().location.clone();

        // Literals
        if let TokenType::Literal(lit) = &self.peek().token_type {
            let value = match lit {
                TokenLiteral::Integer(n) => Literal::Integer(*n),
                TokenLiteral::Float(f) => Literal::Float(*f),
                TokenLiteral::String(s) => Literal::String(s.clone()),
            };
            self.advance();
            return Ok(Expr::Literal { value, location });
        }

        // Boolean literals
        if self.match_keyword(Keyword::True) {
            return Ok(Expr::Literal {
                value: Literal::Boolean(true),
                location,
            });
        }

        if self.match_keyword(Keyword::False) {
            return Ok(Expr::Literal {
                value: Literal::Boolean(false),
                location,
            });
        }

        // Identifiers
        if self.check(TokenType::Identifier) {
            let name = self.advance().lexeme.clone();
            return Ok(Expr::Identifier { name, location });
        }

        // Parenthesized expression
        if self.match_token(TokenType::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expected ')' after expression")?;
            return Ok(expr);
        }

        Err(QuillError::parse_error(
            format!("Expected expression, found {}", self.peek().token_type),
            location,
        ))
    }

    // ===== Helper Methods =====

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_tokens(&mut self, types: &[TokenType]) -> bool {
        for t in types {
            if self.check(t.clone()) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            std::mem::discriminant(&self.peek().token_type) == std::mem::discriminant(&token_type)
        }
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        if self.is_at_end() {
            false
        } else {
            matches!(&self.peek().token_type, TokenType::Keyword(k) if k == &keyword)
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> QuillResult<&Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(QuillError::parse_error(
                format!("{}, found {}", message, self.peek().token_type),
                self.peek().location.clone(),
            ))
        }
    }

    fn consume_keyword(&mut self, keyword: Keyword, message: &str) -> QuillResult<&Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(QuillError::parse_error(
                format!("{}, found {}", message, self.peek().token_type),
                self.peek().location.clone(),
            ))
        }
    }

    fn consume_identifier(&mut self, message: &str) -> QuillResult<String> {
        if self.check(TokenType::Identifier) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(QuillError::parse_error(
                format!("{}, found {}", message, self.peek().token_type),
                self.peek().location.clone(),
            ))
        }
    }

    fn consume_string(&mut self, message: &str) -> QuillResult<String> {
        if let TokenType::Literal(TokenLiteral::String(value)) = &self.peek().token_type {
            let value = value.clone();
            self.advance();
            Ok(value)
        } else {
            Err(QuillError::parse_error(
                format!("{}, found {}", message, self.peek().token_type),
                self.peek().location.clone(),
            ))
        }
    }

    fn unexpected_token(&self) -> QuillError {
        QuillError::parse_error(
            format!("Unexpected token {}", self.peek().token_type),
            self.peek().location.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> QuillResult<Program> {
        let mut lexer = Lexer::new(source, None);
        let tokens = lexer.tokenize()?;
        Parser::new(tokens).parse()
    }

    fn single_statement(source: &str) -> Stmt {
        let program = parse_source(source).unwrap();
        assert_eq!(program.statements.len(), 1);
        program.statements.into_iter().next().unwrap()
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_var_declaration() {
        match single_statement("let age as int = 18;") {
            Stmt::VarDecl {
                name,
                declared_type,
                initializer,
                ..
            } => {
                assert_eq!(name, "age");
                assert_eq!(declared_type, "int");
                assert!(matches!(
                    initializer,
                    Some(Expr::Literal {
                        value: Literal::Integer(18),
                        ..
                    })
                ));
            }
            other => panic!("expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_var_declaration_without_initializer() {
        match single_statement("let name as string") {
            Stmt::VarDecl {
                name,
                declared_type,
                initializer,
                ..
            } => {
                assert_eq!(name, "name");
                assert_eq!(declared_type, "string");
                assert!(initializer.is_none());
            }
            other => panic!("expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_var_declaration_missing_as() {
        let result = parse_source("let age int;");
        match result {
            Err(QuillError::ParseError { message, .. }) => {
                assert!(message.contains("'as'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_if_statement() {
        match single_statement("if (age > 18) { greet() } else { wait() }") {
            Stmt::If {
                condition,
                then_body,
                else_body,
                ..
            } => {
                assert!(matches!(
                    condition,
                    Expr::Binary {
                        operator: BinaryOp::Greater,
                        ..
                    }
                ));
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.unwrap().len(), 1);
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        match single_statement("if (ready) { go() }") {
            Stmt::If { else_body, .. } => assert!(else_body.is_none()),
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_requires_parenthesized_condition() {
        let result = parse_source("if true { }");
        match result {
            Err(QuillError::ParseError { message, location }) => {
                assert!(message.contains("Expected '(' after 'if'"));
                assert!(message.contains("keyword 'true'"));
                assert_eq!(location.column, 4);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_function_definition() {
        match single_statement("function add(a as int, b as int) { a + b }") {
            Stmt::Function {
                name, params, body, ..
            } => {
                assert_eq!(name, "add");
                assert_eq!(
                    params,
                    vec![
                        TypedName {
                            name: "a".to_string(),
                            type_name: "int".to_string()
                        },
                        TypedName {
                            name: "b".to_string(),
                            type_name: "int".to_string()
                        },
                    ]
                );
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_function_without_parameters() {
        match single_statement("function main() { }") {
            Stmt::Function {
                name, params, body, ..
            } => {
                assert_eq!(name, "main");
                assert!(params.is_empty());
                assert!(body.is_empty());
            }
            other => panic!("expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_class_definition() {
        match single_statement("class Point { x as int, y as int }") {
            Stmt::Class {
                name, properties, ..
            } => {
                assert_eq!(name, "Point");
                assert_eq!(properties.len(), 2);
                assert_eq!(properties[0].name, "x");
                assert_eq!(properties[0].type_name, "int");
                assert_eq!(properties[1].name, "y");
            }
            other => panic!("expected class definition, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_class() {
        match single_statement("class Marker { }") {
            Stmt::Class { properties, .. } => assert!(properties.is_empty()),
            other => panic!("expected class definition, got {:?}", other),
        }
    }

    #[test]
    fn test_import_statement() {
        match single_statement("import { sqrt, pow } from math as \"m\";") {
            Stmt::Import {
                names,
                module,
                alias,
                ..
            } => {
                assert_eq!(names, vec!["sqrt".to_string(), "pow".to_string()]);
                assert_eq!(module, "math");
                assert_eq!(alias, "m");
            }
            other => panic!("expected import statement, got {:?}", other),
        }
    }

    #[test]
    fn test_import_single_name() {
        match single_statement("import { log } from console as \"c\"") {
            Stmt::Import { names, .. } => assert_eq!(names, vec!["log".to_string()]),
            other => panic!("expected import statement, got {:?}", other),
        }
    }

    #[test]
    fn test_export_statement() {
        match single_statement("export default handler;") {
            Stmt::Export { exported_item, .. } => assert_eq!(exported_item, "handler"),
            other => panic!("expected export statement, got {:?}", other),
        }
    }

    #[test]
    fn test_try_catch_statement() {
        match single_statement("try { risky() } catch (err) { report(err) }") {
            Stmt::TryCatch {
                try_body,
                exception_var,
                catch_body,
                ..
            } => {
                assert_eq!(try_body.len(), 1);
                assert_eq!(exception_var, "err");
                assert_eq!(catch_body.len(), 1);
            }
            other => panic!("expected try/catch statement, got {:?}", other),
        }
    }

    #[test]
    fn test_three_level_nesting() {
        let source = "function f(a as int){ if (a > 0) { try { let y as int; } catch (e) { } } }";
        match single_statement(source) {
            Stmt::Function { body, .. } => {
                assert_eq!(body.len(), 1);
                match &body[0] {
                    Stmt::If { then_body, .. } => {
                        assert_eq!(then_body.len(), 1);
                        match &then_body[0] {
                            Stmt::TryCatch {
                                try_body,
                                catch_body,
                                ..
                            } => {
                                assert_eq!(try_body.len(), 1);
                                assert!(matches!(try_body[0], Stmt::VarDecl { .. }));
                                assert!(catch_body.is_empty());
                            }
                            other => panic!("expected try/catch, got {:?}", other),
                        }
                    }
                    other => panic!("expected if, got {:?}", other),
                }
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        match single_statement("1 + 2 * 3;") {
            Stmt::Expression { expr, .. } => match expr {
                Expr::Binary {
                    operator: BinaryOp::Add,
                    left,
                    right,
                    ..
                } => {
                    assert!(matches!(
                        *left,
                        Expr::Literal {
                            value: Literal::Integer(1),
                            ..
                        }
                    ));
                    match *right {
                        Expr::Binary {
                            operator: BinaryOp::Multiply,
                            ref left,
                            ref right,
                            ..
                        } => {
                            assert!(matches!(
                                **left,
                                Expr::Literal {
                                    value: Literal::Integer(2),
                                    ..
                                }
                            ));
                            assert!(matches!(
                                **right,
                                Expr::Literal {
                                    value: Literal::Integer(3),
                                    ..
                                }
                            ));
                        }
                        ref other => panic!("expected multiplication, got {:?}", other),
                    }
                }
                other => panic!("expected addition at the root, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        match single_statement("10 - 2 - 3;") {
            Stmt::Expression {
                expr:
                    Expr::Binary {
                        operator: BinaryOp::Subtract,
                        left,
                        right,
                        ..
                    },
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Binary {
                        operator: BinaryOp::Subtract,
                        ..
                    }
                ));
                assert!(matches!(
                    *right,
                    Expr::Literal {
                        value: Literal::Integer(3),
                        ..
                    }
                ));
            }
            other => panic!("expected subtraction at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_logical_binds_loosest() {
        match single_statement("a == b & c == d;") {
            Stmt::Expression {
                expr:
                    Expr::Binary {
                        operator: BinaryOp::And,
                        left,
                        right,
                        ..
                    },
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Binary {
                        operator: BinaryOp::Equal,
                        ..
                    }
                ));
                assert!(matches!(
                    *right,
                    Expr::Binary {
                        operator: BinaryOp::Equal,
                        ..
                    }
                ));
            }
            other => panic!("expected '&' at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_expression() {
        match single_statement("(1 + 2) * 3;") {
            Stmt::Expression {
                expr:
                    Expr::Binary {
                        operator: BinaryOp::Multiply,
                        left,
                        ..
                    },
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Binary {
                        operator: BinaryOp::Add,
                        ..
                    }
                ));
            }
            other => panic!("expected multiplication at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_operators() {
        match single_statement("-x * 3;") {
            Stmt::Expression {
                expr:
                    Expr::Binary {
                        operator: BinaryOp::Multiply,
                        left,
                        ..
                    },
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Unary {
                        operator: UnaryOp::Negate,
                        ..
                    }
                ));
            }
            other => panic!("expected multiplication at the root, got {:?}", other),
        }

        match single_statement("!ready;") {
            Stmt::Expression {
                expr:
                    Expr::Unary {
                        operator: UnaryOp::Not,
                        operand,
                        ..
                    },
                ..
            } => {
                assert!(matches!(*operand, Expr::Identifier { .. }));
            }
            other => panic!("expected unary not, got {:?}", other),
        }
    }

    #[test]
    fn test_boolean_literal_expression() {
        match single_statement("true;") {
            Stmt::Expression {
                expr:
                    Expr::Literal {
                        value: Literal::Boolean(true),
                        ..
                    },
                ..
            } => {}
            other => panic!("expected boolean literal, got {:?}", other),
        }
    }

    #[test]
    fn test_method_call() {
        match single_statement("printer.print(\"hi\");") {
            Stmt::Expression {
                expr: Expr::Call {
                    callee, arguments, ..
                },
                ..
            } => {
                match *callee {
                    Expr::Member {
                        ref object,
                        ref property,
                        ..
                    } => {
                        assert!(
                            matches!(**object, Expr::Identifier { ref name, .. } if name == "printer")
                        );
                        assert_eq!(property, "print");
                    }
                    ref other => panic!("expected member access callee, got {:?}", other),
                }
                assert_eq!(arguments.len(), 1);
                assert!(matches!(
                    arguments[0],
                    Expr::Literal {
                        value: Literal::String(ref s),
                        ..
                    } if s == "hi"
                ));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_member_chain() {
        match single_statement("a.b.c;") {
            Stmt::Expression {
                expr: Expr::Member {
                    object, property, ..
                },
                ..
            } => {
                assert_eq!(property, "c");
                assert!(matches!(
                    *object,
                    Expr::Member { ref property, .. } if property == "b"
                ));
            }
            other => panic!("expected member access, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_multiple_arguments() {
        match single_statement("f(1, x, \"s\")") {
            Stmt::Expression {
                expr: Expr::Call { arguments, .. },
                ..
            } => assert_eq!(arguments.len(), 3),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_semicolons_are_optional_separators() {
        let program = parse_source("let x as int let y as int").unwrap();
        assert_eq!(program.statements.len(), 2);

        let program = parse_source("let x as int; let y as int;").unwrap();
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_unexpected_token() {
        let result = parse_source("loop");
        match result {
            Err(QuillError::ParseError { message, .. }) => {
                assert!(message.contains("Unexpected token"));
                assert!(message.contains("keyword 'loop'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_closing_brace() {
        let result = parse_source("let x as int }");
        match result {
            Err(QuillError::ParseError { message, .. }) => {
                assert!(message.contains("Unexpected token"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut lexer = Lexer::new("let x as int = 1 + 2 * 3; export default x;", None);
        let tokens = lexer.tokenize().unwrap();

        let first = Parser::new(tokens.clone()).parse().unwrap();
        let second = Parser::new(tokens).parse().unwrap();
        assert_eq!(first, second);
    }
}
