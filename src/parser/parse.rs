//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! error types, token-stream helpers, and the program entry point. The
//! grammar itself is split across `impl Parser` blocks:
//!
//! - `expressions`: the sixteen precedence tiers, from comma down to primary
//! - `statements`: declarations and expression statements
//!
//! The parser consumes the full token vector produced by the lexer; any
//! mismatch aborts parsing with a [`ParseError`] carrying the offending
//! token's position (or an end-of-input marker). No partial tree is returned.

use crate::parser::ast::{Program, SourceLocation};
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Syntax error at {location}: {message}")]
    UnexpectedToken {
        message: String,
        location: SourceLocation,
    },
    #[error("Syntax error: unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Recursive descent parser for the C expression/statement subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Create a parser over an already-lexed token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The grammar methods rely on a trailing Eof sentinel.
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(|t| t.location())
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Convenience constructor: lex and wrap in one step.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse the entire program: a sequence of statements up to end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let stmt = self.parse_statement()?;
            program.statements.push(stmt);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        self.peek().type_keyword().is_some()
    }

    /// Consume the current token if it has the same variant as `token`
    /// (locations are ignored).
    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, expected: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else if self.is_at_end() {
            Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            })
        } else {
            Err(ParseError::UnexpectedToken {
                message: format!("expected {}, found {}", expected, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if let Token::Ident(name, loc) = self.peek_token() {
            self.advance();
            Ok((name, loc))
        } else if self.is_at_end() {
            Err(ParseError::UnexpectedEof {
                expected: "identifier".to_string(),
            })
        } else {
            Err(ParseError::UnexpectedToken {
                message: format!("expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }

    /// Error for a token that no grammar rule accepts at this point.
    pub(crate) fn unexpected(&self, context: &str) -> ParseError {
        if self.is_at_end() {
            ParseError::UnexpectedEof {
                expected: context.to_string(),
            }
        } else {
            ParseError::UnexpectedToken {
                message: format!("unexpected {} (expected {})", self.peek(), context),
                location: self.current_location(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{AssignOp, AstNode, BinOp, UnOp};

    fn parse(source: &str) -> Program {
        Parser::from_source(source).unwrap().parse_program().unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        match Parser::from_source(source) {
            Ok(mut parser) => parser.parse_program().unwrap_err(),
            Err(e) => e,
        }
    }

    fn statement_expr(program: &Program, idx: usize) -> &AstNode {
        match &program.statements[idx] {
            AstNode::ExpressionStatement { expr, .. } => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        let program = parse("2 + 3 * 4;");
        match statement_expr(&program, 0) {
            AstNode::BinaryOp {
                op: BinOp::Add,
                right,
                ..
            } => {
                assert!(matches!(**right, AstNode::BinaryOp { op: BinOp::Mul, .. }));
            }
            other => panic!("expected additive root, got {:?}", other),
        }
    }

    #[test]
    fn test_parens_reenter_comma_level() {
        let program = parse("(a = 1, a + 1) * 2;");
        match statement_expr(&program, 0) {
            AstNode::BinaryOp {
                op: BinOp::Mul,
                left,
                ..
            } => {
                assert!(matches!(
                    **left,
                    AstNode::BinaryOp {
                        op: BinOp::Comma,
                        ..
                    }
                ));
            }
            other => panic!("expected multiplicative root, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_right_associative() {
        let program = parse("a = b = 5;");
        match statement_expr(&program, 0) {
            AstNode::Assignment {
                op: AssignOp::Assign,
                value,
                ..
            } => {
                assert!(matches!(**value, AstNode::Assignment { .. }));
            }
            other => panic!("expected assignment root, got {:?}", other),
        }
    }

    #[test]
    fn test_ternary_absorbs_comma_in_true_branch() {
        let program = parse("a > 5 ? b += 5, b : c;");
        match statement_expr(&program, 0) {
            AstNode::Conditional { true_expr, .. } => {
                assert!(matches!(
                    **true_expr,
                    AstNode::BinaryOp {
                        op: BinOp::Comma,
                        ..
                    }
                ));
            }
            other => panic!("expected conditional root, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_vs_prefix_increment() {
        let program = parse("x++ + ++y;");
        match statement_expr(&program, 0) {
            AstNode::BinaryOp { left, right, .. } => {
                assert!(matches!(
                    **left,
                    AstNode::UnaryOp {
                        op: UnOp::PostInc,
                        ..
                    }
                ));
                assert!(matches!(
                    **right,
                    AstNode::UnaryOp {
                        op: UnOp::PreInc,
                        ..
                    }
                ));
            }
            other => panic!("expected additive root, got {:?}", other),
        }
    }

    #[test]
    fn test_non_lvalue_assignment_parses() {
        // Lvalue validation is deferred to evaluation time.
        let program = parse("5 = x;");
        match statement_expr(&program, 0) {
            AstNode::Assignment { target, .. } => {
                assert!(matches!(**target, AstNode::NumberLiteral(..)));
            }
            other => panic!("expected assignment root, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_with_mixed_declarators() {
        let program = parse("int a = 10, b, c = a + 1;");
        match &program.statements[0] {
            AstNode::Declaration {
                type_name,
                declarators,
                ..
            } => {
                assert_eq!(type_name, "int");
                assert_eq!(declarators.len(), 3);
                assert!(declarators[0].init.is_some());
                assert!(declarators[1].init.is_none());
                assert!(declarators[2].init.is_some());
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_statement() {
        let program = parse("; a;");
        assert!(matches!(program.statements[0], AstNode::EmptyStatement { .. }));
        assert!(matches!(
            program.statements[1],
            AstNode::ExpressionStatement { .. }
        ));
    }

    #[test]
    fn test_missing_semicolon_reports_position() {
        match parse_err("a = 1") {
            ParseError::UnexpectedEof { expected } => {
                assert!(expected.contains("';'"), "expected ';' marker, got {expected}");
            }
            other => panic!("expected end-of-input error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_colon_in_ternary() {
        match parse_err("a ? b ; c;") {
            ParseError::UnexpectedToken { location, .. } => {
                assert_eq!(location, SourceLocation::new(1, 7));
            }
            other => panic!("expected token error, got {:?}", other),
        }
    }

    #[test]
    fn test_brace_rejected_by_grammar() {
        assert!(matches!(
            parse_err("{ a; }"),
            ParseError::UnexpectedToken { .. }
        ));
    }
}
