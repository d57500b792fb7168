//! Statement parsing implementation
//!
//! The statement grammar is small: a statement is either a declaration
//! (introduced by a type keyword) or an expression statement, and both end
//! at a mandatory semicolon. A bare semicolon is an empty statement.

use crate::parser::ast::{AstNode, Declarator};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.is_type_keyword() {
            self.parse_declaration()
        } else {
            self.parse_expression_statement()
        }
    }

    /// Parse a declaration: `type name (= init)? (, name (= init)?)* ;`
    ///
    /// Initializers sit at assignment level so a comma always separates
    /// declarators rather than sequencing inside one initializer.
    fn parse_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let type_name = match self.peek().type_keyword() {
            Some(name) => name.to_string(),
            None => return Err(self.unexpected("a type keyword")),
        };
        self.advance();

        let mut declarators = Vec::new();
        loop {
            let (name, loc) = self.expect_identifier()?;
            let init = if self.match_token(&Token::Eq(self.current_location())) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(Declarator {
                name,
                init,
                location: loc,
            });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "';' after declaration",
        )?;

        Ok(AstNode::Declaration {
            type_name,
            declarators,
            location,
        })
    }

    /// Parse an expression statement: `expr ;` or the empty statement `;`.
    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();

        if self.match_token(&Token::Semicolon(location)) {
            return Ok(AstNode::EmptyStatement { location });
        }

        let expr = Box::new(self.parse_expression()?);
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "';' after expression",
        )?;

        Ok(AstNode::ExpressionStatement { expr, location })
    }
}
