//! Expression parsing implementation
//!
//! Recursive descent with one method per precedence tier, lowest to highest:
//!
//!  1. comma (left)
//!  2. assignment (right)
//!  3. conditional `?:` (right)
//!  4. logical or  5. logical and
//!  6. bitwise or  7. bitwise xor  8. bitwise and
//!  9. equality  10. relational  11. shift
//! 12. additive  13. multiplicative
//! 14. unary (right)  15. postfix (left)  16. primary
//!
//! Left-associative tiers parse the next-higher tier and then loop, folding
//! operands into the left spine; the right-associative tiers (assignment,
//! conditional) recurse into themselves instead.

use crate::parser::ast::{AssignOp, AstNode, BinOp, UnOp};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a full expression (comma level, the outermost tier).
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_comma()
    }

    /// Comma level (lowest precedence): left-associative sequencing.
    fn parse_comma(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_assignment()?;

        while self.match_token(&Token::Comma(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_assignment()?);
            expr = AstNode::BinaryOp {
                op: BinOp::Comma,
                left: Box::new(expr),
                right,
                location: loc,
            };
        }

        Ok(expr)
    }

    /// Assignment level (right-associative).
    ///
    /// Any expression is accepted as the target; whether it is a valid
    /// lvalue is checked at evaluation time.
    pub(crate) fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_conditional()?;

        let loc = self.current_location();
        let op = if self.match_token(&Token::Eq(loc)) {
            AssignOp::Assign
        } else if self.match_token(&Token::PlusEq(loc)) {
            AssignOp::AddAssign
        } else if self.match_token(&Token::MinusEq(loc)) {
            AssignOp::SubAssign
        } else if self.match_token(&Token::StarEq(loc)) {
            AssignOp::MulAssign
        } else if self.match_token(&Token::SlashEq(loc)) {
            AssignOp::DivAssign
        } else if self.match_token(&Token::PercentEq(loc)) {
            AssignOp::ModAssign
        } else if self.match_token(&Token::ShlEq(loc)) {
            AssignOp::ShlAssign
        } else if self.match_token(&Token::ShrEq(loc)) {
            AssignOp::ShrAssign
        } else if self.match_token(&Token::AmpEq(loc)) {
            AssignOp::AndAssign
        } else if self.match_token(&Token::CaretEq(loc)) {
            AssignOp::XorAssign
        } else if self.match_token(&Token::PipeEq(loc)) {
            AssignOp::OrAssign
        } else {
            return Ok(expr);
        };

        let value = Box::new(self.parse_assignment()?);
        Ok(AstNode::Assignment {
            op,
            target: Box::new(expr),
            value,
            location: loc,
        })
    }

    /// Conditional level: `condition ? true_expr : false_expr`
    /// (right-associative in the false branch).
    ///
    /// The true branch sits between two hard delimiters, so it may contain
    /// comma expressions even though comma is normally the outermost tier:
    /// parse it at assignment level, then fold trailing `, assignment` pairs
    /// into left-associative comma nodes until the mandatory ':'. Without
    /// this, `a > 5 ? b += 5, b : c` would end the true branch at the comma.
    fn parse_conditional(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.match_token(&Token::Question(self.current_location())) {
            let loc = self.previous_location();

            let mut true_expr = self.parse_assignment()?;
            while self.match_token(&Token::Comma(self.current_location())) {
                let comma_loc = self.previous_location();
                let right = Box::new(self.parse_assignment()?);
                true_expr = AstNode::BinaryOp {
                    op: BinOp::Comma,
                    left: Box::new(true_expr),
                    right,
                    location: comma_loc,
                };
            }

            self.expect_token(&Token::Colon(self.current_location()), "':' in conditional")?;
            let false_expr = Box::new(self.parse_conditional()?);

            return Ok(AstNode::Conditional {
                condition: Box::new(expr),
                true_expr: Box::new(true_expr),
                false_expr,
                location: loc,
            });
        }

        Ok(expr)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&Token::OrOr(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_logical_and()?);
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_or()?;

        while self.match_token(&Token::AndAnd(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_bitwise_or()?);
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse bitwise OR (|)
    fn parse_bitwise_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_xor()?;

        while self.match_token(&Token::Pipe(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_bitwise_xor()?);
            left = AstNode::BinaryOp {
                op: BinOp::BitOr,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse bitwise XOR (^)
    fn parse_bitwise_xor(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_and()?;

        while self.match_token(&Token::Caret(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_bitwise_and()?);
            left = AstNode::BinaryOp {
                op: BinOp::BitXor,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse bitwise AND (&)
    fn parse_bitwise_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_token(&Token::Amp(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_equality()?);
            left = AstNode::BinaryOp {
                op: BinOp::BitAnd,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::EqEq(loc)) {
                BinOp::Eq
            } else if self.match_token(&Token::NotEq(loc)) {
                BinOp::Ne
            } else {
                break;
            };

            let right = Box::new(self.parse_relational()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_shift()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Lt(loc)) {
                BinOp::Lt
            } else if self.match_token(&Token::Le(loc)) {
                BinOp::Le
            } else if self.match_token(&Token::Gt(loc)) {
                BinOp::Gt
            } else if self.match_token(&Token::Ge(loc)) {
                BinOp::Ge
            } else {
                break;
            };

            let right = Box::new(self.parse_shift()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse bitwise shift (<< >>)
    fn parse_shift(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Shl(loc)) {
                BinOp::Shl
            } else if self.match_token(&Token::Shr(loc)) {
                BinOp::Shr
            } else {
                break;
            };

            let right = Box::new(self.parse_additive()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_multiplicative()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else if self.match_token(&Token::Percent(loc)) {
                BinOp::Mod
            } else {
                break;
            };

            let right = Box::new(self.parse_unary()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary (! ~ ++ -- unary+ unary-), right-associative.
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        let op = if self.match_token(&Token::Bang(loc)) {
            UnOp::Not
        } else if self.match_token(&Token::Tilde(loc)) {
            UnOp::BitNot
        } else if self.match_token(&Token::PlusPlus(loc)) {
            UnOp::PreInc
        } else if self.match_token(&Token::MinusMinus(loc)) {
            UnOp::PreDec
        } else if self.match_token(&Token::Plus(loc)) {
            UnOp::Plus
        } else if self.match_token(&Token::Minus(loc)) {
            UnOp::Neg
        } else {
            return self.parse_postfix();
        };

        let operand = Box::new(self.parse_unary()?);
        Ok(AstNode::UnaryOp {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse postfix ([] post++ post--), left-associative.
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let loc = self.current_location();

            if self.match_token(&Token::PlusPlus(loc)) {
                expr = AstNode::UnaryOp {
                    op: UnOp::PostInc,
                    operand: Box::new(expr),
                    location: loc,
                };
            } else if self.match_token(&Token::MinusMinus(loc)) {
                expr = AstNode::UnaryOp {
                    op: UnOp::PostDec,
                    operand: Box::new(expr),
                    location: loc,
                };
            } else if self.match_token(&Token::LBracket(loc)) {
                // Subscript indices admit full comma expressions
                let index = Box::new(self.parse_expression()?);
                self.expect_token(
                    &Token::RBracket(self.current_location()),
                    "']' after subscript index",
                )?;
                expr = AstNode::Subscript {
                    container: Box::new(expr),
                    index,
                    location: loc,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse primary: identifier, number literal, or a parenthesized
    /// expression (which re-enters the comma level).
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        if let Token::Ident(name, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::Identifier(name, loc));
        }

        if let Token::Number(text, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::NumberLiteral(text, loc));
        }

        if self.match_token(&Token::LParen(loc)) {
            let expr = self.parse_expression()?;
            self.expect_token(
                &Token::RParen(self.current_location()),
                "')' after expression",
            )?;
            return Ok(expr);
        }

        Err(self.unexpected("an expression"))
    }
}
