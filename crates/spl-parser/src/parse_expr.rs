//! Expression parsing: the precedence chain.
//!
//! Lowest to highest: comparison, additive, multiplicative, unary, primary.
//! All binary operators are left-associative.

use crate::parser::{ParseError, Parser};
use spl_lexer::token::TokenKind;
use spl_types::ast::*;

impl Parser {
    /// Parse a full expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    /// `term (('>' | '<' | '>=' | '<=' | '==' | '!=') term)*`
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Greater => BinOp::Greater,
                TokenKind::Less => BinOp::Less,
                TokenKind::GreaterEq => BinOp::GreaterEq,
                TokenKind::LessEq => BinOp::LessEq,
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            };
        }
        Ok(left)
    }

    /// `factor (('+' | '-') factor)*`
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            };
        }
        Ok(left)
    }

    /// `unary (('*' | '/') unary)*`
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            };
        }
        Ok(left)
    }

    /// `'-' unary | primary` — unary minus is right-associative.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Minus) {
            let start = self.advance().span;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                },
                span,
            });
        }
        self.parse_primary()
    }

    /// Literals, variables, indexing, grouping, list literals, `range(...)`.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Number(value) => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::NumberLit(value),
                    span,
                })
            }
            TokenKind::Str(value) => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::StringLit(value),
                    span,
                })
            }
            TokenKind::True => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::BoolLit(true),
                    span,
                })
            }
            TokenKind::False => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::BoolLit(false),
                    span,
                })
            }
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                let mut expr = Expr {
                    kind: ExprKind::Variable(name),
                    span,
                };
                // A single index is allowed directly after the
                // identifier; indexing binds tighter than any operator.
                if self.eat(&TokenKind::LBracket) {
                    let index = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = expr.span.merge(self.previous_span());
                    expr = Expr {
                        kind: ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    };
                }
                Ok(expr)
            }
            TokenKind::Range => {
                let start = self.advance().span;
                self.expect(&TokenKind::LParen)?;
                let args = self.parse_expr_list(&TokenKind::RParen)?;
                self.expect(&TokenKind::RParen)?;
                let span = start.merge(self.previous_span());
                Ok(Expr {
                    kind: ExprKind::Range(args),
                    span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                let start = self.advance().span;
                let elements = self.parse_expr_list(&TokenKind::RBracket)?;
                self.expect(&TokenKind::RBracket)?;
                let span = start.merge(self.previous_span());
                Ok(Expr {
                    kind: ExprKind::ListLit(elements),
                    span,
                })
            }
            _ => Err(self.error("expected expression")),
        }
    }

    /// Parse a comma-separated expression list, stopping before
    /// `terminator`. The list may be empty; no trailing comma.
    pub(crate) fn parse_expr_list(
        &mut self,
        terminator: &TokenKind,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        if self.check(terminator) {
            return Ok(exprs);
        }
        exprs.push(self.parse_expression()?);
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }
}
