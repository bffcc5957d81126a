//! Statement parsing: assignment, print, if/else, while, for, break,
//! brace-delimited blocks, and expression statements.

use crate::parser::{ParseError, Parser};
use spl_lexer::token::TokenKind;
use spl_types::ast::*;

impl Parser {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek_kind() {
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Break => {
                let span = self.advance().span;
                Ok(Stmt::Break(BreakStmt { span }))
            }
            // Assignment only when the identifier is immediately followed
            // by `=`; otherwise the identifier starts an expression.
            TokenKind::Identifier(_) if *self.look_ahead(1) == TokenKind::Assign => {
                self.parse_assignment()
            }
            _ => {
                let expr = self.parse_expression()?;
                let span = expr.span;
                Ok(Stmt::Expr(ExprStmt { expr, span }))
            }
        }
    }

    /// `name = expression`
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Assign)?;
        let value = self.parse_expression()?;
        let span = name.span.merge(value.span);
        Ok(Stmt::Assign(AssignStmt { name, value, span }))
    }

    /// `print(arg, ...)`
    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span; // eat `print`
        self.expect(&TokenKind::LParen)?;
        let args = self.parse_expr_list(&TokenKind::RParen)?;
        self.expect(&TokenKind::RParen)?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Print(PrintStmt { args, span }))
    }

    /// `if condition { ... } [else { ... }]`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span; // eat `if`
        let condition = self.parse_expression()?;
        let then_body = self.parse_block()?;

        // `else` may sit on the same line as `}` or on the next
        let mut else_body = Vec::new();
        let checkpoint = self.pos_checkpoint();
        self.skip_newlines();
        if self.eat(&TokenKind::Else) {
            else_body = self.parse_block()?;
        } else {
            self.pos_restore(checkpoint);
        }

        let span = start.merge(self.previous_span());
        Ok(Stmt::If(IfStmt {
            condition,
            then_body,
            else_body,
            span,
        }))
    }

    /// `while condition { ... }`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span; // eat `while`
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span,
        }))
    }

    /// `for name in iterable { ... }`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span; // eat `for`
        let var = self.expect_identifier()?;
        self.expect(&TokenKind::In)?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::For(ForStmt {
            var,
            iterable,
            body,
            span,
        }))
    }

    /// Parse a brace-delimited block: `{ stmts... }`.
    ///
    /// The opening brace may be preceded by newlines.
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.skip_newlines();
        self.expect(&TokenKind::LBrace)?;
        self.skip_newlines();

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let stmt = self.parse_statement()?;
            stmts.push(stmt);
            self.expect_statement_end()?;
            self.skip_newlines();
        }
        if self.at_end() {
            return Err(self.error("expected '}' to close block"));
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }
}
