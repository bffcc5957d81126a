//! Core parser infrastructure: token cursor, error type, helpers.

use spl_lexer::token::{Token, TokenKind};
use spl_types::ast::{Ident, Program};
use spl_types::Span;
use thiserror::Error;

/// A syntax error: an expected token kind was absent, or a token
/// appeared in a position where the grammar allows nothing.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Parser error at {span}: {message}, got '{found}'")]
pub struct ParseError {
    pub message: String,
    /// The offending token's kind.
    pub found: TokenKind,
    pub span: Span,
}

/// The SPL parser.
///
/// Consumes a token stream produced by the lexer and builds a [`Program`]
/// by recursive descent. Fails fast on the first syntax error.
pub struct Parser {
    /// The token stream (always ends with `Eof`).
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Guarantee the Eof sentinel so cursor reads never run off the end.
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let span = tokens.last().map(|t| t.span).unwrap_or_else(|| Span::point(1, 1));
            tokens.push(Token::new(TokenKind::Eof, span));
        }
        Self { tokens, pos: 0 }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a final Eof token, and `advance` never moves
        // past it, so the index is always in bounds.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(1, 1)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Save the current cursor position so it can be restored later.
    pub(crate) fn pos_checkpoint(&self) -> usize {
        self.pos
    }

    /// Rewind the cursor to a previously saved position.
    pub(crate) fn pos_restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Build a syntax error at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            found: self.peek_kind().clone(),
            span: self.current_span(),
        }
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a specific token kind; consume and return it, or fail.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> Result<Token, ParseError> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    /// Expect an identifier token. Returns the name and span.
    pub(crate) fn expect_identifier(&mut self) -> Result<Ident, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Ok(Ident::new(name, span))
            }
            _ => Err(self.error("expected identifier")),
        }
    }

    // ── Newline Handling ──────────────────────────────────────────────────────

    /// Skip all consecutive newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Require a statement separator: `;` or one-or-more newlines.
    ///
    /// A statement directly followed by `}`, `else`, or end of file
    /// needs no separator.
    pub(crate) fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if self.check(&TokenKind::Newline) {
            self.skip_newlines();
            return Ok(());
        }
        match self.peek_kind() {
            TokenKind::RBrace | TokenKind::Else | TokenKind::Eof => Ok(()),
            _ => Err(self.error("expected ';' or newline after statement")),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a [`Program`].
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let start = self.current_span();
        self.skip_newlines();

        let mut statements = Vec::new();
        while !self.at_end() {
            let stmt = self.parse_statement()?;
            statements.push(stmt);
            self.expect_statement_end()?;
            self.skip_newlines();
        }

        let span = start.merge(self.previous_span());
        Ok(Program { statements, span })
    }
}
