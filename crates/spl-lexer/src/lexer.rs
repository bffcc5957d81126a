//! Core SPL lexer — converts source text to a token stream.
//!
//! Features:
//! - All SPL tokens (10 reserved words, operators, punctuation, literals)
//! - Single-line comments stripped (`#`)
//! - Newlines emitted as tokens (they separate statements)
//! - Two-character operators (`==`, `>=`, `<=`, `!=`) checked before their
//!   one-character prefixes
//! - Fail-fast: the first lexical error aborts with position information

use spl_types::{SourceFile, Span};
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// A lexical error with source position.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Lexer error at {span}: {message}")]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// The SPL lexer.
///
/// Converts source text into a vector of [`Token`]s, stopping at the
/// first lexical error.
pub struct Lexer {
    /// The full source text as characters.
    source: Vec<char>,
    /// Current index into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl Lexer {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &SourceFile) -> Self {
        Self {
            source: source_file.source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream terminated by `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip spaces and tabs (NOT newlines — those are tokens).
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip a line comment (`# ...`), leaving the newline in place.
    /// Returns `true` if a comment was consumed.
    fn skip_comment(&mut self) -> bool {
        if self.peek() == Some('#') {
            while let Some(ch) = self.peek() {
                if ch == '\n' {
                    break;
                }
                self.advance();
            }
            true
        } else {
            false
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        if self.skip_comment() {
            return self.scan_token();
        }

        if self.at_end() {
            return Ok(Token::new(TokenKind::Eof, self.current_span()));
        }

        let start_line = self.line;
        let start_col = self.col;
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, self.current_span())),
        };

        let kind = match ch {
            '\n' => TokenKind::Newline,

            '"' => return self.scan_string(start_line, start_col),
            '0'..='9' => return self.scan_number(ch, start_line, start_col),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.scan_identifier(ch, start_line, start_col)),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,

            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    return Err(LexError::new(
                        "Unexpected character '!'",
                        self.span_from(start_line, start_col),
                    ));
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            _ => {
                return Err(LexError::new(
                    format!("Unexpected character '{ch}'"),
                    self.span_from(start_line, start_col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start_line, start_col)))
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    fn scan_number(
        &mut self,
        first: char,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first);
        let mut dots = 0usize;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else if ch == '.' {
                dots += 1;
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let span = self.span_from(start_line, start_col);
        if dots > 1 {
            return Err(LexError::new(
                format!("Malformed number '{text}': multiple decimal points"),
                span,
            ));
        }
        let value: f64 = text
            .parse()
            .map_err(|_| LexError::new(format!("Malformed number '{text}'"), span))?;

        Ok(Token::new(TokenKind::Number(value), span))
    }

    // ─────────────────────────────────────────────────────────────
    // Identifiers & keywords
    // ─────────────────────────────────────────────────────────────

    fn scan_identifier(&mut self, first: char, start_line: u32, start_col: u32) -> Token {
        let mut text = String::new();
        text.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let span = self.span_from(start_line, start_col);
        let kind =
            TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text));
        Token::new(kind, span)
    }

    // ─────────────────────────────────────────────────────────────
    // String literals
    // ─────────────────────────────────────────────────────────────

    /// Scan a string literal, starting after the opening `"`.
    ///
    /// Strings may span lines. Escapes: `\n`, `\t`, `\\`, `\"`; a backslash
    /// before any other character passes that character through literally.
    fn scan_string(&mut self, start_line: u32, start_col: u32) -> Result<Token, LexError> {
        let mut buf = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(LexError::new(
                        "Unterminated string literal",
                        Span::point(start_line, start_col),
                    ));
                }
                Some('"') => {
                    self.advance();
                    let span = self.span_from(start_line, start_col);
                    return Ok(Token::new(TokenKind::Str(buf), span));
                }
                Some('\\') => {
                    self.advance(); // consume the '\'
                    match self.advance() {
                        Some('n') => buf.push('\n'),
                        Some('t') => buf.push('\t'),
                        Some('\\') => buf.push('\\'),
                        Some('"') => buf.push('"'),
                        Some(other) => buf.push(other),
                        None => {
                            return Err(LexError::new(
                                "Unterminated string literal",
                                Span::point(start_line, start_col),
                            ));
                        }
                    }
                }
                Some(ch) => {
                    self.advance();
                    buf.push(ch);
                }
            }
        }
    }
}
