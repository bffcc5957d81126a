//! Evaluation errors and the unified execution error.

use spl_lexer::LexError;
use spl_parser::ParseError;
use spl_types::Span;
use thiserror::Error;

/// An error raised while evaluating a program. Each variant carries the
/// span of the offending expression or statement, except the step-limit
/// abort which is not tied to a single location.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    #[error("Runtime error at {span}: Variable '{name}' is not defined")]
    UndefinedVariable { name: String, span: Span },

    #[error("Runtime error at {span}: Division by zero")]
    DivisionByZero { span: Span },

    #[error("Runtime error at {span}: Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: i64, len: usize, span: Span },

    #[error("Runtime error at {span}: Value of type {type_name} is not indexable")]
    NotIndexable {
        type_name: &'static str,
        span: Span,
    },

    #[error("Runtime error at {span}: Value of type {type_name} is not iterable")]
    NotIterable {
        type_name: &'static str,
        span: Span,
    },

    #[error("Runtime error at {span}: {message}")]
    TypeMismatch { message: String, span: Span },

    #[error("Runtime error at {span}: range() takes 1 to 3 arguments, got {got}")]
    ArityError { got: usize, span: Span },

    #[error("Runtime error at {span}: range() step must not be zero")]
    ZeroStep { span: Span },

    #[error("Runtime error at {span}: 'break' outside loop")]
    BreakOutsideLoop { span: Span },

    #[error("Runtime error: execution exceeded {limit} steps")]
    StepLimitExceeded { limit: u64 },
}

impl RuntimeError {
    /// The source location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::IndexOutOfRange { span, .. }
            | RuntimeError::NotIndexable { span, .. }
            | RuntimeError::NotIterable { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::ArityError { span, .. }
            | RuntimeError::ZeroStep { span }
            | RuntimeError::BreakOutsideLoop { span } => Some(*span),
            RuntimeError::StepLimitExceeded { .. } => None,
        }
    }
}

/// Any error from the three execution stages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ExecError {
    /// The source location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ExecError::Lex(e) => Some(e.span),
            ExecError::Parse(e) => Some(e.span),
            ExecError::Runtime(e) => e.span(),
        }
    }
}
