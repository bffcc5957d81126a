//! AST node types for the SPL language.
//!
//! Every node carries a [`Span`] for error reporting. The node set is
//! closed: the interpreter dispatches with exhaustive matches, so adding
//! a variant is a compile error until every stage handles it. Recursive
//! positions are boxed to keep enum sizes reasonable.

use crate::Span;

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Expressions
// ─────────────────────────────────────────────────────────────────────

/// A spanned expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every expression form in SPL.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal: `42`, `3.14`
    NumberLit(f64),
    /// String literal: `"hello"`
    StringLit(String),
    /// `True` or `False`
    BoolLit(bool),
    /// Variable reference: `counter`
    Variable(String),
    /// Binary operation: `a + b`, `x < y`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// Unary operation: `-x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// List literal: `[1, 2, 3]`
    ListLit(Vec<Expr>),
    /// Index read: `items[i]`. Only valid directly after an identifier.
    Index { object: Box<Expr>, index: Box<Expr> },
    /// `range(...)` pseudo-call with 1–3 arguments (arity checked at runtime).
    Range(Vec<Expr>),
}

/// Binary operators, precedence encoded in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Eq,
    NotEq,
}

impl BinOp {
    /// Source text for this operator (used in error messages).
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Greater => ">",
            BinOp::Less => "<",
            BinOp::GreaterEq => ">=",
            BinOp::LessEq => "<=",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation: `-x`
    Neg,
}

// ─────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────

/// Every statement form in SPL.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = expr`
    Assign(AssignStmt),
    /// `print(arg, ...)`
    Print(PrintStmt),
    /// `if cond { ... } [else { ... }]`
    If(IfStmt),
    /// `while cond { ... }`
    While(WhileStmt),
    /// `for name in iterable { ... }`
    For(ForStmt),
    /// `break`
    Break(BreakStmt),
    /// A bare expression evaluated for its value.
    Expr(ExprStmt),
}

impl Stmt {
    /// The source span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign(s) => s.span,
            Stmt::Print(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Break(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    /// Empty when there is no `else` branch.
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var: Ident,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// A complete SPL program: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}
