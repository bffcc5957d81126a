//! The tree-walking interpreter.

use crate::env::Environment;
use crate::error::RuntimeError;
use crate::value::Value;
use spl_types::ast::*;
use spl_types::Span;

/// Default step budget. Generous enough for real scripts, small enough
/// to abort a runaway `while True` loop quickly.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// How a statement finished.
enum Flow {
    /// Fell through. Carries the statement's value when it has one
    /// (expression statements only).
    Normal(Option<Value>),
    /// A `break` is propagating to the nearest enclosing loop. Carries
    /// the `break` keyword's span for the outside-loop error.
    Break(Span),
}

/// Walks the AST against a persistent global [`Environment`].
///
/// Print output accumulates in an internal buffer that the caller
/// drains with [`take_output`](Interpreter::take_output). Every
/// statement execution and loop iteration costs one step against the
/// step budget; exceeding it aborts with
/// [`RuntimeError::StepLimitExceeded`].
pub struct Interpreter {
    env: Environment,
    output: Vec<String>,
    steps: u64,
    step_limit: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_step_limit(DEFAULT_STEP_LIMIT)
    }

    pub fn with_step_limit(step_limit: u64) -> Self {
        Self {
            env: Environment::new(),
            output: Vec::new(),
            steps: 0,
            step_limit,
        }
    }

    /// The global environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Drain the print output accumulated so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Drop all variable bindings and buffered output.
    pub fn reset(&mut self) {
        self.env.clear();
        self.output.clear();
        self.steps = 0;
    }

    /// Execute a program. Returns the value of the final statement when
    /// it produced one (expression statements and assignments do, the
    /// rest do not). Variables persist across calls; the step counter
    /// starts fresh on each call.
    pub fn run(&mut self, program: &Program) -> Result<Option<Value>, RuntimeError> {
        self.steps = 0;
        let mut result = None;
        for stmt in &program.statements {
            match self.exec_stmt(stmt)? {
                Flow::Normal(value) => result = value,
                Flow::Break(span) => {
                    return Err(RuntimeError::BreakOutsideLoop { span });
                }
            }
        }
        Ok(result)
    }

    /// Charge one step against the budget.
    fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(RuntimeError::StepLimitExceeded {
                limit: self.step_limit,
            });
        }
        Ok(())
    }

    // ── Statements ────────────────────────────────────────────────────────────

    /// Execute the statements of a block in order, stopping early if a
    /// `break` propagates.
    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, RuntimeError> {
        let mut result = None;
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal(value) => result = value,
                flow @ Flow::Break(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal(result))
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        self.tick()?;
        match stmt {
            Stmt::Assign(s) => {
                // Assignment yields the stored value, so a trailing
                // `x = 5` shows up as the execution result.
                let value = self.eval_expr(&s.value)?;
                self.env.define(s.name.name.clone(), value.clone());
                Ok(Flow::Normal(Some(value)))
            }
            Stmt::Print(s) => {
                let mut parts = Vec::with_capacity(s.args.len());
                for arg in &s.args {
                    parts.push(self.eval_expr(arg)?.to_string());
                }
                self.output.push(parts.join(" "));
                Ok(Flow::Normal(None))
            }
            Stmt::If(s) => {
                if self.eval_expr(&s.condition)?.is_truthy() {
                    self.exec_block(&s.then_body)
                } else {
                    self.exec_block(&s.else_body)
                }
            }
            Stmt::While(s) => {
                loop {
                    self.tick()?;
                    if !self.eval_expr(&s.condition)?.is_truthy() {
                        break;
                    }
                    if let Flow::Break(_) = self.exec_block(&s.body)? {
                        break;
                    }
                }
                Ok(Flow::Normal(None))
            }
            Stmt::For(s) => self.exec_for(s),
            Stmt::Break(s) => Ok(Flow::Break(s.span)),
            Stmt::Expr(s) => {
                let value = self.eval_expr(&s.expr)?;
                Ok(Flow::Normal(Some(value)))
            }
        }
    }

    fn exec_for(&mut self, s: &ForStmt) -> Result<Flow, RuntimeError> {
        match self.eval_expr(&s.iterable)? {
            Value::List(items) => {
                for item in items {
                    self.tick()?;
                    self.env.define(s.var.name.clone(), item);
                    if let Flow::Break(_) = self.exec_block(&s.body)? {
                        break;
                    }
                }
            }
            Value::Range { start, end, step } => {
                let mut i = start;
                while (step > 0 && i < end) || (step < 0 && i > end) {
                    self.tick()?;
                    self.env.define(s.var.name.clone(), Value::Number(i as f64));
                    if let Flow::Break(_) = self.exec_block(&s.body)? {
                        break;
                    }
                    i += step;
                }
            }
            other => {
                return Err(RuntimeError::NotIterable {
                    type_name: other.type_name(),
                    span: s.iterable.span,
                });
            }
        }
        Ok(Flow::Normal(None))
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::NumberLit(n) => Ok(Value::Number(*n)),
            ExprKind::StringLit(s) => Ok(Value::Str(s.clone())),
            ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
            ExprKind::Variable(name) => {
                self.env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        span: expr.span,
                    })
            }
            ExprKind::Binary { left, op, right } => {
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                self.eval_binary(lhs, *op, rhs, expr.span)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                match (op, value) {
                    (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
                    (UnaryOp::Neg, other) => Err(RuntimeError::TypeMismatch {
                        message: format!("Cannot negate {}", other.type_name()),
                        span: expr.span,
                    }),
                }
            }
            ExprKind::ListLit(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element)?);
                }
                Ok(Value::List(items))
            }
            ExprKind::Index { object, index } => {
                let object_value = self.eval_expr(object)?;
                let index_value = self.eval_expr(index)?;
                self.eval_index(object_value, index_value, index.span)
            }
            ExprKind::Range(args) => self.eval_range(args, expr.span),
        }
    }

    fn eval_binary(
        &mut self,
        lhs: Value,
        op: BinOp,
        rhs: Value,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                // If either side is a string, `+` concatenates display forms
                (Value::Str(a), b) => Ok(Value::Str(format!("{a}{b}"))),
                (a, Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
                (a, b) => Err(self.type_mismatch(op, &a, &b, span)),
            },
            BinOp::Sub | BinOp::Mul | BinOp::Div => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => match op {
                    BinOp::Sub => Ok(Value::Number(a - b)),
                    BinOp::Mul => Ok(Value::Number(a * b)),
                    BinOp::Div => {
                        if b == 0.0 {
                            Err(RuntimeError::DivisionByZero { span })
                        } else {
                            Ok(Value::Number(a / b))
                        }
                    }
                    _ => unreachable!("outer match covers arithmetic ops only"),
                },
                (a, b) => Err(self.type_mismatch(op, &a, &b, span)),
            },
            BinOp::Eq => Ok(Value::Bool(lhs == rhs)),
            BinOp::NotEq => Ok(Value::Bool(lhs != rhs)),
            BinOp::Greater | BinOp::Less | BinOp::GreaterEq | BinOp::LessEq => {
                let ordering_holds = match (&lhs, &rhs) {
                    (Value::Number(a), Value::Number(b)) => Self::compare(op, a.partial_cmp(b)),
                    (Value::Str(a), Value::Str(b)) => Self::compare(op, Some(a.cmp(b))),
                    _ => None,
                };
                match ordering_holds {
                    Some(result) => Ok(Value::Bool(result)),
                    None => Err(self.type_mismatch(op, &lhs, &rhs, span)),
                }
            }
        }
    }

    fn compare(op: BinOp, ordering: Option<std::cmp::Ordering>) -> Option<bool> {
        let ord = ordering?;
        Some(match op {
            BinOp::Greater => ord.is_gt(),
            BinOp::Less => ord.is_lt(),
            BinOp::GreaterEq => ord.is_ge(),
            BinOp::LessEq => ord.is_le(),
            _ => return None,
        })
    }

    fn type_mismatch(&self, op: BinOp, lhs: &Value, rhs: &Value, span: Span) -> RuntimeError {
        RuntimeError::TypeMismatch {
            message: format!(
                "Cannot apply '{}' to {} and {}",
                op.symbol(),
                lhs.type_name(),
                rhs.type_name()
            ),
            span,
        }
    }

    fn eval_index(
        &mut self,
        object: Value,
        index: Value,
        index_span: Span,
    ) -> Result<Value, RuntimeError> {
        let items = match object {
            Value::List(items) => items,
            other => {
                return Err(RuntimeError::NotIndexable {
                    type_name: other.type_name(),
                    span: index_span,
                });
            }
        };
        let n = match index {
            Value::Number(n) if n.fract() == 0.0 => n as i64,
            Value::Number(_) => {
                return Err(RuntimeError::TypeMismatch {
                    message: "List index must be an integer".into(),
                    span: index_span,
                });
            }
            other => {
                return Err(RuntimeError::TypeMismatch {
                    message: format!("List index must be a number, not {}", other.type_name()),
                    span: index_span,
                });
            }
        };
        if n < 0 || n as usize >= items.len() {
            return Err(RuntimeError::IndexOutOfRange {
                index: n,
                len: items.len(),
                span: index_span,
            });
        }
        Ok(items[n as usize].clone())
    }

    /// Evaluate a `range(...)` call. One argument means `range(0, end)`,
    /// two mean `range(start, end)`, three add the step. Arguments are
    /// truncated toward zero.
    fn eval_range(&mut self, args: &[Expr], span: Span) -> Result<Value, RuntimeError> {
        if args.is_empty() || args.len() > 3 {
            return Err(RuntimeError::ArityError {
                got: args.len(),
                span,
            });
        }
        let mut bounds = Vec::with_capacity(args.len());
        for arg in args {
            match self.eval_expr(arg)? {
                Value::Number(n) => bounds.push(n.trunc() as i64),
                other => {
                    return Err(RuntimeError::TypeMismatch {
                        message: format!(
                            "range() arguments must be numbers, not {}",
                            other.type_name()
                        ),
                        span: arg.span,
                    });
                }
            }
        }
        let (start, end, step) = match bounds[..] {
            [end] => (0, end, 1),
            [start, end] => (start, end, 1),
            [start, end, step] => (start, end, step),
            _ => unreachable!("arity checked above"),
        };
        if step == 0 {
            return Err(RuntimeError::ZeroStep { span });
        }
        Ok(Value::Range { start, end, step })
    }
}
