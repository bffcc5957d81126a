//! SPL evaluator: walks the AST and executes it against a persistent
//! global environment.
//!
//! The main entry point is [`Session`], which owns an [`Interpreter`]
//! and runs source text end to end (lex, parse, evaluate), returning an
//! [`ExecutionResult`].

mod env;
mod error;
mod interpreter;
mod session;
mod value;

pub use env::Environment;
pub use error::{ExecError, RuntimeError};
pub use interpreter::Interpreter;
pub use session::{ExecutionResult, Session};
pub use value::Value;
