//! The execution session: the embedding-facing entry point.

use crate::error::ExecError;
use crate::interpreter::Interpreter;
use crate::value::Value;
use serde::Serialize;
use spl_lexer::Lexer;
use spl_parser::Parser;
use spl_types::SourceFile;
use std::collections::BTreeMap;

/// The outcome of one [`Session::execute`] call.
///
/// Serializes to plain JSON for embedders: `output` is the print lines
/// in order, `result` the value of the final statement when it produced
/// one, `error` the rendered error message on failure. Output produced
/// before a runtime error is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: Vec<String>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

/// A persistent execution session.
///
/// Runs source text through the lexer, parser and interpreter. The
/// global environment survives across `execute` calls, so a later
/// script sees variables assigned by an earlier one. State changes made
/// before an error are kept (execution is not transactional).
#[derive(Default)]
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session with a custom step budget per `execute` call.
    pub fn with_step_limit(step_limit: u64) -> Self {
        Self {
            interpreter: Interpreter::with_step_limit(step_limit),
        }
    }

    /// Run one script against the session's environment.
    pub fn execute(&mut self, source: &str) -> ExecutionResult {
        let source_file = SourceFile::new("<script>", source);
        match self.run(&source_file) {
            Ok(result) => ExecutionResult {
                success: true,
                output: self.interpreter.take_output(),
                result,
                error: None,
            },
            Err(e) => ExecutionResult {
                success: false,
                output: self.interpreter.take_output(),
                result: None,
                error: Some(render_error(&e, &source_file)),
            },
        }
    }

    fn run(&mut self, source_file: &SourceFile) -> Result<Option<Value>, ExecError> {
        let tokens = Lexer::new(source_file).tokenize()?;
        let program = Parser::new(tokens).parse()?;
        Ok(self.interpreter.run(&program)?)
    }

    /// Drop all variables, returning the session to a fresh state.
    pub fn reset(&mut self) {
        self.interpreter.reset();
    }

    /// A snapshot of the current global variables, sorted by name.
    pub fn variables(&self) -> BTreeMap<String, Value> {
        self.interpreter.env().snapshot()
    }
}

/// Render an error with the offending source line underneath, when the
/// error points at one.
fn render_error(error: &ExecError, source_file: &SourceFile) -> String {
    let mut text = error.to_string();
    if let Some(span) = error.span() {
        if let Some(line) = source_file.line(span.start_line) {
            text.push_str("\n  ");
            text.push_str(line);
        }
    }
    text
}
