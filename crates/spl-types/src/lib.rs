//! Shared types for the SPL interpreter.
//!
//! This crate defines the AST node types, source spans, and the
//! `SourceFile` wrapper used for error context across all stages.

pub mod ast;
mod span;

pub use span::{SourceFile, Span};
