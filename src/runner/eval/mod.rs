//! Evaluation support shared with the AST walker.

pub mod types;

pub use types::{Diagnostic, Diagnostics, SourceLocation};
