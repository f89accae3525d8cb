//! A small interpreter for a parenthesized expression language.
//!
//! Source text goes through three stages: `scanner::scan_tokens` turns it into
//! tokens, `parser::parse` builds a tree, and `Interpreter::run` walks the tree
//! against an `Environment`. `evaluate` chains all three.

pub mod ast;
pub mod callable;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod position;
pub mod prelude;
pub mod scanner;
pub mod token;
pub mod value;

mod shared_list;

pub use crate::environment::Environment;
pub use crate::error::{Error, SourceError};
pub use crate::interpreter::Interpreter;
pub use crate::value::Value;

/// Evaluates `source` against `env` with the default interpreter settings.
pub fn evaluate(source: &str, env: &Environment) -> Result<Value, Error> {
    Interpreter::new().evaluate(source, env)
}
