use crate::ast::Node;
use crate::callable::{CallError, Function};
use crate::environment::Environment;
use crate::error::Error;
use crate::parser;
use crate::position::Position;
use crate::scanner;
use crate::value::{Kind, Value};
use log::{debug, trace};
use std::cell::Cell;
use std::rc::Rc;
use strum_macros::AsRefStr;

pub const DEFAULT_MAX_DEPTH: usize = 200;

#[derive(Debug, Clone, PartialEq, thiserror::Error, AsRefStr)]
pub enum RuntimeError {
    #[strum(serialize = "ReferenceError")]
    #[error("{name} is not defined")]
    Reference { name: String, position: Position },
    #[strum(serialize = "NotCallableError")]
    #[error("value of type {kind} is not callable")]
    NotCallable { kind: Kind, position: Position },
    #[strum(serialize = "RuntimeTypeError")]
    #[error("unexpected value of type {found}, expected {expected}")]
    Type {
        expected: Kind,
        found: Kind,
        position: Position,
    },
    #[strum(serialize = "ArityError")]
    #[error("{name} expects {expected} arguments, got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
        position: Position,
    },
    #[strum(serialize = "StackOverflowError")]
    #[error("maximum call depth of {limit} exceeded")]
    StackOverflow { limit: usize, position: Position },
    #[strum(serialize = "NumberFormatError")]
    #[error("{literal} is not a number")]
    InvalidNumber { literal: String, position: Position },
}

impl RuntimeError {
    pub fn position(&self) -> Position {
        match self {
            RuntimeError::Reference { position, .. }
            | RuntimeError::NotCallable { position, .. }
            | RuntimeError::Type { position, .. }
            | RuntimeError::Arity { position, .. }
            | RuntimeError::StackOverflow { position, .. }
            | RuntimeError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// Walks a tree against an environment. Clones share one call-depth counter, so
/// the closures created for user functions count against the same limit.
#[derive(Debug, Clone)]
pub struct Interpreter {
    depth: Rc<Cell<usize>>,
    max_depth: usize,
}

// Leaves one level of call depth when dropped.
struct Frame<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> Drop for Frame<'a> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter::with_max_depth(DEFAULT_MAX_DEPTH)
    }
    pub fn with_max_depth(max_depth: usize) -> Interpreter {
        Interpreter {
            depth: Rc::new(Cell::new(0)),
            max_depth,
        }
    }
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
    /// Scans, parses and runs `source` against `env`.
    pub fn evaluate(&self, source: &str, env: &Environment) -> Result<Value, Error> {
        let tokens = scanner::scan_tokens(source)?;
        let program = parser::parse(&tokens)?;
        Ok(self.run(&program, env)?)
    }
    pub fn run(&self, node: &Node, env: &Environment) -> Result<Value, RuntimeError> {
        match node {
            Node::Program { body, .. } => {
                trace!("Running {} statements", body.len());
                let mut result = Value::Nil;
                for statement in body {
                    result = self.run(statement, env)?;
                }
                Ok(result)
            }
            Node::FunctionDeclaration {
                name, params, body, ..
            } => {
                debug!("Declaring function '{}' with params {:?}", name, params);
                let function = Value::Function(self.make_function(name, params, body, env));
                env.assign(name, function.clone());
                Ok(function)
            }
            Node::VariableAssignment { name, value, .. } => {
                let value = self.run(value, env)?;
                debug!("Defining '{}' as {}", name, value.repr());
                env.assign(name, value);
                Ok(Value::Nil)
            }
            Node::CallExpression {
                name,
                params,
                position,
            } => {
                if name == "if" && params.len() == 3 {
                    self.conditional(params, *position, env)
                } else {
                    self.call(name, params, *position, env)
                }
            }
            Node::Identifier { name, position } => {
                env.get(name).ok_or_else(|| RuntimeError::Reference {
                    name: name.clone(),
                    position: *position,
                })
            }
            Node::NumberLiteral { value, position } => value
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| RuntimeError::InvalidNumber {
                    literal: value.clone(),
                    position: *position,
                }),
            Node::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
        }
    }
    fn call(
        &self,
        name: &str,
        params: &[Node],
        position: Position,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        let mut arguments: Vec<Value> = Vec::new();
        for param in params {
            arguments.push(self.run(param, env)?);
        }
        let function = match env.get(name) {
            None => {
                return Err(RuntimeError::Reference {
                    name: name.to_string(),
                    position,
                })
            }
            Some(Value::Function(function)) => function,
            Some(other) => {
                return Err(RuntimeError::NotCallable {
                    kind: other.kind(),
                    position,
                })
            }
        };
        let _frame = self.enter(position)?;
        trace!("Calling '{}' with {} arguments", name, arguments.len());
        function
            .call(&arguments)
            .map_err(|e| e.at(name, position))
    }
    // Only the chosen branch is evaluated.
    fn conditional(
        &self,
        params: &[Node],
        position: Position,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        let condition = self.run(&params[0], env)?;
        match condition {
            Value::Boolean(true) => self.run(&params[1], env),
            Value::Boolean(false) => self.run(&params[2], env),
            other => Err(RuntimeError::Type {
                expected: Kind::Bool,
                found: other.kind(),
                position,
            }),
        }
    }
    fn enter(&self, position: Position) -> Result<Frame<'_>, RuntimeError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            return Err(RuntimeError::StackOverflow {
                limit: self.max_depth,
                position,
            });
        }
        self.depth.set(depth + 1);
        Ok(Frame { depth: &self.depth })
    }
    fn make_function(
        &self,
        name: &str,
        params: &[String],
        body: &Node,
        closure: &Environment,
    ) -> Function {
        let interpreter = self.clone();
        let params = params.to_vec();
        let body = body.clone();
        let closure = closure.clone();
        Function::new(name, move |arguments| {
            let env = closure.with(params.iter().cloned().zip(arguments.iter().cloned()));
            interpreter.run(&body, &env).map_err(CallError::from)
        })
    }
}

/// Runs `node` against `env` with the default call-depth limit.
pub fn run(node: &Node, env: &Environment) -> Result<Value, RuntimeError> {
    Interpreter::new().run(node, env)
}
