use crate::interpreter::RuntimeError;
use crate::position::Position;
use crate::value::{Kind, Value};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Failures raised from inside a function body. They have no position of their
/// own; the interpreter attributes them to the call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("unexpected value of type {found}, expected {expected}")]
    WrongType { expected: Kind, found: Kind },
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },
    #[error(transparent)]
    Eval(#[from] RuntimeError),
}

impl CallError {
    pub fn at(self, name: &str, position: Position) -> RuntimeError {
        match self {
            CallError::WrongType { expected, found } => RuntimeError::Type {
                expected,
                found,
                position,
            },
            CallError::Arity { expected, found } => RuntimeError::Arity {
                name: name.to_string(),
                expected,
                found,
                position,
            },
            CallError::Eval(e) => e,
        }
    }
}

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, CallError>;

#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    call: Rc<NativeFn>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

impl Function {
    pub fn new<F>(name: &str, call: F) -> Function
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + 'static,
    {
        Function {
            name: Rc::from(name),
            call: Rc::new(call),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn call(&self, arguments: &[Value]) -> Result<Value, CallError> {
        (self.call)(arguments)
    }
    pub fn equals(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.call, &other.call)
    }
}
