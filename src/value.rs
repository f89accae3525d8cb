use crate::callable::Function;
use std::cmp::Ordering;
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Kind {
    #[strum(serialize = "NUMBER")]
    Number,
    #[strum(serialize = "STRING")]
    String,
    #[strum(serialize = "BOOL")]
    Bool,
    #[strum(serialize = "FUNCTION")]
    Function,
    #[strum(serialize = "NIL")]
    Nil,
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Function(Function),
    Nil,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(x) => write!(f, "{}", x),
            Value::Number(x) => write!(f, "{}", x),
            Value::String(x) => write!(f, "{}", x),
            Value::Function(x) => write!(f, "fn {}", x.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.equals(b),
            (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Boolean(_) => Kind::Bool,
            Value::Function(_) => Kind::Function,
            Value::Nil => Kind::Nil,
        }
    }
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(x) => Some(x),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(x) => Some(*x),
            _ => None,
        }
    }
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(x) => Some(x),
            _ => None,
        }
    }
    /// The REPL rendering: like `Display`, except strings are quoted.
    pub fn repr(&self) -> String {
        match self {
            Value::String(x) => format!("\"{}\"", x),
            _ => self.to_string(),
        }
    }
    /// Orders two values of the same kind. `None` means the values are
    /// unordered (NaN, or two distinct functions); `Err` carries the kind of
    /// `other` when it differs from ours.
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, Kind> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Some(a.cmp(b))),
            (Value::Nil, Value::Nil) => Ok(Some(Ordering::Equal)),
            (Value::Function(a), Value::Function(b)) => {
                Ok(if a.equals(b) { Some(Ordering::Equal) } else { None })
            }
            _ => Err(other.kind()),
        }
    }
}
