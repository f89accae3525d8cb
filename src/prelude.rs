use crate::callable::{CallError, Function};
use crate::environment::Environment;
use crate::value::{Kind, Value};
use log::debug;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Where the `print` builtin sends its arguments.
pub trait Printer {
    fn print(&self, values: &[Value]);
}

/// Writes each `print` call to stdout as one space-separated line.
pub struct Stdout;

impl Printer for Stdout {
    fn print(&self, values: &[Value]) {
        let line: Vec<String> = values.iter().map(|value| value.to_string()).collect();
        println!("{}", line.join(" "));
    }
}

/// Records every `print` call instead of writing it anywhere.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    calls: RefCell<Vec<Vec<Value>>>,
}

impl CapturedOutput {
    pub fn new() -> CapturedOutput {
        CapturedOutput::default()
    }
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.borrow().clone()
    }
}

impl Printer for CapturedOutput {
    fn print(&self, values: &[Value]) {
        self.calls.borrow_mut().push(values.to_vec());
    }
}

pub(crate) fn install(env: Environment, printer: Rc<dyn Printer>) -> Environment {
    debug!("Installing prelude");
    env.assign("nil", Value::Nil);
    env.assign("true", Value::Boolean(true));
    env.assign("false", Value::Boolean(false));

    define(&env, "print", move |args| {
        printer.print(args);
        Ok(Value::Nil)
    });
    define(&env, "concat", |args| {
        let mut joined = String::new();
        for arg in args {
            joined.push_str(string(arg)?);
        }
        Ok(Value::String(joined))
    });

    arithmetic(&env, "+", |a, b| a + b);
    arithmetic(&env, "-", |a, b| a - b);
    arithmetic(&env, "*", |a, b| a * b);
    arithmetic(&env, "/", |a, b| a / b);
    arithmetic(&env, "pow", f64::powf);

    comparison(&env, ">", |o| o == Some(Ordering::Greater));
    comparison(&env, "<", |o| o == Some(Ordering::Less));
    comparison(&env, ">=", |o| {
        o == Some(Ordering::Greater) || o == Some(Ordering::Equal)
    });
    comparison(&env, "<=", |o| {
        o == Some(Ordering::Less) || o == Some(Ordering::Equal)
    });
    comparison(&env, "=", |o| o == Some(Ordering::Equal));
    comparison(&env, "!=", |o| o != Some(Ordering::Equal));

    logical(&env, "or", |a, b| a || b);
    logical(&env, "and", |a, b| a && b);
    logical(&env, "xor", |a, b| a ^ b);
    define(&env, "not", |args| {
        let [a] = arity::<1>(args)?;
        Ok(Value::Boolean(!boolean(a)?))
    });

    // The interpreter evaluates `(if c yes no)` lazily; this binding serves
    // every other use, where both branches are already evaluated.
    define(&env, "if", |args| {
        let [condition, yes, no] = arity::<3>(args)?;
        Ok(if boolean(condition)? {
            yes.clone()
        } else {
            no.clone()
        })
    });
    env
}

fn define<F>(env: &Environment, name: &str, call: F)
where
    F: Fn(&[Value]) -> Result<Value, CallError> + 'static,
{
    env.assign(name, Value::Function(Function::new(name, call)));
}

fn arithmetic(env: &Environment, name: &str, op: fn(f64, f64) -> f64) {
    define(env, name, move |args| {
        let [a, b] = arity::<2>(args)?;
        Ok(Value::Number(op(number(a)?, number(b)?)))
    });
}

fn comparison(env: &Environment, name: &str, op: fn(Option<Ordering>) -> bool) {
    define(env, name, move |args| {
        let [a, b] = arity::<2>(args)?;
        match a.compare(b) {
            Ok(ordering) => Ok(Value::Boolean(op(ordering))),
            Err(found) => Err(CallError::WrongType {
                expected: a.kind(),
                found,
            }),
        }
    });
}

fn logical(env: &Environment, name: &str, op: fn(bool, bool) -> bool) {
    define(env, name, move |args| {
        let [a, b] = arity::<2>(args)?;
        Ok(Value::Boolean(op(boolean(a)?, boolean(b)?)))
    });
}

fn arity<const N: usize>(args: &[Value]) -> Result<&[Value; N], CallError> {
    use std::convert::TryInto;
    args.try_into().map_err(|_| CallError::Arity {
        expected: N,
        found: args.len(),
    })
}

fn number(value: &Value) -> Result<f64, CallError> {
    value.as_number().ok_or(CallError::WrongType {
        expected: Kind::Number,
        found: value.kind(),
    })
}

fn string(value: &Value) -> Result<&str, CallError> {
    value.as_str().ok_or(CallError::WrongType {
        expected: Kind::String,
        found: value.kind(),
    })
}

fn boolean(value: &Value) -> Result<bool, CallError> {
    value.as_bool().ok_or(CallError::WrongType {
        expected: Kind::Bool,
        found: value.kind(),
    })
}

#[cfg(test)]
mod prelude_tests {
    use crate::callable::CallError;
    use crate::environment::Environment;
    use crate::prelude::CapturedOutput;
    use crate::value::{Kind, Value};
    use std::rc::Rc;

    fn call(name: &str, args: &[Value]) -> Result<Value, CallError> {
        let env = Environment::prelude(Rc::new(CapturedOutput::new()));
        let function = env.get(name).unwrap();
        function.as_function().unwrap().call(args)
    }

    fn n(x: f64) -> Value {
        Value::Number(x)
    }

    fn s(x: &str) -> Value {
        Value::String(x.to_string())
    }

    #[test]
    fn print_goes_to_the_printer() {
        let output = Rc::new(CapturedOutput::new());
        let env = Environment::prelude(output.clone());
        let print = env.get("print").unwrap();
        let result = print.as_function().unwrap().call(&[n(2.0), s("x")]);
        assert_eq!(result, Ok(Value::Nil));
        assert_eq!(output.calls(), vec![vec![n(2.0), s("x")]]);
    }

    #[test]
    fn concat() {
        assert_eq!(
            call("concat", &[s("hello"), s(", "), s("world"), s("!")]),
            Ok(s("hello, world!"))
        );
        assert_eq!(call("concat", &[]), Ok(s("")));
        assert_eq!(
            call("concat", &[s("a"), n(1.0)]),
            Err(CallError::WrongType {
                expected: Kind::String,
                found: Kind::Number
            })
        );
    }

    #[test]
    fn numeric_operators() {
        assert_eq!(call("+", &[n(1.0), n(1.0)]), Ok(n(2.0)));
        assert_eq!(call("-", &[n(1.0), n(1.0)]), Ok(n(0.0)));
        assert_eq!(call("*", &[n(10.0), n(10.0)]), Ok(n(100.0)));
        assert_eq!(call("/", &[n(10.0), n(4.0)]), Ok(n(2.5)));
        assert_eq!(call("pow", &[n(10.0), n(2.0)]), Ok(n(100.0)));
        assert_eq!(
            call("+", &[n(1.0), s("1")]),
            Err(CallError::WrongType {
                expected: Kind::Number,
                found: Kind::String
            })
        );
        assert_eq!(
            call("+", &[n(1.0)]),
            Err(CallError::Arity {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(call(">", &[n(1.0), n(0.0)]), Ok(Value::Boolean(true)));
        assert_eq!(call("<", &[n(1.0), n(0.0)]), Ok(Value::Boolean(false)));
        assert_eq!(call(">=", &[n(1.0), n(1.0)]), Ok(Value::Boolean(true)));
        assert_eq!(call("<=", &[n(1.0), n(0.0)]), Ok(Value::Boolean(false)));
        assert_eq!(call("=", &[n(1.0), n(0.0)]), Ok(Value::Boolean(false)));
        assert_eq!(call("!=", &[n(1.0), n(0.0)]), Ok(Value::Boolean(true)));
        assert_eq!(call("=", &[s("a"), s("a")]), Ok(Value::Boolean(true)));
        assert_eq!(call("<", &[s("a"), s("b")]), Ok(Value::Boolean(true)));
        assert_eq!(
            call("=", &[Value::Nil, Value::Nil]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            call("=", &[n(1.0), s("1")]),
            Err(CallError::WrongType {
                expected: Kind::Number,
                found: Kind::String
            })
        );
    }

    #[test]
    fn boolean_operators() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(call("or", &[t.clone(), f.clone()]), Ok(t.clone()));
        assert_eq!(call("and", &[t.clone(), f.clone()]), Ok(f.clone()));
        assert_eq!(call("xor", &[t.clone(), t.clone()]), Ok(f.clone()));
        assert_eq!(call("not", &[f.clone()]), Ok(t.clone()));
        assert_eq!(
            call("not", &[n(0.0)]),
            Err(CallError::WrongType {
                expected: Kind::Bool,
                found: Kind::Number
            })
        );
    }

    #[test]
    fn eager_if() {
        assert_eq!(
            call("if", &[Value::Boolean(true), n(1.0), n(2.0)]),
            Ok(n(1.0))
        );
        assert_eq!(
            call("if", &[Value::Boolean(false), n(1.0), n(2.0)]),
            Ok(n(2.0))
        );
        assert_eq!(
            call("if", &[Value::Nil, n(1.0), n(2.0)]),
            Err(CallError::WrongType {
                expected: Kind::Bool,
                found: Kind::Nil
            })
        );
    }
}
