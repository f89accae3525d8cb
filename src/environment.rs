use crate::prelude::{self, Printer};
use crate::shared_list::SharedList;
use crate::value::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A chain of binding frames. Lookups walk from the innermost frame outwards;
/// `with` adds a frame without touching the parent, `assign` writes into the
/// innermost frame only.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: SharedList<BTreeMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            frames: SharedList::new().push(BTreeMap::new()),
        }
    }
    /// The root environment holding the built-in constants and functions.
    pub fn prelude(printer: Rc<dyn Printer>) -> Environment {
        prelude::install(Environment::new(), printer)
    }
    pub fn with<I>(&self, bindings: I) -> Environment
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Environment {
            frames: self.frames.push(bindings.into_iter().collect()),
        }
    }
    pub fn get(&self, name: &str) -> Option<Value> {
        self.frames.find_map(|frame| frame.get(name).cloned())
    }
    pub fn contains(&self, name: &str) -> bool {
        self.frames.find_map(|frame| frame.get(name).map(|_| ())).is_some()
    }
    pub fn assign(&self, name: &str, value: Value) {
        if let Some(mut frame) = self.frames.peek_mut() {
            frame.insert(name.to_string(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Environment {
        Environment::new()
    }
}

#[cfg(test)]
mod environment_tests {
    use crate::environment::Environment;
    use crate::prelude::CapturedOutput;
    use crate::value::Value;
    use std::rc::Rc;

    #[test]
    fn assign_and_get() {
        let env = Environment::new();
        assert_eq!(env.get("x"), None);
        env.assign("x", Value::Number(1.0));
        assert_eq!(env.get("x"), Some(Value::Number(1.0)));
        env.assign("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn with_leaves_the_parent_alone() {
        let parent = Environment::new();
        let child = parent.with(vec![("x".to_string(), Value::Number(1.0))]);
        assert_eq!(child.get("x"), Some(Value::Number(1.0)));
        assert_eq!(parent.get("x"), None);
        assert!(!parent.contains("x"));
    }

    #[test]
    fn new_bindings_shadow_old_ones() {
        let parent = Environment::new();
        parent.assign("x", Value::Number(1.0));
        parent.assign("y", Value::Number(2.0));
        let child = parent.with(vec![("x".to_string(), Value::String("a".to_string()))]);
        assert_eq!(child.get("x"), Some(Value::String("a".to_string())));
        assert_eq!(child.get("y"), Some(Value::Number(2.0)));
        assert_eq!(parent.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_writes_the_innermost_frame() {
        let parent = Environment::new();
        let child = parent.with(Vec::new());
        child.assign("z", Value::Boolean(true));
        assert!(child.contains("z"));
        assert!(!parent.contains("z"));
    }

    #[test]
    fn children_see_later_parent_assignments() {
        let parent = Environment::new();
        let child = parent.with(Vec::new());
        parent.assign("late", Value::Nil);
        assert_eq!(child.get("late"), Some(Value::Nil));
    }

    #[test]
    fn prelude_constants() {
        let env = Environment::prelude(Rc::new(CapturedOutput::new()));
        assert_eq!(env.get("nil"), Some(Value::Nil));
        assert_eq!(env.get("true"), Some(Value::Boolean(true)));
        assert_eq!(env.get("false"), Some(Value::Boolean(false)));
        for name in &["print", "concat", "+", "-", "*", "/", "pow", "if", "not", "!="] {
            assert!(env.contains(name), "missing builtin {}", name);
        }
    }
}
