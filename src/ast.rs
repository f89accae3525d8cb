use crate::position::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program {
        body: Vec<Node>,
        position: Position,
    },
    NumberLiteral {
        value: String,
        position: Position,
    },
    StringLiteral {
        value: String,
        position: Position,
    },
    Identifier {
        name: String,
        position: Position,
    },
    CallExpression {
        name: String,
        params: Vec<Node>,
        position: Position,
    },
    VariableAssignment {
        name: String,
        value: Box<Node>,
        position: Position,
    },
    FunctionDeclaration {
        name: String,
        params: Vec<String>,
        body: Box<Node>,
        position: Position,
    },
}

impl Node {
    pub fn position(&self) -> Position {
        match self {
            Node::Program { position, .. }
            | Node::NumberLiteral { position, .. }
            | Node::StringLiteral { position, .. }
            | Node::Identifier { position, .. }
            | Node::CallExpression { position, .. }
            | Node::VariableAssignment { position, .. }
            | Node::FunctionDeclaration { position, .. } => *position,
        }
    }
}

/// Renders a tree back into surface syntax, one top-level form per line.
pub struct AstPrinter {}

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, args: &[Node]) -> String {
        let mut x = String::from("(");
        x.push_str(name);
        for arg in args {
            x.push_str(" ");
            x.push_str(self.print(arg).as_str());
        }
        x.push_str(")");
        x
    }
    pub fn print(&mut self, node: &Node) -> String {
        match node {
            Node::Program { body, .. } => body
                .iter()
                .map(|statement| self.print(statement))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::NumberLiteral { value, .. } => value.clone(),
            Node::StringLiteral { value, .. } => {
                if value.contains('"') {
                    format!("'{}'", value)
                } else {
                    format!("\"{}\"", value)
                }
            }
            Node::Identifier { name, .. } => name.clone(),
            Node::CallExpression { name, params, .. } => self.parenthesize(name, params),
            Node::VariableAssignment { name, value, .. } => {
                format!("(def {} {})", name, self.print(value))
            }
            Node::FunctionDeclaration {
                name, params, body, ..
            } => format!(
                "(fn {} [{}] {})",
                name,
                params.join(" "),
                self.print(body)
            ),
        }
    }
}

#[cfg(test)]
mod ast_tests {
    use crate::ast::{AstPrinter, Node};
    use crate::position::Position;

    fn number(value: &str) -> Node {
        Node::NumberLiteral {
            value: value.to_string(),
            position: Position::default(),
        }
    }

    #[test]
    fn basic_ast_test() {
        let program = Node::Program {
            body: vec![
                Node::FunctionDeclaration {
                    name: "add".to_string(),
                    params: vec!["a".to_string(), "b".to_string()],
                    body: Box::new(Node::CallExpression {
                        name: "+".to_string(),
                        params: vec![
                            Node::Identifier {
                                name: "a".to_string(),
                                position: Position::default(),
                            },
                            Node::Identifier {
                                name: "b".to_string(),
                                position: Position::default(),
                            },
                        ],
                        position: Position::default(),
                    }),
                    position: Position::default(),
                },
                Node::VariableAssignment {
                    name: "x".to_string(),
                    value: Box::new(Node::CallExpression {
                        name: "add".to_string(),
                        params: vec![number("1"), number("2")],
                        position: Position::default(),
                    }),
                    position: Position::default(),
                },
                Node::StringLiteral {
                    value: "say \"hi\"".to_string(),
                    position: Position::default(),
                },
            ],
            position: Position::default(),
        };
        let mut printer = AstPrinter {};
        assert_eq!(
            printer.print(&program),
            "(fn add [a b] (+ a b))\n(def x (add 1 2))\n'say \"hi\"'"
        );
    }

    #[test]
    fn position_of_any_node() {
        let node = Node::Identifier {
            name: "x".to_string(),
            position: Position::new(4, 2, 1),
        };
        assert_eq!(node.position(), Position::new(4, 2, 1));
    }
}
