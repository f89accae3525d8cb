use crate::ast::Node;
use crate::position::Position;
use crate::token::{Keyword, Paren, Token, TokenType};
use log::trace;
use strum_macros::AsRefStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, AsRefStr)]
pub enum ParseError {
    #[strum(serialize = "ParseError")]
    #[error("unexpected token {token}")]
    UnexpectedToken { token: Token },
    #[strum(serialize = "UnexpectedEndOfInput")]
    #[error("unexpected end of input")]
    UnexpectedEndOfInput { position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedToken { token } => token.position,
            ParseError::UnexpectedEndOfInput { position } => *position,
        }
    }
}

/// Parses a whole token stream into a `Node::Program`.
pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}

pub struct Parser<'a> {
    tokens: Vec<&'a Token>,
    current: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens: tokens
                .iter()
                .filter(|token| token.tokentype != TokenType::Newline)
                .collect(),
            current: 0,
        }
    }
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        trace!("Parsing {} tokens", self.tokens.len());
        let position = self
            .tokens
            .first()
            .map(|token| token.position)
            .unwrap_or_default();
        let mut body: Vec<Node> = Vec::new();
        while !self.is_at_end() {
            body.push(self.walk()?);
        }
        Ok(Node::Program { body, position })
    }
    fn walk(&mut self) -> Result<Node, ParseError> {
        let token = self.peek()?;
        match &token.tokentype {
            TokenType::Number(value) => {
                self.advance();
                Ok(Node::NumberLiteral {
                    value: value.clone(),
                    position: token.position,
                })
            }
            TokenType::String(value) => {
                self.advance();
                Ok(Node::StringLiteral {
                    value: value.clone(),
                    position: token.position,
                })
            }
            TokenType::Identifier(name) => {
                self.advance();
                Ok(Node::Identifier {
                    name: name.clone(),
                    position: token.position,
                })
            }
            TokenType::Paren(Paren::LeftParen) => {
                self.advance();
                self.form()
            }
            _ => Err(self.error(token)),
        }
    }
    // Everything that may follow an opening paren.
    fn form(&mut self) -> Result<Node, ParseError> {
        let token = self.peek()?;
        match &token.tokentype {
            TokenType::Keyword(Keyword::Def) => {
                self.advance();
                self.variable_assignment()
            }
            TokenType::Keyword(Keyword::Fn) => {
                self.advance();
                self.function_declaration()
            }
            TokenType::Identifier(name) => {
                self.advance();
                self.call_expression(name.clone(), token.position)
            }
            TokenType::Operator(operator) => {
                self.advance();
                self.call_expression(operator.to_string(), token.position)
            }
            _ => Err(self.error(token)),
        }
    }
    fn variable_assignment(&mut self) -> Result<Node, ParseError> {
        let (name, position) = self.identifier()?;
        let value = self.walk()?;
        self.consume(Paren::RightParen)?;
        Ok(Node::VariableAssignment {
            name,
            value: Box::new(value),
            position,
        })
    }
    fn function_declaration(&mut self) -> Result<Node, ParseError> {
        let (name, position) = self.identifier()?;
        let mut params: Vec<String> = Vec::new();
        if let TokenType::Paren(Paren::LeftBracket) = self.peek()?.tokentype {
            self.advance();
            loop {
                let token = self.peek()?;
                match &token.tokentype {
                    TokenType::Paren(Paren::RightBracket) => {
                        self.advance();
                        break;
                    }
                    TokenType::Identifier(param) => {
                        self.advance();
                        params.push(param.clone());
                    }
                    _ => return Err(self.error(token)),
                }
            }
        }
        let body = self.walk()?;
        self.consume(Paren::RightParen)?;
        Ok(Node::FunctionDeclaration {
            name,
            params,
            body: Box::new(body),
            position,
        })
    }
    fn call_expression(&mut self, name: String, position: Position) -> Result<Node, ParseError> {
        let mut params: Vec<Node> = Vec::new();
        loop {
            if let TokenType::Paren(Paren::RightParen) = self.peek()?.tokentype {
                self.advance();
                break;
            }
            params.push(self.walk()?);
        }
        Ok(Node::CallExpression {
            name,
            params,
            position,
        })
    }
    fn identifier(&mut self) -> Result<(String, Position), ParseError> {
        let token = self.peek()?;
        match &token.tokentype {
            TokenType::Identifier(name) => {
                self.advance();
                Ok((name.clone(), token.position))
            }
            _ => Err(self.error(token)),
        }
    }
    fn consume(&mut self, expected: Paren) -> Result<(), ParseError> {
        let token = self.peek()?;
        match token.tokentype {
            TokenType::Paren(paren) if paren == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(token)),
        }
    }
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }
    fn peek(&self) -> Result<&'a Token, ParseError> {
        match self.tokens.get(self.current) {
            Some(token) => Ok(*token),
            None => Err(ParseError::UnexpectedEndOfInput {
                position: self
                    .tokens
                    .last()
                    .map(|token| token.position)
                    .unwrap_or_default(),
            }),
        }
    }
    fn error(&self, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            token: token.clone(),
        }
    }
}
