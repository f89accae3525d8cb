use crate::position::{Cursor, Position};
use crate::token::{Keyword, Operator, Paren, Token, TokenType};
use log::trace;
use phf::phf_map;
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use strum_macros::AsRefStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, AsRefStr)]
pub enum ScanError {
    #[strum(serialize = "LexError")]
    #[error("unexpected char {ch}")]
    UnexpectedChar { ch: char, position: Position },
    #[strum(serialize = "UnexpectedEndOfInput")]
    #[error("unexpected end of input")]
    UnexpectedEndOfInput { position: Position },
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            ScanError::UnexpectedChar { position, .. }
            | ScanError::UnexpectedEndOfInput { position } => *position,
        }
    }
}

struct Scanner<'a> {
    iter: Peekable<Chars<'a>>,
    cursor: Cursor,
    open_parens: usize,
}

pub fn scan_tokens(source: &str) -> Result<Vec<Token>, ScanError> {
    trace!("Scanning {:?}", source);
    let mut scanner = Scanner {
        iter: source.chars().peekable(),
        cursor: Cursor::new(),
        open_parens: 0,
    };
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(&c) = scanner.iter.peek() {
        let start = scanner.cursor.snapshot();
        if let Some(tokentype) = scanner.scan_token(c, start)? {
            tokens.push(Token {
                tokentype,
                position: start,
            });
        }
    }
    if scanner.open_parens > 0 {
        return Err(ScanError::UnexpectedEndOfInput {
            position: scanner.cursor.snapshot(),
        });
    }
    trace!("Scanned {} tokens", tokens.len());
    Ok(tokens)
}

impl<'a> Scanner<'a> {
    fn scan_token(&mut self, c: char, start: Position) -> Result<Option<TokenType>, ScanError> {
        match c {
            '\n' => {
                self.advance();
                Ok(Some(TokenType::Newline))
            }
            c if c.is_whitespace() => {
                self.advance();
                Ok(None)
            }
            '0'..='9' => Ok(Some(TokenType::Number(
                self.take_while(|c| c.is_ascii_digit()),
            ))),
            'a'..='z' | 'A'..='Z' => Ok(Some(self.identifier())),
            '"' | '\'' => Ok(Some(self.string(c)?)),
            _ => {
                if let Some(paren) = Paren::from_char(c) {
                    return self.paren(paren, start).map(Some);
                }
                match self.operator() {
                    Some(operator) => Ok(Some(TokenType::Operator(operator))),
                    None => Err(ScanError::UnexpectedChar {
                        ch: c,
                        position: start,
                    }),
                }
            }
        }
    }
    fn advance(&mut self) -> Option<char> {
        let c = self.iter.next()?;
        self.cursor.advance(c);
        Some(c)
    }
    fn take_while<P: Fn(char) -> bool>(&mut self, predicate: P) -> String {
        let mut value = String::new();
        while let Some(&c) = self.iter.peek() {
            if !predicate(c) {
                break;
            }
            value.push(c);
            self.advance();
        }
        value
    }
    fn paren(&mut self, paren: Paren, start: Position) -> Result<TokenType, ScanError> {
        if paren.is_opening() {
            self.open_parens += 1;
        } else if self.open_parens == 0 {
            return Err(ScanError::UnexpectedChar {
                ch: paren.as_char(),
                position: start,
            });
        } else {
            self.open_parens -= 1;
        }
        self.advance();
        Ok(TokenType::Paren(paren))
    }
    // Longest match first, so ">=" is never split into ">" and "=".
    fn operator(&mut self) -> Option<Operator> {
        let mut lookahead = self.iter.clone();
        let first = lookahead.next()?;
        if let Some(second) = lookahead.next() {
            let pair: String = [first, second].iter().collect();
            if let Ok(operator) = Operator::from_str(&pair) {
                self.advance();
                self.advance();
                return Some(operator);
            }
        }
        let operator = Operator::from_str(&first.to_string()).ok()?;
        self.advance();
        Some(operator)
    }
    fn string(&mut self, quote: char) -> Result<TokenType, ScanError> {
        self.advance();
        let value = self.take_while(|c| c != quote);
        match self.advance() {
            Some(_) => Ok(TokenType::String(value)),
            None => Err(ScanError::UnexpectedEndOfInput {
                position: self.cursor.snapshot(),
            }),
        }
    }
    fn identifier(&mut self) -> TokenType {
        let value = self.take_while(|c| c.is_ascii_alphanumeric());
        match KEYWORDS.get(value.as_str()) {
            None => TokenType::Identifier(value),
            Some(keyword) => TokenType::Keyword(*keyword),
        }
    }
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "def" => Keyword::Def,
    "fn" => Keyword::Fn,
};
