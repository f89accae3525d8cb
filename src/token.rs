use crate::position::Position;
use num_enum::TryFromPrimitive;
use std::convert::TryFrom;
use std::fmt;
use strum_macros::{Display, EnumString};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Operator {
    #[strum(serialize = "+")]  Plus,
    #[strum(serialize = "-")]  Minus,
    #[strum(serialize = "*")]  Star,
    #[strum(serialize = "/")]  Slash,
    #[strum(serialize = ">")]  Greater,
    #[strum(serialize = "<")]  Less,
    #[strum(serialize = ">=")] GreaterEqual,
    #[strum(serialize = "<=")] LessEqual,
    #[strum(serialize = "=")]  Equal,
    #[strum(serialize = "!=")] BangEqual,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Paren {
    LeftParen    = 0x28, // (
    RightParen   = 0x29, // )
    LeftBracket  = 0x5b, // [
    RightBracket = 0x5d, // ]
}

impl Paren {
    pub fn from_char(c: char) -> Option<Paren> {
        u8::try_from(c)
            .ok()
            .and_then(|byte| Paren::try_from(byte).ok())
    }
    pub fn is_opening(self) -> bool {
        match self {
            Paren::LeftParen | Paren::LeftBracket => true,
            Paren::RightParen | Paren::RightBracket => false,
        }
    }
    pub fn as_char(self) -> char {
        self as u8 as char
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Keyword {
    #[strum(serialize = "def")]
    Def,
    #[strum(serialize = "fn")]
    Fn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals. Numbers keep their digits until evaluation.
    Number(String),
    String(String),
    Identifier(String),

    Operator(Operator),
    Paren(Paren),
    Keyword(Keyword),

    Newline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    #[strum(serialize = "NUMBER")]
    Number,
    #[strum(serialize = "STRING")]
    String,
    #[strum(serialize = "IDENTIFIER")]
    Identifier,
    #[strum(serialize = "OPERATOR")]
    Operator,
    #[strum(serialize = "PAREN")]
    Paren,
    #[strum(serialize = "KEYWORD")]
    Keyword,
    #[strum(serialize = "NEWLINE")]
    Newline,
}

impl TokenType {
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenType::Number(_) => TokenKind::Number,
            TokenType::String(_) => TokenKind::String,
            TokenType::Identifier(_) => TokenKind::Identifier,
            TokenType::Operator(_) => TokenKind::Operator,
            TokenType::Paren(_) => TokenKind::Paren,
            TokenType::Keyword(_) => TokenKind::Keyword,
            TokenType::Newline => TokenKind::Newline,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Number(x) | TokenType::Identifier(x) => write!(f, "{} {}", self.kind(), x),
            TokenType::String(x) => write!(f, "{} \"{}\"", self.kind(), x),
            TokenType::Operator(x) => write!(f, "{} {}", self.kind(), x),
            TokenType::Paren(x) => write!(f, "{} {}", self.kind(), x.as_char()),
            TokenType::Keyword(x) => write!(f, "{} {}", self.kind(), x),
            TokenType::Newline => write!(f, "{}", self.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tokentype: TokenType,
    pub position: Position,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokentype)
    }
}
