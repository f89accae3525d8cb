use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::position::Position;
use crate::scanner::ScanError;
use std::fmt;

/// An error that points at a place in the source text.
pub trait SourceError: fmt::Display {
    fn position(&self) -> Position;
    fn kind_name(&self) -> &str;

    /// The offending source line, then a caret under the failing column
    /// followed by the kind name and message.
    fn with_source(&self, source: &str) -> String {
        let position = self.position();
        let line = source.split('\n').nth(position.line).unwrap_or("");
        format!(
            "{}\n{}^ {}: {}",
            line,
            " ".repeat(position.column),
            self.kind_name(),
            self
        )
    }
}

impl SourceError for ScanError {
    fn position(&self) -> Position {
        ScanError::position(self)
    }
    fn kind_name(&self) -> &str {
        self.as_ref()
    }
}

impl SourceError for ParseError {
    fn position(&self) -> Position {
        ParseError::position(self)
    }
    fn kind_name(&self) -> &str {
        self.as_ref()
    }
}

impl SourceError for RuntimeError {
    fn position(&self) -> Position {
        RuntimeError::position(self)
    }
    fn kind_name(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl SourceError for Error {
    fn position(&self) -> Position {
        match self {
            Error::Scan(e) => e.position(),
            Error::Parse(e) => e.position(),
            Error::Runtime(e) => e.position(),
        }
    }
    fn kind_name(&self) -> &str {
        match self {
            Error::Scan(e) => e.as_ref(),
            Error::Parse(e) => e.as_ref(),
            Error::Runtime(e) => e.as_ref(),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::{Error, SourceError};
    use crate::interpreter::RuntimeError;
    use crate::parser::ParseError;
    use crate::position::Position;
    use crate::scanner::ScanError;

    fn reference(column: usize, line: usize) -> RuntimeError {
        RuntimeError::Reference {
            name: "x".to_string(),
            position: Position::new(0, column, line),
        }
    }

    #[test]
    fn single_line_of_source() {
        assert_eq!(
            reference(0, 0).with_source("single line source"),
            "single line source\n^ ReferenceError: x is not defined"
        );
        assert_eq!(
            reference(7, 0).with_source("single line source"),
            "single line source\n       ^ ReferenceError: x is not defined"
        );
    }

    #[test]
    fn multiple_lines_of_source() {
        assert_eq!(
            reference(0, 1).with_source("first line\nsecond line"),
            "second line\n^ ReferenceError: x is not defined"
        );
        assert_eq!(
            reference(7, 1).with_source("first line\nsecond line"),
            "second line\n       ^ ReferenceError: x is not defined"
        );
    }

    #[test]
    fn kind_names() {
        let scan = ScanError::UnexpectedChar {
            ch: '$',
            position: Position::new(11, 11, 0),
        };
        assert_eq!(
            scan.with_source("(def thing $)"),
            "(def thing $)\n           ^ LexError: unexpected char $"
        );
        let end = Error::from(ScanError::UnexpectedEndOfInput {
            position: Position::new(2, 2, 0),
        });
        assert_eq!(end.kind_name(), "UnexpectedEndOfInput");
        let parse = Error::from(ParseError::UnexpectedEndOfInput {
            position: Position::default(),
        });
        assert_eq!(parse.kind_name(), "UnexpectedEndOfInput");
        assert_eq!(Error::from(reference(0, 0)).kind_name(), "ReferenceError");
    }

    #[test]
    fn position_past_the_last_line() {
        let err = ScanError::UnexpectedEndOfInput {
            position: Position::new(4, 0, 1),
        };
        assert_eq!(
            err.with_source("(x\n"),
            "\n^ UnexpectedEndOfInput: unexpected end of input"
        );
    }
}
