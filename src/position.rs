use std::fmt;

/// An immutable snapshot of where something starts in the source text.
///
/// All three fields count characters, not bytes, and start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub column: usize,
    pub line: usize,
}

impl Position {
    pub fn new(offset: usize, column: usize, line: usize) -> Position {
        Position {
            offset,
            column,
            line,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, column {}]", self.line + 1, self.column + 1)
    }
}

/// The mutable counterpart of `Position`, moved forward one character at a time
/// while scanning.
#[derive(Debug, Default)]
pub struct Cursor {
    current: Position,
}

impl Cursor {
    pub fn new() -> Cursor {
        Cursor::default()
    }
    pub fn advance(&mut self, c: char) {
        self.current.offset += 1;
        if c == '\n' {
            self.current.column = 0;
            self.current.line += 1;
        } else {
            self.current.column += 1;
        }
    }
    pub fn snapshot(&self) -> Position {
        self.current
    }
}
