use thiserror::Error;

/// A location in the input. Both fields are 1-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Position {
        Position { line, column }
    }
}

/// An error raised while reading a polynomial literal or a numeric argument.
///
/// The rest of the offending line has always been consumed by the time an
/// error is returned. The `Display` output is the diagnostic printed by the
/// calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that the literal grammar does not allow at this point.
    #[error("ERROR {} {}", .0.line, .0.column)]
    Syntax(Position),
    /// A coefficient or exponent whose magnitude exceeds its bound.
    #[error("ERROR {} {}", .0.line, .0.column)]
    OutOfBounds(Position),
    /// A negative exponent other than `-0`.
    #[error("ERROR {} {}", .0.line, .0.column)]
    NegativeExponent(Position),
    /// A monomial opened beyond the maximum nesting depth.
    #[error("ERROR {} {}", .0.line, .0.column)]
    TooDeep(Position),
    /// A malformed or out-of-bound `AT` argument.
    #[error("ERROR {0} WRONG VALUE")]
    WrongValue(usize),
    /// A malformed or out-of-bound `DEG_BY` argument.
    #[error("ERROR {0} WRONG VARIABLE")]
    WrongVariable(usize),
    /// A malformed or out-of-bound `COMPOSE` argument.
    #[error("ERROR {0} WRONG COUNT")]
    WrongCount(usize),
}

impl ParseError {
    /// The line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax(p)
            | ParseError::OutOfBounds(p)
            | ParseError::NegativeExponent(p)
            | ParseError::TooDeep(p) => p.line,
            ParseError::WrongValue(l) | ParseError::WrongVariable(l) | ParseError::WrongCount(l) => {
                *l
            }
        }
    }
}
