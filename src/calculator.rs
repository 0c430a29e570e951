//! The stack calculator.
//!
//! Input is processed line by line. A line starting with a letter or `_` is a
//! command, any other line is a polynomial literal that is pushed onto the
//! stack. Results are written to the output stream, one per line, and
//! diagnostics of the form `ERROR <line> ...` to the error stream. A failed
//! line never changes the stack.

use std::{
    fmt,
    io::{self, Read, Write},
};

use ahash::{HashMap, HashMapExt};
use smartstring::{LazyCompact, SmartString};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    error::ParseError,
    input::InputStream,
    number::{read_at_argument, read_unsigned_argument},
    parser::read_polynomial,
    poly::{Coefficient, Poly},
    stack::Stack,
};

/// The longest accepted command keyword.
const MAX_COMMAND_LENGTH: usize = 10;

/// An error raised while processing one input line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("ERROR {0} WRONG COMMAND")]
    WrongCommand(usize),
    #[error("ERROR {0} STACK UNDERFLOW")]
    StackUnderflow(usize),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The command names, without their arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Keyword {
    Zero,
    IsCoeff,
    IsZero,
    Clone,
    Add,
    Mul,
    Neg,
    Sub,
    IsEq,
    Deg,
    DegBy,
    At,
    Print,
    Pop,
    Compose,
}

impl Keyword {
    const ALL: [Keyword; 15] = [
        Keyword::Zero,
        Keyword::IsCoeff,
        Keyword::IsZero,
        Keyword::Clone,
        Keyword::Add,
        Keyword::Mul,
        Keyword::Neg,
        Keyword::Sub,
        Keyword::IsEq,
        Keyword::Deg,
        Keyword::DegBy,
        Keyword::At,
        Keyword::Print,
        Keyword::Pop,
        Keyword::Compose,
    ];

    fn name(&self) -> &'static str {
        match self {
            Keyword::Zero => "ZERO",
            Keyword::IsCoeff => "IS_COEFF",
            Keyword::IsZero => "IS_ZERO",
            Keyword::Clone => "CLONE",
            Keyword::Add => "ADD",
            Keyword::Mul => "MUL",
            Keyword::Neg => "NEG",
            Keyword::Sub => "SUB",
            Keyword::IsEq => "IS_EQ",
            Keyword::Deg => "DEG",
            Keyword::DegBy => "DEG_BY",
            Keyword::At => "AT",
            Keyword::Print => "PRINT",
            Keyword::Pop => "POP",
            Keyword::Compose => "COMPOSE",
        }
    }
}

/// A fully read command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Zero,
    IsCoeff,
    IsZero,
    Clone,
    Add,
    Mul,
    Neg,
    Sub,
    IsEq,
    Deg,
    DegBy(u32),
    At(Coefficient),
    Print,
    Pop,
    Compose(u32),
}

impl Command {
    /// The number of polynomials that must be on the stack.
    pub fn operands(&self) -> u64 {
        match self {
            Command::Zero => 0,
            Command::Add | Command::Mul | Command::Sub | Command::IsEq => 2,
            Command::Compose(k) => *k as u64 + 1,
            _ => 1,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Zero => f.write_str("ZERO"),
            Command::IsCoeff => f.write_str("IS_COEFF"),
            Command::IsZero => f.write_str("IS_ZERO"),
            Command::Clone => f.write_str("CLONE"),
            Command::Add => f.write_str("ADD"),
            Command::Mul => f.write_str("MUL"),
            Command::Neg => f.write_str("NEG"),
            Command::Sub => f.write_str("SUB"),
            Command::IsEq => f.write_str("IS_EQ"),
            Command::Deg => f.write_str("DEG"),
            Command::DegBy(v) => write!(f, "DEG_BY {}", v),
            Command::At(x) => write!(f, "AT {}", x),
            Command::Print => f.write_str("PRINT"),
            Command::Pop => f.write_str("POP"),
            Command::Compose(k) => write!(f, "COMPOSE {}", k),
        }
    }
}

/// The output of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A predicate result, printed as `0` or `1`.
    Flag(bool),
    Degree(i64),
    Poly(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Response::Flag(b) => write!(f, "{}", *b as u8),
            Response::Degree(d) => write!(f, "{}", d),
            Response::Poly(s) => f.write_str(s),
        }
    }
}

#[inline]
fn starts_command(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// An argument must be separated from its keyword by a single space.
fn argument_follows(
    terminator: Option<u8>,
    line: usize,
    on_error: fn(usize) -> ParseError,
) -> Result<(), CommandError> {
    if terminator == Some(b' ') {
        Ok(())
    } else {
        Err(on_error(line).into())
    }
}

/// A stack of polynomials driven by a line-oriented command language.
pub struct Calculator {
    stack: Stack<Poly>,
    keywords: HashMap<&'static str, Keyword>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Calculator {
        let mut keywords = HashMap::with_capacity(Keyword::ALL.len());
        for k in Keyword::ALL {
            keywords.insert(k.name(), k);
        }

        Calculator {
            stack: Stack::new(),
            keywords,
        }
    }

    /// The operand stack.
    pub fn stack(&self) -> &Stack<Poly> {
        &self.stack
    }

    /// Process `input` until it is exhausted. Only failures to write to
    /// `out` or `err` are returned; invalid input is reported on `err`.
    pub fn run<R: Read, O: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        let mut stream = InputStream::new(input);

        while let Some(c) = stream.peek() {
            let result = if starts_command(c) {
                self.process_command(&mut stream)
            } else {
                self.process_literal(&mut stream).map(|()| None)
            };

            match result {
                Ok(Some(response)) => writeln!(out, "{}", response)?,
                Ok(None) => {}
                Err(e) => writeln!(err, "{}", e)?,
            }
        }

        Ok(())
    }

    fn process_literal<R: Read>(&mut self, stream: &mut InputStream<R>) -> Result<(), CommandError> {
        let p = read_polynomial(stream)?;
        trace!(stack = self.stack.len() + 1, "Pushing {}", p);
        self.stack.push(p);
        Ok(())
    }

    fn process_command<R: Read>(
        &mut self,
        stream: &mut InputStream<R>,
    ) -> Result<Option<Response>, CommandError> {
        let line = stream.line();
        let command = self.read_command(stream)?;
        self.execute(command, line)
    }

    /// Read a command keyword, its argument and the terminating newline.
    fn read_command<R: Read>(&self, stream: &mut InputStream<R>) -> Result<Command, CommandError> {
        let line = stream.line();
        let mut name: SmartString<LazyCompact> = SmartString::new();

        let terminator = loop {
            match stream.read() {
                None => break None,
                Some(c @ (b' ' | b'\n')) => break Some(c),
                Some(c) => {
                    if name.len() >= MAX_COMMAND_LENGTH || !starts_command(c) {
                        debug!("Rejected command on line {}", line);
                        stream.skip_line();
                        return Err(CommandError::WrongCommand(line));
                    }
                    name.push(c as char);
                }
            }
        };

        let Some(keyword) = self.keywords.get(name.as_str()).copied() else {
            debug!("Unknown command {} on line {}", name, line);
            if terminator == Some(b' ') {
                stream.skip_line();
            }
            return Err(CommandError::WrongCommand(line));
        };

        let command = match keyword {
            Keyword::Zero => Command::Zero,
            Keyword::IsCoeff => Command::IsCoeff,
            Keyword::IsZero => Command::IsZero,
            Keyword::Clone => Command::Clone,
            Keyword::Add => Command::Add,
            Keyword::Mul => Command::Mul,
            Keyword::Neg => Command::Neg,
            Keyword::Sub => Command::Sub,
            Keyword::IsEq => Command::IsEq,
            Keyword::Deg => Command::Deg,
            Keyword::Print => Command::Print,
            Keyword::Pop => Command::Pop,
            Keyword::DegBy => {
                argument_follows(terminator, line, ParseError::WrongVariable)?;
                let var = read_unsigned_argument(stream, ParseError::WrongVariable)?;
                return Ok(Command::DegBy(var));
            }
            Keyword::At => {
                argument_follows(terminator, line, ParseError::WrongValue)?;
                return Ok(Command::At(read_at_argument(stream)?));
            }
            Keyword::Compose => {
                argument_follows(terminator, line, ParseError::WrongCount)?;
                let count = read_unsigned_argument(stream, ParseError::WrongCount)?;
                return Ok(Command::Compose(count));
            }
        };

        match terminator {
            Some(b'\n') => Ok(command),
            t => {
                if t == Some(b' ') {
                    stream.skip_line();
                }
                Err(CommandError::WrongCommand(line))
            }
        }
    }

    /// Apply a command to the stack. `line` is used in diagnostics.
    pub fn execute(
        &mut self,
        command: Command,
        line: usize,
    ) -> Result<Option<Response>, CommandError> {
        if (self.stack.len() as u64) < command.operands() {
            debug!(
                "{} needs {} operands, stack holds {}",
                command,
                command.operands(),
                self.stack.len()
            );
            return Err(CommandError::StackUnderflow(line));
        }

        trace!(line, stack = self.stack.len(), "Executing {}", command);

        let response = match command {
            Command::Zero => {
                self.stack.push(Poly::zero());
                None
            }
            Command::IsCoeff => Some(Response::Flag(self.stack.top().is_coeff())),
            Command::IsZero => Some(Response::Flag(self.stack.top().is_zero())),
            Command::Clone => {
                let p = self.stack.top().clone();
                self.stack.push(p);
                None
            }
            Command::Add => {
                let q = self.stack.pop();
                let p = self.stack.pop();
                self.stack.push(p + q);
                None
            }
            Command::Mul => {
                let q = self.stack.pop();
                let p = self.stack.pop();
                self.stack.push(&p * &q);
                None
            }
            Command::Neg => {
                let p = self.stack.pop();
                self.stack.push(-p);
                None
            }
            Command::Sub => {
                let p = self.stack.pop();
                let q = self.stack.pop();
                self.stack.push(p - q);
                None
            }
            Command::IsEq => Some(Response::Flag(self.stack.top() == self.stack.peek_second())),
            Command::Deg => Some(Response::Degree(self.stack.top().degree())),
            Command::DegBy(var) => Some(Response::Degree(self.stack.top().degree_by(var))),
            Command::At(x) => {
                let p = self.stack.pop();
                self.stack.push(p.at(x));
                None
            }
            Command::Print => Some(Response::Poly(self.stack.top().to_string())),
            Command::Pop => {
                self.stack.pop();
                None
            }
            Command::Compose(k) => {
                let p = self.stack.pop();
                let substitutes: Vec<Poly> = (0..k).map(|_| self.stack.pop()).collect();
                self.stack.push(p.compose(&substitutes));
                None
            }
        };

        Ok(response)
    }
}
