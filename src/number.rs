//! Readers for decimal literals with an exact bound check.
//!
//! The magnitude of a literal is compared against the decimal digits of its
//! bound, most significant digit first, before any value is built. No
//! intermediate value can therefore overflow the target width.

use std::io::Read;

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    error::{ParseError, Position},
    input::InputStream,
    poly::{Coefficient, Exponent},
};

const I64_MAX_DIGITS: &[u8] = b"9223372036854775807";
const I64_MIN_DIGITS: &[u8] = b"9223372036854775808";
const U32_MAX_DIGITS: &[u8] = b"4294967295";
const I32_MAX_DIGITS: &[u8] = b"2147483647";

/// The exponent bound, equal to `i32::MAX`.
pub const MAX_EXPONENT: Exponent = i32::MAX as Exponent;

type DigitBuffer = SmallVec<[u8; 20]>;

/// The raw text of a literal, before any bound check.
struct Literal {
    negative: bool,
    digits: DigitBuffer,
    /// Position of the first digit.
    start: Position,
}

impl Literal {
    /// Read an optional `-` and at most `max_digits` decimal digits.
    fn read<R: Read>(stream: &mut InputStream<R>, allow_sign: bool, max_digits: usize) -> Literal {
        let mut negative = false;
        if allow_sign && stream.peek() == Some(b'-') {
            negative = true;
            stream.read();
        }

        let start = stream.position();
        let mut digits = DigitBuffer::new();
        while digits.len() < max_digits {
            match stream.peek() {
                Some(c) if c.is_ascii_digit() => {
                    digits.push(c - b'0');
                    stream.read();
                }
                _ => break,
            }
        }

        Literal {
            negative,
            digits,
            start,
        }
    }

    /// Check if the magnitude exceeds `bound`, given as ASCII digits, most
    /// significant first.
    fn exceeds(&self, bound: &[u8]) -> bool {
        if self.digits.len() < bound.len() {
            return false;
        }

        for (d, b) in self.digits.iter().zip(bound) {
            let b = b - b'0';
            if *d != b {
                return *d > b;
            }
        }

        false
    }

    /// Position of the last digit read. Out-of-bound errors are reported here.
    fn last_digit(&self) -> Position {
        Position::new(self.start.line, self.start.column + self.digits.len() - 1)
    }

    /// Build the value. The literal must have passed the `i64` bound check.
    fn to_i64(&self) -> Coefficient {
        // accumulate negative values downwards so that `i64::MIN` is reachable
        self.digits.iter().fold(0, |acc: Coefficient, d| {
            if self.negative {
                acc * 10 - *d as Coefficient
            } else {
                acc * 10 + *d as Coefficient
            }
        })
    }

    /// Build the value. The literal must have passed the `u32` bound check.
    fn to_u32(&self) -> u32 {
        self.digits.iter().fold(0, |acc: u32, d| acc * 10 + *d as u32)
    }
}

#[inline]
fn is_digit(c: Option<u8>) -> bool {
    matches!(c, Some(c) if c.is_ascii_digit())
}

/// Discard the rest of the line and return `err`.
fn fail<R: Read, T>(stream: &mut InputStream<R>, err: ParseError) -> Result<T, ParseError> {
    debug!("Rejected numeric literal: {}", err);
    stream.skip_line();
    Err(err)
}

/// Read a signed literal bounded by the `i64` range, stopping at the first
/// non-digit, and validate the character that follows against `terminators`.
/// `on_error` maps the position of a failure to the error to report.
fn read_signed<R: Read>(
    stream: &mut InputStream<R>,
    terminators: &[u8],
    on_error: impl Fn(Position, bool) -> ParseError,
) -> Result<Coefficient, ParseError> {
    let lit = Literal::read(stream, true, I64_MAX_DIGITS.len());

    if lit.digits.is_empty() {
        let pos = stream.position();
        return fail(stream, on_error(pos, false));
    }

    let next = stream.peek();
    if is_digit(next) {
        let pos = stream.position();
        return fail(stream, on_error(pos, true));
    }

    if !matches!(next, Some(c) if terminators.contains(&c)) {
        let pos = stream.position();
        return fail(stream, on_error(pos, false));
    }

    let bound = if lit.negative {
        I64_MIN_DIGITS
    } else {
        I64_MAX_DIGITS
    };
    if lit.exceeds(bound) {
        return fail(stream, on_error(lit.last_digit(), true));
    }

    Ok(lit.to_i64())
}

/// Read a polynomial coefficient in `[i64::MIN, i64::MAX]`.
///
/// The coefficient must be followed by `,` or a newline, which is left in the
/// stream.
pub fn read_coefficient<R: Read>(stream: &mut InputStream<R>) -> Result<Coefficient, ParseError> {
    read_signed(stream, b",\n", |pos, out_of_bounds| {
        if out_of_bounds {
            ParseError::OutOfBounds(pos)
        } else {
            ParseError::Syntax(pos)
        }
    })
}

/// Read the argument of an evaluation command, in `[i64::MIN, i64::MAX]`,
/// and the newline that must follow it.
pub fn read_at_argument<R: Read>(stream: &mut InputStream<R>) -> Result<Coefficient, ParseError> {
    let line = stream.line();
    let value = read_signed(stream, b"\n", |_, _| ParseError::WrongValue(line))?;
    stream.read();
    Ok(value)
}

/// Read an unsigned command argument in `[0, u32::MAX]` and the newline that
/// must follow it. `on_error` builds the diagnostic from the line number.
pub fn read_unsigned_argument<R: Read>(
    stream: &mut InputStream<R>,
    on_error: fn(usize) -> ParseError,
) -> Result<u32, ParseError> {
    let line = stream.line();
    let lit = Literal::read(stream, false, U32_MAX_DIGITS.len());

    if lit.digits.is_empty()
        || stream.peek() != Some(b'\n')
        || lit.exceeds(U32_MAX_DIGITS)
    {
        return fail(stream, on_error(line));
    }

    stream.read();
    Ok(lit.to_u32())
}

/// Read a monomial exponent in `[0, MAX_EXPONENT]`.
///
/// A negative sign is rejected, except for the literal `-0` which reads as 0.
/// The character after the exponent is left in the stream.
pub fn read_exponent<R: Read>(stream: &mut InputStream<R>) -> Result<Exponent, ParseError> {
    let lit = Literal::read(stream, true, I32_MAX_DIGITS.len());

    if lit.negative && lit.digits[..] != [0u8] {
        return fail(stream, ParseError::NegativeExponent(lit.start));
    }

    if lit.digits.is_empty() {
        let pos = stream.position();
        return fail(stream, ParseError::Syntax(pos));
    }

    if lit.exceeds(I32_MAX_DIGITS) {
        return fail(stream, ParseError::OutOfBounds(lit.last_digit()));
    }

    // a surplus digit is reported where it stands
    if is_digit(stream.peek()) {
        let pos = stream.position();
        return fail(stream, ParseError::OutOfBounds(pos));
    }

    Ok(lit.to_u32())
}
