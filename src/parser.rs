//! A reader for the textual polynomial format.
//!
//! A polynomial literal is either a coefficient or a sum of monomials,
//! followed by a newline:
//!
//! ```text
//! poly := coeff | mono ('+' mono)*
//! mono := '(' poly ',' exp ')'
//! ```
//!
//! The coefficient of a monomial is a polynomial in the next variable. Nested
//! monomials are tracked on an explicit stack of accumulators. The nesting
//! depth is capped at [`MAX_NESTING_DEPTH`], since the arithmetic, printing
//! and dropping of a polynomial recurse once per level.

use std::{io::Read, str::FromStr};

use tracing::debug;

use crate::{
    error::ParseError,
    input::InputStream,
    number::{read_coefficient, read_exponent},
    poly::{Mono, Poly},
    stack::Stack,
};

/// The deepest accepted monomial nesting. Opening one more monomial is
/// reported at the position of its `(`.
pub const MAX_NESTING_DEPTH: usize = 1000;

#[inline]
fn starts_coefficient(c: Option<u8>) -> bool {
    matches!(c, Some(b'-' | b'0'..=b'9'))
}

#[inline]
fn starts_polynomial(c: Option<u8>) -> bool {
    starts_coefficient(c) || c == Some(b'(')
}

/// Report a syntax error at the next character and discard the rest of the line.
fn syntax_error<R: Read>(stream: &mut InputStream<R>) -> ParseError {
    let err = ParseError::Syntax(stream.position());
    debug!("Rejected polynomial literal: {}", err);
    stream.skip_line();
    err
}

#[inline]
fn expect<R: Read>(stream: &mut InputStream<R>, ok: bool) -> Result<(), ParseError> {
    if ok {
        Ok(())
    } else {
        Err(syntax_error(stream))
    }
}

/// Read one polynomial literal and its terminating newline.
///
/// On failure the rest of the offending line has been consumed and the
/// error carries the position of the first offending character.
pub fn read_polynomial<R: Read>(stream: &mut InputStream<R>) -> Result<Poly, ParseError> {
    let mut accumulators: Stack<Vec<Mono>> = Stack::new();
    accumulators.push(vec![]);

    // set after a '+', when only a new monomial may follow
    let mut expecting_mono = false;

    let first = stream.peek();
    expect(stream, starts_polynomial(first))?;

    loop {
        match stream.peek() {
            Some(b'\n') => break,
            Some(b'(') => {
                // the bottom accumulator is the top level, not a monomial
                if accumulators.len() > MAX_NESTING_DEPTH {
                    let err = ParseError::TooDeep(stream.position());
                    debug!("Rejected polynomial literal: {}", err);
                    stream.skip_line();
                    return Err(err);
                }

                stream.read();
                accumulators.push(vec![]);
                expecting_mono = false;

                let next = stream.peek();
                expect(stream, starts_polynomial(next))?;
            }
            c if starts_coefficient(c) && !expecting_mono => {
                let coeff = read_coefficient(stream)?;
                if coeff != 0 {
                    accumulators
                        .top_mut()
                        .push(Mono::new(Poly::from_coeff(coeff), 0));
                }
            }
            Some(b',') if !expecting_mono && accumulators.len() > 1 => {
                stream.read();
                let exp = read_exponent(stream)?;

                let coeff = Poly::from_monos(accumulators.pop());
                if !coeff.is_zero() {
                    accumulators.top_mut().push(Mono::new(coeff, exp));
                }

                let close = stream.peek();
                expect(stream, close == Some(b')'))?;
                stream.read();

                if stream.peek() == Some(b'+') {
                    stream.read();
                    expecting_mono = true;
                } else {
                    let next = stream.peek();
                    expect(stream, matches!(next, Some(b'\n' | b',')))?;
                }
            }
            _ => return Err(syntax_error(stream)),
        }
    }

    expect(stream, accumulators.len() == 1 && !expecting_mono)?;
    stream.read();

    Ok(Poly::from_monos(accumulators.pop()))
}

impl Poly {
    /// Parse a polynomial literal. The trailing newline is optional.
    pub fn parse(input: &str) -> Result<Poly, ParseError> {
        let mut text = String::with_capacity(input.len() + 1);
        text.push_str(input);
        if !input.ends_with('\n') {
            text.push('\n');
        }

        let mut stream = InputStream::new(text.as_bytes());
        let p = read_polynomial(&mut stream)?;

        if !stream.is_at_end() {
            return Err(ParseError::Syntax(stream.position()));
        }

        Ok(p)
    }
}

impl FromStr for Poly {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Poly, ParseError> {
        Poly::parse(s)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::{ParseError, Position},
        input::InputStream,
        poly::{Mono, Poly},
    };

    use super::{read_polynomial, MAX_NESTING_DEPTH};

    fn err_at(s: &str, line: usize, column: usize) {
        assert_eq!(
            Poly::parse(s),
            Err(ParseError::Syntax(Position::new(line, column))),
            "input: {:?}",
            s
        );
    }

    #[test]
    fn coefficients() {
        assert_eq!(Poly::parse("0"), Ok(Poly::zero()));
        assert_eq!(Poly::parse("-12\n"), Ok(Poly::from_coeff(-12)));
        assert_eq!(
            Poly::parse("-9223372036854775808"),
            Ok(Poly::from_coeff(i64::MIN))
        );
    }

    #[test]
    fn monomials() {
        let p: Poly = "(1,2)+(3,0)".parse().unwrap();
        assert_eq!(
            p,
            Poly::from_monos(vec![
                Mono::new(Poly::from_coeff(3), 0),
                Mono::new(Poly::from_coeff(1), 2)
            ])
        );

        // equal exponents merge and cancel
        assert_eq!(Poly::parse("(1,2)+(-1,2)"), Ok(Poly::zero()));
        assert_eq!(Poly::parse("(0,5)"), Ok(Poly::zero()));
        assert_eq!(Poly::parse("(2,1)+(2,1)"), Poly::parse("(4,1)"));
        assert_eq!(Poly::parse("(7,-0)"), Ok(Poly::from_coeff(7)));
    }

    #[test]
    fn nested() {
        let p = Poly::parse("((1,2)+(3,0),1)+((1,1),0)").unwrap();
        p.check_consistency();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.degree_by(0), 1);
        assert_eq!(p.degree_by(1), 2);
    }

    #[test]
    fn syntax_errors() {
        err_at("", 1, 1);
        err_at("+", 1, 1);
        err_at("x", 1, 1);
        err_at("(", 1, 2);
        err_at("(,1)", 1, 2);
        err_at("(1,2", 1, 5);
        err_at("(1,2)+", 1, 7);
        err_at("(1,2)(3,4)", 1, 6);
        err_at("(1,2),", 1, 6);
        err_at("(1,2)+3", 1, 7);
        err_at("((1,2)", 1, 7);
        err_at("1+1", 1, 2);
        err_at("(1,2) ", 1, 6);
        err_at("(1(2,3),4)", 1, 3);
    }

    #[test]
    fn bound_errors() {
        assert_eq!(
            Poly::parse("(1,-1)"),
            Err(ParseError::NegativeExponent(Position::new(1, 5)))
        );
        assert_eq!(
            Poly::parse("(1,2147483648)"),
            Err(ParseError::OutOfBounds(Position::new(1, 13)))
        );
        assert_eq!(
            Poly::parse("(9223372036854775808,1)"),
            Err(ParseError::OutOfBounds(Position::new(1, 20)))
        );
    }

    #[test]
    fn missing_newline_at_end_of_input() {
        let mut s = InputStream::new("(1,2)".as_bytes());
        assert_eq!(
            read_polynomial(&mut s),
            Err(ParseError::Syntax(Position::new(1, 6)))
        );
    }

    #[test]
    fn recovers_on_next_line() {
        let mut s = InputStream::new("(1,2\n(3,4)\n".as_bytes());
        assert_eq!(
            read_polynomial(&mut s),
            Err(ParseError::Syntax(Position::new(1, 5)))
        );
        assert_eq!(read_polynomial(&mut s), Poly::parse("(3,4)"));
        assert!(s.is_at_end());
    }

    fn nested_literal(depth: usize) -> String {
        let mut text = "(".repeat(depth);
        text.push('1');
        text.push_str(&",1)".repeat(depth));
        text
    }

    #[test]
    fn deep_nesting() {
        let depth = MAX_NESTING_DEPTH;
        let p = Poly::parse(&nested_literal(depth)).unwrap();
        assert_eq!(p.degree(), depth as i64);
        assert_eq!(p.degree_by(depth as u32 - 1), 1);
        assert_eq!(p.degree_by(depth as u32), 0);
    }

    #[test]
    fn too_deep() {
        let text = nested_literal(300_000) + "\n(1,1)\n";
        let mut s = InputStream::new(text.as_bytes());
        assert_eq!(
            read_polynomial(&mut s),
            Err(ParseError::TooDeep(Position::new(1, MAX_NESTING_DEPTH + 1)))
        );

        // the rest of the line is discarded
        assert_eq!(read_polynomial(&mut s), Ok(Poly::var(0)));
        assert!(s.is_at_end());

        assert_eq!(
            Poly::parse(&nested_literal(MAX_NESTING_DEPTH + 1)),
            Err(ParseError::TooDeep(Position::new(1, MAX_NESTING_DEPTH + 1)))
        );
    }
}
