//! Polycalc is a stack calculator for sparse multivariate polynomials with
//! exact 64-bit integer coefficients.
//!
//! Polynomials can be parsed, combined and printed directly:
//!
//! ```
//! use polycalc::poly::Poly;
//!
//! let p = Poly::parse("(1,1)+(1,0)").unwrap();
//! let sq = &p * &p;
//! assert_eq!(sq.to_string(), "(1,0)+(2,1)+(1,2)");
//! assert_eq!(sq.at(2), Poly::from_coeff(9));
//! ```
//!
//! or driven through the line-oriented command language of the
//! [`Calculator`](calculator::Calculator):
//!
//! ```
//! use polycalc::calculator::Calculator;
//!
//! let mut out = vec![];
//! let mut err = vec![];
//! Calculator::new()
//!     .run("(1,2)+(3,0)\nCLONE\nMUL\nDEG\nPRINT\n".as_bytes(), &mut out, &mut err)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "4\n(9,0)+(6,2)+(1,4)\n");
//! ```

pub mod calculator;
pub mod error;
pub mod input;
pub mod number;
pub mod parser;
pub mod poly;
pub mod printer;
pub mod stack;

#[cfg(test)]
mod proptests;
