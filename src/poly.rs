//! Sparse multivariate polynomials with exact integer coefficients.
//!
//! A polynomial is stored recursively: a scalar constant plus a list of terms
//! `coefficient * x^exponent`, where `x` is the polynomial's own variable and
//! every coefficient is itself a polynomial in the next variable. Variables
//! have no names; the nesting depth is the variable index.

pub mod arithmetic;
pub mod evaluate;
pub mod polynomial;

/// The coefficient type. Arithmetic wraps on overflow.
pub type Coefficient = i64;
/// The exponent type. Exponent sums wrap on overflow.
pub type Exponent = u32;

pub use self::arithmetic::coeff_pow;
pub use self::polynomial::{Mono, Poly};
