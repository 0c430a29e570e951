//! Canonical textual output of polynomials.
//!
//! The output is itself a valid literal: a constant polynomial prints as its
//! value, and any other polynomial prints as its monomials `(coeff,exp)` in
//! increasing exponent order, joined by `+`. The scalar constant is printed as
//! part of the exponent-0 monomial, so it appears as `(c,0)` when no such
//! monomial exists.

use std::fmt::{self, Write};

use crate::poly::{Coefficient, Poly};

impl Poly {
    /// Print the polynomial with `carried` added to its constant.
    fn fmt_with_constant(&self, f: &mut fmt::Formatter, carried: Coefficient) -> fmt::Result {
        let constant = carried.wrapping_add(self.constant);
        if self.is_coeff() {
            return write!(f, "{}", constant);
        }

        if constant != 0 && self.terms[0].exp != 0 {
            write!(f, "({},0)+", constant)?;
        }

        for (i, m) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_char('+')?;
            }

            f.write_char('(')?;
            m.coeff
                .fmt_with_constant(f, if m.exp == 0 { constant } else { 0 })?;
            write!(f, ",{})", m.exp)?;
        }

        Ok(())
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with_constant(f, 0)
    }
}
