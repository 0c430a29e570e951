use std::cmp::Ordering;

use super::{Coefficient, Exponent};

/// A term `coeff * x^exp` of a polynomial in the variable `x`. The
/// coefficient is a polynomial in the next variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Mono {
    pub(crate) exp: Exponent,
    pub(crate) coeff: Poly,
}

impl Mono {
    pub fn new(coeff: Poly, exp: Exponent) -> Mono {
        Mono { exp, coeff }
    }

    #[inline]
    pub fn exponent(&self) -> Exponent {
        self.exp
    }

    #[inline]
    pub fn coefficient(&self) -> &Poly {
        &self.coeff
    }
}

/// A sparse multivariate polynomial in canonical form.
///
/// The value is `constant + Σ coeff_i * x^exp_i`. Every public constructor and
/// operation returns a canonical polynomial:
/// - terms are sorted by strictly increasing exponent;
/// - no term has a zero coefficient;
/// - a term of exponent 0 has a non-constant coefficient whose own scalar
///   constant is 0, since that scalar lives in `constant` instead.
///
/// As a consequence `constant` is the value of the polynomial with all
/// variables set to zero, and two polynomials are equal as values exactly when
/// they are structurally equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Poly {
    pub(crate) constant: Coefficient,
    pub(crate) terms: Vec<Mono>,
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub fn zero() -> Poly {
        Poly {
            constant: 0,
            terms: vec![],
        }
    }

    #[inline]
    pub fn one() -> Poly {
        Poly::from_coeff(1)
    }

    /// The constant polynomial `c`.
    #[inline]
    pub fn from_coeff(c: Coefficient) -> Poly {
        Poly {
            constant: c,
            terms: vec![],
        }
    }

    /// The variable `x_idx`, where `x_0` is the outermost variable.
    pub fn var(idx: u32) -> Poly {
        let mut p = Poly {
            constant: 0,
            terms: vec![Mono::new(Poly::one(), 1)],
        };

        for _ in 0..idx {
            p = Poly {
                constant: 0,
                terms: vec![Mono::new(p, 0)],
            };
        }

        p
    }

    /// Build a canonical polynomial from an arbitrary list of monomials.
    /// Monomials may come in any order and may share exponents; their
    /// coefficients must be canonical.
    pub fn from_monos(mut monos: Vec<Mono>) -> Poly {
        if !monos.windows(2).all(|w| w[0].exp <= w[1].exp) {
            monos.sort_by_key(|m| m.exp);
        }

        let mut terms: Vec<Mono> = Vec::with_capacity(monos.len());
        for m in monos {
            match terms.last_mut() {
                Some(last) if last.exp == m.exp => last.coeff += m.coeff,
                _ => terms.push(m),
            }
        }

        let mut p = Poly { constant: 0, terms };
        p.normalize();
        p
    }

    /// Move the scalar part of an exponent-0 term into the constant and
    /// remove terms with a zero coefficient. The terms must be sorted.
    pub(crate) fn normalize(&mut self) {
        if let Some(first) = self.terms.first_mut() {
            if first.exp == 0 {
                self.constant = self.constant.wrapping_add(first.coeff.constant);
                first.coeff.constant = 0;
            }
        }

        self.terms.retain(|m| !m.coeff.is_zero());
    }

    /// The value of the polynomial at the origin.
    #[inline]
    pub fn constant(&self) -> Coefficient {
        self.constant
    }

    #[inline]
    pub fn terms(&self) -> &[Mono] {
        &self.terms
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.constant == 0 && self.terms.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.constant == 1 && self.terms.is_empty()
    }

    /// Check if the polynomial does not depend on any variable.
    #[inline]
    pub fn is_coeff(&self) -> bool {
        self.terms.is_empty()
    }

    /// The total degree, or -1 for the zero polynomial.
    pub fn degree(&self) -> i64 {
        if self.is_zero() {
            return -1;
        }

        let mut deg = if self.constant != 0 { 0 } else { -1 };
        for m in &self.terms {
            deg = deg.max(m.coeff.degree() + m.exp as i64);
        }
        deg
    }

    /// The degree in `x_var`, or -1 for the zero polynomial.
    pub fn degree_by(&self, var: u32) -> i64 {
        if self.is_zero() {
            return -1;
        }

        if var == 0 {
            return self.terms.last().map(|m| m.exp as i64).unwrap_or(0);
        }

        self.terms
            .iter()
            .map(|m| m.coeff.degree_by(var - 1))
            .fold(0, i64::max)
    }

    /// Check that the polynomial is canonical. Panics otherwise.
    pub fn check_consistency(&self) {
        for w in self.terms.windows(2) {
            match w[0].exp.cmp(&w[1].exp) {
                Ordering::Less => {}
                Ordering::Equal => panic!("Inconsistent polynomial (equal exponents): {}", self),
                Ordering::Greater => {
                    panic!("Inconsistent polynomial (wrong exponent ordering): {}", self)
                }
            }
        }

        for m in &self.terms {
            if m.coeff.is_zero() {
                panic!("Inconsistent polynomial (0 coefficient): {}", self);
            }

            if m.exp == 0 && (m.coeff.is_coeff() || m.coeff.constant != 0) {
                panic!("Inconsistent polynomial (unhoisted constant): {}", self);
            }

            m.coeff.check_consistency();
        }
    }
}

impl From<Coefficient> for Poly {
    fn from(c: Coefficient) -> Poly {
        Poly::from_coeff(c)
    }
}
