//! Ring operations on [`Poly`].
//!
//! All coefficient arithmetic wraps modulo 2^64, so the operations form a
//! ring over `Z/2^64` and never panic.

use std::{
    cmp::Ordering,
    mem,
    ops::{Add, AddAssign, Mul, Neg, Sub},
};

use super::{Coefficient, Exponent, Mono, Poly};

/// Compute `x^n` with wrapping multiplication.
pub fn coeff_pow(mut x: Coefficient, mut n: Exponent) -> Coefficient {
    let mut result: Coefficient = 1;
    while n != 0 {
        if n % 2 == 1 {
            result = result.wrapping_mul(x);
        }
        n /= 2;
        x = x.wrapping_mul(x);
    }
    result
}

impl Poly {
    /// Multiply every coefficient by the scalar `c`.
    pub fn mul_coeff(&self, c: Coefficient) -> Poly {
        if c == 0 {
            return Poly::zero();
        }

        let terms = self
            .terms
            .iter()
            .filter_map(|m| {
                let coeff = m.coeff.mul_coeff(c);
                if coeff.is_zero() {
                    None
                } else {
                    Some(Mono::new(coeff, m.exp))
                }
            })
            .collect();

        Poly {
            constant: self.constant.wrapping_mul(c),
            terms,
        }
    }

    fn negate(&mut self) {
        self.constant = self.constant.wrapping_neg();
        for m in &mut self.terms {
            m.coeff.negate();
        }
    }

    /// Compute `self^n` using repeated squaring.
    pub fn pow(&self, mut n: Exponent) -> Poly {
        if self.is_coeff() {
            return Poly::from_coeff(coeff_pow(self.constant, n));
        }

        let mut x = self.clone();
        let mut result = Poly::one();
        while n != 0 {
            if n % 2 == 1 {
                result = &result * &x;
            }
            n /= 2;
            if n != 0 {
                x = &x * &x;
            }
        }
        result
    }
}

impl AddAssign<Poly> for Poly {
    fn add_assign(&mut self, other: Poly) {
        self.constant = self.constant.wrapping_add(other.constant);
        if other.terms.is_empty() {
            return;
        }
        if self.terms.is_empty() {
            self.terms = other.terms;
            return;
        }

        let lhs = mem::take(&mut self.terms);
        let mut merged = Vec::with_capacity(lhs.len() + other.terms.len());
        let mut lhs = lhs.into_iter();
        let mut rhs = other.terms.into_iter();
        let mut a = lhs.next();
        let mut b = rhs.next();

        loop {
            match (a.take(), b.take()) {
                (Some(mut l), Some(r)) => match l.exp.cmp(&r.exp) {
                    Ordering::Less => {
                        merged.push(l);
                        a = lhs.next();
                        b = Some(r);
                    }
                    Ordering::Greater => {
                        merged.push(r);
                        a = Some(l);
                        b = rhs.next();
                    }
                    Ordering::Equal => {
                        l.coeff += r.coeff;
                        merged.push(l);
                        a = lhs.next();
                        b = rhs.next();
                    }
                },
                (Some(l), None) => {
                    merged.push(l);
                    merged.extend(lhs.by_ref());
                    break;
                }
                (None, Some(r)) => {
                    merged.push(r);
                    merged.extend(rhs.by_ref());
                    break;
                }
                (None, None) => break,
            }
        }

        self.terms = merged;
        self.normalize();
    }
}

impl<'a> AddAssign<&'a Poly> for Poly {
    fn add_assign(&mut self, other: &'a Poly) {
        *self += other.clone();
    }
}

impl Add<Poly> for Poly {
    type Output = Poly;

    fn add(mut self, other: Poly) -> Poly {
        self += other;
        self
    }
}

impl<'a> Add<&'a Poly> for Poly {
    type Output = Poly;

    fn add(mut self, other: &'a Poly) -> Poly {
        self += other;
        self
    }
}

impl<'a, 'b> Add<&'a Poly> for &'b Poly {
    type Output = Poly;

    fn add(self, other: &'a Poly) -> Poly {
        self.clone() + other
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(mut self) -> Poly {
        self.negate();
        self
    }
}

impl<'a> Neg for &'a Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        -self.clone()
    }
}

impl Sub<Poly> for Poly {
    type Output = Poly;

    fn sub(self, other: Poly) -> Poly {
        self + (-other)
    }
}

impl<'a, 'b> Sub<&'a Poly> for &'b Poly {
    type Output = Poly;

    fn sub(self, other: &'a Poly) -> Poly {
        self.clone() + (-other)
    }
}

impl<'a, 'b> Mul<&'a Poly> for &'b Poly {
    type Output = Poly;

    fn mul(self, other: &'a Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        if other.is_coeff() {
            return self.mul_coeff(other.constant);
        }
        if self.is_coeff() {
            return other.mul_coeff(self.constant);
        }

        let mut monos = Vec::with_capacity(
            self.terms.len() * other.terms.len() + self.terms.len() + other.terms.len(),
        );

        for a in &self.terms {
            for b in &other.terms {
                monos.push(Mono::new(&a.coeff * &b.coeff, a.exp.wrapping_add(b.exp)));
            }
        }

        // cross terms with the scalar constants
        if other.constant != 0 {
            for a in &self.terms {
                monos.push(Mono::new(a.coeff.mul_coeff(other.constant), a.exp));
            }
        }
        if self.constant != 0 {
            for b in &other.terms {
                monos.push(Mono::new(b.coeff.mul_coeff(self.constant), b.exp));
            }
        }

        let mut result = Poly::from_monos(monos);
        result.constant = result
            .constant
            .wrapping_add(self.constant.wrapping_mul(other.constant));
        result
    }
}

impl<'a> Mul<&'a Poly> for Poly {
    type Output = Poly;

    fn mul(self, other: &'a Poly) -> Poly {
        &self * other
    }
}

impl Mul<Poly> for Poly {
    type Output = Poly;

    fn mul(self, other: Poly) -> Poly {
        &self * &other
    }
}
