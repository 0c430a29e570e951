//! Evaluation and substitution of variables.

use std::slice;

use tracing::{instrument, trace};

use crate::stack::Stack;

use super::{coeff_pow, Coefficient, Mono, Poly};

impl Poly {
    /// Substitute `x` for the outermost variable. The remaining variables
    /// shift down by one.
    pub fn at(&self, x: Coefficient) -> Poly {
        let mut result = Poly::zero();
        for m in &self.terms {
            result += m.coeff.mul_coeff(coeff_pow(x, m.exp));
        }

        result.constant = result.constant.wrapping_add(self.constant);
        result
    }

    /// Substitute `substitutes[i]` for `x_i`. Variables without a
    /// substitute are replaced by zero.
    ///
    /// The traversal keeps its own frame stack, so arbitrarily deep nesting
    /// does not grow the native call stack.
    #[instrument(level = "trace", skip_all, fields(count = substitutes.len()))]
    pub fn compose(&self, substitutes: &[Poly]) -> Poly {
        let mut frames: Stack<ComposeFrame> = Stack::new();
        frames.push(ComposeFrame::new(self));

        loop {
            let depth = frames.len();
            let current = frames.top().current;

            match current {
                Some(m) if depth <= substitutes.len() => {
                    frames.push(ComposeFrame::new(&m.coeff));
                }
                _ => {
                    if current.is_some() {
                        trace!(depth, "Variable without substitute set to zero");
                    }

                    let finished = frames.pop();
                    if frames.is_empty() {
                        return finished.result;
                    }

                    let var = frames.len() - 1;
                    let parent = frames.top_mut();
                    if let Some(m) = parent.current {
                        let power = substitutes[var].pow(m.exp);
                        parent.result += finished.result * &power;
                    }
                    parent.advance();
                }
            }
        }
    }
}

/// The state of substituting into one level of a polynomial.
struct ComposeFrame<'a> {
    /// The substituted constant plus all finished terms.
    result: Poly,
    terms: slice::Iter<'a, Mono>,
    /// The term whose coefficient is being substituted one level down.
    current: Option<&'a Mono>,
}

impl<'a> ComposeFrame<'a> {
    fn new(p: &'a Poly) -> ComposeFrame<'a> {
        let mut terms = p.terms.iter();
        let current = terms.next();
        ComposeFrame {
            result: Poly::from_coeff(p.constant),
            terms,
            current,
        }
    }

    fn advance(&mut self) {
        self.current = self.terms.next();
    }
}
