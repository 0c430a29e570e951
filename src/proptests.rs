use proptest::prelude::*;

use crate::poly::{Mono, Poly};

/// Canonical polynomials in up to three variables with small coefficients.
fn poly() -> impl Strategy<Value = Poly> {
    let leaf = (-20i64..20).prop_map(Poly::from_coeff);
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            -20i64..20,
            prop::collection::vec((inner, 0u32..5), 0..4),
        )
            .prop_map(|(c, monos)| {
                let monos = monos.into_iter().map(|(q, e)| Mono::new(q, e)).collect();
                Poly::from_monos(monos) + Poly::from_coeff(c)
            })
    })
}

fn vars() -> Vec<Poly> {
    (0..4).map(Poly::var).collect()
}

proptest! {
    #[test]
    fn generated_polys_are_canonical(p in poly()) {
        p.check_consistency();
    }

    #[test]
    fn additive_group(p in poly(), q in poly(), r in poly()) {
        prop_assert_eq!(&p + &Poly::zero(), p.clone());
        prop_assert!((&p - &p).is_zero());
        prop_assert_eq!(&p + &q, &q + &p);
        prop_assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));

        let s = &p + &q;
        s.check_consistency();
        prop_assert_eq!(&s - &q, p);
    }

    #[test]
    fn multiplicative_laws(p in poly(), q in poly(), r in poly()) {
        prop_assert_eq!(&p * &Poly::one(), p.clone());
        prop_assert!((&p * &Poly::zero()).is_zero());
        prop_assert_eq!(&p * &q, &q * &p);
        prop_assert_eq!(&(&p * &q) * &r, &p * &(&q * &r));

        let lhs = &p * &(&q + &r);
        lhs.check_consistency();
        prop_assert_eq!(lhs, &(&p * &q) + &(&p * &r));
    }

    #[test]
    fn power_laws(p in poly(), a in 0u32..3, b in 0u32..3) {
        prop_assert_eq!(p.pow(0), Poly::one());

        let pa = p.pow(a);
        pa.check_consistency();
        prop_assert_eq!(&pa * &p.pow(b), p.pow(a + b));
        prop_assert_eq!(pa.pow(b), p.pow(a * b));
    }

    #[test]
    fn degree_bounds(p in poly(), q in poly()) {
        prop_assume!(!p.is_zero() && !q.is_zero());
        prop_assert!((&p * &q).degree() <= p.degree() + q.degree());
        prop_assert!((&p + &q).degree() <= p.degree().max(q.degree()));
        prop_assert!(p.degree_by(0) <= p.degree());
    }

    #[test]
    fn compose_with_variables_is_identity(p in poly()) {
        prop_assert_eq!(p.compose(&vars()), p);
    }

    #[test]
    fn compose_agrees_with_at(p in poly(), x in -5i64..5) {
        // substituting a constant for x_0 and keeping the other variables
        // in place matches evaluation followed by a shift back
        let mut subs = vars();
        subs[0] = Poly::from_coeff(x);
        let composed = p.compose(&subs);
        composed.check_consistency();

        let shifted: Vec<Poly> = (1..4).map(Poly::var).collect();
        prop_assert_eq!(composed, p.at(x).compose(&shifted));
    }

    #[test]
    fn print_then_parse(p in poly()) {
        prop_assert_eq!(Poly::parse(&p.to_string()), Ok(p));
    }
}
