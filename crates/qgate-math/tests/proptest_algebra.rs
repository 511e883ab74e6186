//! Property-based tests for the unitary algebra.

use proptest::prelude::*;
use qgate_math::Unitary2x2;

const TOL: f64 = 1e-9;

/// Unitaries whose off-diagonal magnitude `sin(θ/2)` stays well away from
/// zero, so the eigenvalues are distinct and the eigenbasis well conditioned.
fn arb_non_degenerate_unitary() -> impl Strategy<Value = Unitary2x2> {
    (0.4_f64..2.7, -3.0_f64..3.0, -3.0_f64..3.0, -1.0_f64..1.0).prop_map(
        |(theta, phi, lambda, gamma)| Unitary2x2::synthesize_with_phase(theta, phi, lambda, gamma),
    )
}

proptest! {
    #[test]
    fn synthesized_matrices_are_unitary(
        theta in -6.0_f64..6.0,
        phi in -6.0_f64..6.0,
        lambda in -6.0_f64..6.0,
    ) {
        prop_assert!(Unitary2x2::synthesize(theta, phi, lambda).is_unitary(TOL));
    }

    #[test]
    fn inverse_of_power_is_negative_power(
        u in arb_non_degenerate_unitary(),
        p in -2.0_f64..2.0,
    ) {
        let lhs = u.power(p).inverse();
        let rhs = u.power(-p);
        prop_assert!(lhs.approx_eq(&rhs, TOL), "lhs={lhs:?} rhs={rhs:?}");
    }

    #[test]
    fn inverse_is_dagger_for_unitaries(u in arb_non_degenerate_unitary()) {
        prop_assert!(u.inverse().approx_eq(&u.dagger(), TOL));
    }

    #[test]
    fn square_root_squares_back(u in arb_non_degenerate_unitary()) {
        let root = u.power(0.5);
        prop_assert!((root * root).approx_eq(&u, TOL));
    }

    #[test]
    fn power_keeps_unitarity(u in arb_non_degenerate_unitary(), p in -3.0_f64..3.0) {
        prop_assert!(u.power(p).is_unitary(1e-8));
    }
}
