#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

use normal_modes::{
    MotionEvaluator, PhysicalParameters, REFERENCE_DISPLACEMENT, TIME_STEP, compute_amplitude,
    displacement_at, solve_modes,
};
use proptest::prelude::*;

/// Any parameter set a host would accept.
fn valid_params() -> impl Strategy<Value = PhysicalParameters> {
    (
        1.0f64..=100.0,
        1.0f64..=100.0,
        1.0f64..=100.0,
        1.0f64..=100.0,
        1.0f64..=100.0,
    )
        .prop_map(|(k1, k2, k3, m1, m2)| PhysicalParameters::new(k1, k2, k3, m1, m2))
}

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

// =============================================================================
// Solver validity over the accepted input window
// =============================================================================

proptest! {
    #[test]
    fn valid_window_never_degenerates(params in valid_params()) {
        let modes = solve_modes(params);
        prop_assert!(modes.is_ok(), "unexpected error {:?} for {:?}", modes, params);
        let modes = modes.unwrap();

        prop_assert!(modes.omega1() > 0.0);
        prop_assert!(modes.omega2() > 0.0);
        prop_assert!(modes.omega1() != modes.omega2());
        prop_assert!(modes.omega1() > modes.omega2());
        prop_assert!(modes.eigen1() != modes.eigen2());
        prop_assert!(compute_amplitude(modes, REFERENCE_DISPLACEMENT).is_ok());
    }

    #[test]
    fn solve_is_deterministic(params in valid_params()) {
        let first = solve_modes(params).unwrap();
        let second = solve_modes(params).unwrap();
        prop_assert_eq!(first.omega1().to_bits(), second.omega1().to_bits());
        prop_assert_eq!(first.omega2().to_bits(), second.omega2().to_bits());
        prop_assert_eq!(first.eigen1().to_bits(), second.eigen1().to_bits());
        prop_assert_eq!(first.eigen2().to_bits(), second.eigen2().to_bits());
    }

    #[test]
    fn modes_are_mass_orthogonal(params in valid_params()) {
        // m1·v1·w1 + m2·1·1 = 0 for the two eigenvectors (v1, 1) and (w1, 1).
        let modes = solve_modes(params).unwrap();
        let product = modes.eigen1() * modes.eigen2();
        prop_assert!(
            rel_close(product, -params.m2() / params.m1(), 1e-9),
            "eigen1·eigen2 = {}, expected {}",
            product,
            -params.m2() / params.m1()
        );
    }

    #[test]
    fn in_phase_mode_is_slower(params in valid_params()) {
        let modes = solve_modes(params).unwrap();
        prop_assert!(modes.eigen1() < 0.0, "fast mode should move masses apart");
        prop_assert!(modes.eigen2() > 0.0, "slow mode should move masses together");
    }
}

// =============================================================================
// Mirror symmetry of the chain
// =============================================================================

proptest! {
    #[test]
    fn mirrored_chain_has_same_frequencies(params in valid_params()) {
        let modes = solve_modes(params).unwrap();
        let mirrored = solve_modes(params.mirrored()).unwrap();

        prop_assert!(rel_close(modes.omega1(), mirrored.omega1(), 1e-12));
        prop_assert!(rel_close(modes.omega2(), mirrored.omega2(), 1e-12));
    }

    #[test]
    fn mirrored_chain_swaps_mass_roles(params in valid_params()) {
        // Mode (v, 1) seen in a mirror is (1, v), i.e. (1/v, 1) after
        // renormalizing the second component.
        let modes = solve_modes(params).unwrap();
        let mirrored = solve_modes(params.mirrored()).unwrap();

        prop_assert!(rel_close(mirrored.eigen1(), 1.0 / modes.eigen1(), 1e-9));
        prop_assert!(rel_close(mirrored.eigen2(), 1.0 / modes.eigen2(), 1e-9));
        prop_assert!(rel_close(
            mirrored.eigen1(),
            -(params.m1() / params.m2()) * modes.eigen2(),
            1e-9
        ));
    }
}

// =============================================================================
// Motion properties
// =============================================================================

proptest! {
    #[test]
    fn motion_starts_at_reference(params in valid_params()) {
        let modes = solve_modes(params).unwrap();
        let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
        let start = displacement_at(&modes, scale, 0.0);

        prop_assert!(rel_close(start.x1, scale.value() * (modes.eigen1() - modes.eigen2()), 1e-12));
        prop_assert!(rel_close(start.x1, REFERENCE_DISPLACEMENT, 1e-12));
        prop_assert_eq!(start.x2, 0.0);
    }

    #[test]
    fn motion_is_even_in_time(params in valid_params(), t in 0.0f64..500.0) {
        let modes = solve_modes(params).unwrap();
        let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
        let forward = displacement_at(&modes, scale, t);
        let backward = displacement_at(&modes, scale, -t);

        prop_assert!((forward.x1 - backward.x1).abs() < 1e-12);
        prop_assert!((forward.x2 - backward.x2).abs() < 1e-12);
    }

    #[test]
    fn motion_conserves_energy(params in valid_params(), t in 0.0f64..200.0) {
        let (k1, k2, k3) = (params.k1(), params.k2(), params.k3());
        let (m1, m2) = (params.m1(), params.m2());
        let modes = solve_modes(params).unwrap();
        let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
        let a = scale.value();
        let (w1, w2) = (modes.omega1(), modes.omega2());

        let pos = displacement_at(&modes, scale, t);
        let v1 =
            -a * modes.eigen1() * w1 * (w1 * t).sin() + a * modes.eigen2() * w2 * (w2 * t).sin();
        let v2 = -a * w1 * (w1 * t).sin() + a * w2 * (w2 * t).sin();

        let kinetic = 0.5 * m1 * v1 * v1 + 0.5 * m2 * v2 * v2;
        let stretch = pos.x2 - pos.x1;
        let potential = 0.5 * k1 * pos.x1 * pos.x1
            + 0.5 * k2 * stretch * stretch
            + 0.5 * k3 * pos.x2 * pos.x2;

        // At t = 0 mass 1 is displaced by one unit and everything is at rest.
        let initial = 0.5 * (k1 + k2);
        prop_assert!(
            rel_close(kinetic + potential, initial, 1e-8),
            "energy drifted: {} vs {}",
            kinetic + potential,
            initial
        );
    }

    #[test]
    fn motion_is_finite(params in valid_params(), steps in 0usize..2000) {
        let modes = solve_modes(params).unwrap();
        let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
        let mut evaluator = MotionEvaluator::new(modes, scale);

        for _ in 0..steps {
            let pair = evaluator.step();
            prop_assert!(pair.x1.is_finite(), "x1 not finite");
            prop_assert!(pair.x2.is_finite(), "x2 not finite");
        }
    }

    #[test]
    fn evaluator_matches_closed_form(params in valid_params(), steps in 1usize..500) {
        let modes = solve_modes(params).unwrap();
        let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
        let mut evaluator = MotionEvaluator::new(modes, scale);

        let last = evaluator.by_ref().take(steps).last().unwrap();
        let expected = displacement_at(&modes, scale, steps as f64 * TIME_STEP);
        prop_assert_eq!(last, expected);
    }
}
