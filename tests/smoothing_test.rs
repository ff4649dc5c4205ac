//! Convergence tests for the exponential pointer smoothing

use hand_pointer::smoothing::ExponentialSmoother;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

/// Closed form of k smoothing steps toward a fixed target
fn closed_form(alpha: f64, start: f64, target: f64, k: i32) -> f64 {
    alpha.powi(k) * (start - target) + target
}

#[test]
fn test_matches_closed_form() {
    let alpha = 0.5;
    let start = (100.0, 900.0);
    let target = (740.0, 260.0);
    let mut filter = ExponentialSmoother::new(alpha, start).unwrap();

    for k in 1..=30 {
        let (x, y) = filter.apply(target);
        assert!(
            (x - closed_form(alpha, start.0, target.0, k)).abs() < TOLERANCE,
            "x mismatch at step {k}"
        );
        assert!(
            (y - closed_form(alpha, start.1, target.1, k)).abs() < TOLERANCE,
            "y mismatch at step {k}"
        );
    }
}

#[test]
fn test_settles_on_target() {
    let mut filter = ExponentialSmoother::new(0.7, (0.0, 0.0)).unwrap();
    let mut position = (0.0, 0.0);
    for _ in 0..200 {
        position = filter.apply((1234.0, 567.0));
    }
    assert!((position.0 - 1234.0).abs() < 1e-6);
    assert!((position.1 - 567.0).abs() < 1e-6);
}

proptest! {
    #[test]
    fn prop_closed_form(
        alpha in 0.05f64..0.95,
        start in -2000.0f64..2000.0,
        target in -2000.0f64..2000.0,
        steps in 1i32..40
    ) {
        let mut filter = ExponentialSmoother::new(alpha, (start, start)).unwrap();
        let mut x = start;
        for _ in 0..steps {
            x = filter.apply((target, target)).0;
        }
        let expected = closed_form(alpha, start, target, steps);
        prop_assert!((x - expected).abs() < 1e-6 * (1.0 + start.abs() + target.abs()));
    }

    #[test]
    fn prop_monotone_from_one_side(
        alpha in 0.05f64..0.95,
        start in -2000.0f64..2000.0,
        target in -2000.0f64..2000.0
    ) {
        let mut filter = ExponentialSmoother::new(alpha, (start, start)).unwrap();
        let mut previous = start;
        for _ in 0..50 {
            let x = filter.apply((target, target)).0;
            // Never overshoots and never moves away from the target
            if start <= target {
                prop_assert!(x >= previous - 1e-9 && x <= target + 1e-9);
            } else {
                prop_assert!(x <= previous + 1e-9 && x >= target - 1e-9);
            }
            previous = x;
        }
    }
}
