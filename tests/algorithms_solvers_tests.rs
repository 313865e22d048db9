#![cfg(feature = "dev")]
//! Tests for the iterative tetrachoric solvers.
//!
//! Reference values were obtained by root-finding `Φ₂(h, k; r) = a/n` with
//! an independent high-resolution bivariate normal integral.
//!
//! ## Test Organization
//!
//! 1. **Search** - Decimal-place search
//! 2. **Divgi** - Starting value and Newton refinement
//! 3. **Kirk** - TET8 integrals, phases and failure modes
//! 4. **Brown** - Zero-cell classes, exact cases, series and tail regimes

use approx::assert_relative_eq;

use tetrachoric_rs::internals::algorithms::outcome::{SolutionPath, Thresholds};
use tetrachoric_rs::internals::algorithms::{brown, divgi, kirk, search};
use tetrachoric_rs::internals::math::bivariate::{BivariateNormalCdf, GenzBivariateNormal};
use tetrachoric_rs::internals::math::normal;
use tetrachoric_rs::internals::primitives::errors::TetrachoricError;
use tetrachoric_rs::internals::primitives::table::FourFoldTable;

const R_50_10_10_30: f64 = 0.796_341_351_937;

// ============================================================================
// Search Tests
// ============================================================================

/// Search resolves ten decimal places from below.
#[test]
fn test_search_reference_table() {
    let table = FourFoldTable::new(50, 10, 10, 30);
    let outcome = search::solve(&table, &GenzBivariateNormal).unwrap();

    assert_eq!(outcome.path, SolutionPath::DecimalSearch);
    assert!(outcome.r <= R_50_10_10_30);
    assert_relative_eq!(outcome.r, R_50_10_10_30, epsilon = 2e-10);
}

/// Search brackets the target between r and r + 1e-10.
#[test]
fn test_search_brackets_target() {
    let genz = GenzBivariateNormal;
    let table = FourFoldTable::new(10, 30, 20, 5);
    let t = Thresholds::from_table(&table);
    let r = search::solve(&table, &genz).unwrap().r;

    assert!(genz.cdf(t.h, t.k, r) < t.p);
    assert!(genz.cdf(t.h, t.k, r + 1e-10) >= t.p - 1e-15);
    assert_relative_eq!(r, -0.755_968_679_6, epsilon = 1e-9);
}

/// A backend that stops being monotone after the first place trips the cap.
#[test]
fn test_search_step_limit() {
    use std::cell::Cell;

    struct FlipAfterFirst(Cell<usize>);
    impl BivariateNormalCdf for FlipAfterFirst {
        fn cdf(&self, _x: f64, _y: f64, _rho: f64) -> f64 {
            let calls = self.0.get();
            self.0.set(calls + 1);
            if calls == 0 { 1.0 } else { 0.0 }
        }
    }

    let backend = FlipAfterFirst(Cell::new(0));
    let err = search::solve(&FourFoldTable::new(50, 10, 10, 30), &backend).unwrap_err();
    match err {
        TetrachoricError::IterationLimitExceeded {
            method,
            phase,
            limit,
            last,
        } => {
            assert_eq!(method, "search");
            assert_eq!(phase, "decimal place");
            assert_eq!(limit, search::MAX_STEPS_PER_PLACE);
            assert_relative_eq!(last, -0.9, epsilon = 1e-12);
        }
        other => panic!("expected IterationLimitExceeded, got {:?}", other),
    }
    assert_eq!(backend.0.get(), search::MAX_STEPS_PER_PLACE + 2);
}

// ============================================================================
// Divgi Tests
// ============================================================================

/// At h = k = 0 the exponent is 1/2 and r₀ = cos(π / (1 + √OR)).
#[test]
fn test_divgi_starting_value_symmetric_margins() {
    let odds_ratio: f64 = 25.0;
    let expected = (core::f64::consts::PI / (1.0 + odds_ratio.sqrt())).cos();
    assert_relative_eq!(divgi::starting_value(odds_ratio, 0.0, 0.0), expected, epsilon = 1e-15);

    // Independence starts at zero.
    assert_relative_eq!(divgi::starting_value(1.0, 0.7, 0.2), 0.0, epsilon = 1e-12);
}

#[test]
fn test_divgi_reference_tables() {
    let genz = GenzBivariateNormal;
    let cases = [
        ((50, 10, 10, 30), R_50_10_10_30),
        ((10, 30, 20, 5), -0.755_968_680),
        ((90, 2, 3, 5), 0.902_559_004),
        ((1, 20, 30, 400), -0.085_019_610),
        ((40, 5, 3, 60), 0.972_654_717),
    ];

    for ((a, b, c, d), expected) in cases {
        let outcome = divgi::solve(&FourFoldTable::new(a, b, c, d), &genz).unwrap();
        assert_eq!(outcome.path, SolutionPath::Newton);
        assert!(outcome.iterations <= divgi::NEWTON_ITERATIONS);
        assert_relative_eq!(outcome.r, expected, epsilon = 1e-7);
    }
}

/// A backend that never matches the target makes Divgi fail closed.
#[test]
fn test_divgi_fails_closed_on_bad_backend() {
    struct Constant;
    impl BivariateNormalCdf for Constant {
        fn cdf(&self, _x: f64, _y: f64, _rho: f64) -> f64 {
            0.1
        }
    }

    let err = divgi::solve(&FourFoldTable::new(50, 10, 10, 30), &Constant).unwrap_err();
    assert!(matches!(err, TetrachoricError::ConvergenceFailure { method: "divgi", .. }));
}

// ============================================================================
// Kirk Tests
// ============================================================================

/// hEfn1 integrates the normal density from zero.
#[test]
fn test_kirk_hefn1() {
    for &h in &[-1.5, -0.3, 0.0, 0.8, 1.3] {
        assert_relative_eq!(kirk::hefn1(h), normal::cdf(h) - 0.5, epsilon = 1e-10);
    }
}

/// hEfn2 equals 2π·(Φ₂(h, k; r) − Φ(h)Φ(k)) for moderate r.
#[test]
fn test_kirk_hefn2() {
    let genz = GenzBivariateNormal;
    let (h, k) = (0.3, -0.2);
    for &r in &[-0.7, 0.0, 0.5] {
        let expected = 2.0 * core::f64::consts::PI
            * (genz.cdf(h, k, r) - normal::cdf(h) * normal::cdf(k));
        assert_relative_eq!(kirk::hefn2(r, h, k), expected, epsilon = 1e-8);
    }
}

#[test]
fn test_kirk_reference_tables() {
    let cases = [
        ((50, 10, 10, 30), R_50_10_10_30),
        ((10, 30, 20, 5), -0.755_968_680),
        ((1, 20, 30, 400), -0.085_019_610),
        ((40, 5, 3, 60), 0.972_654_717),
    ];

    for ((a, b, c, d), expected) in cases {
        let outcome = kirk::solve(&FourFoldTable::new(a, b, c, d)).unwrap();
        assert_eq!(outcome.path, SolutionPath::QuadratureNewton);
        assert_relative_eq!(outcome.r, expected, epsilon = 1e-3);
    }
}

/// Independence converges to zero without leaving the first step.
#[test]
fn test_kirk_independence() {
    let outcome = kirk::solve(&FourFoldTable::new(25, 25, 25, 25)).unwrap();
    assert_relative_eq!(outcome.r, 0.0, epsilon = 1e-12);
}

/// A near-perfect table escapes (-1, 1) even after the 0.97 reset.
#[test]
fn test_kirk_out_of_range_escape() {
    let err = kirk::solve(&FourFoldTable::new(500, 3, 1, 500)).unwrap_err();
    match err {
        TetrachoricError::OutOfRangeEscape { last } => assert!(last.abs() >= 1.0),
        other => panic!("expected OutOfRangeEscape, got {:?}", other),
    }
}

/// A row proportion of 1e-9 is beyond what the 8-point threshold rule can
/// reach, so the first marginal phase runs out of steps.
#[test]
fn test_kirk_marginal_step_limit() {
    let err = kirk::solve(&FourFoldTable::new(1.0, 1.0, 1e9, 1e9)).unwrap_err();
    match err {
        TetrachoricError::IterationLimitExceeded {
            method,
            phase,
            limit,
            last,
        } => {
            assert_eq!(method, "kirk");
            assert_eq!(phase, "marginal 1");
            assert_eq!(limit, kirk::MAX_ITERATIONS);
            assert!(last.is_finite() && last < -4.0);
        }
        other => panic!("expected IterationLimitExceeded, got {:?}", other),
    }
}

// ============================================================================
// Brown Tests
// ============================================================================

#[test]
fn test_brown_zero_cell_classes() {
    use brown::ZeroCells;

    assert_eq!(ZeroCells::classify(&FourFoldTable::new(1, 2, 3, 4)), ZeroCells::None);
    assert_eq!(ZeroCells::classify(&FourFoldTable::new(0, 2, 3, 4)), ZeroCells::Diagonal);
    assert_eq!(ZeroCells::classify(&FourFoldTable::new(1, 2, 0, 4)), ZeroCells::OffDiagonal);
    assert_eq!(ZeroCells::classify(&FourFoldTable::new(0, 0, 3, 4)), ZeroCells::Both);
}

/// Perfect tables resolve without iteration.
#[test]
fn test_brown_perfect_tables() {
    let plus = brown::solve(&FourFoldTable::new(7, 0, 0, 3)).unwrap();
    assert_eq!(plus.r, 1.0);
    assert_eq!(plus.path, SolutionPath::Exact);

    let minus = brown::solve(&FourFoldTable::new(0, 7, 3, 0)).unwrap();
    assert_eq!(minus.r, -1.0);
    assert_eq!(minus.path, SolutionPath::Exact);
}

/// Symmetric tables use the cosine formula; independence gives zero.
#[test]
fn test_brown_exact_cases() {
    let sym = brown::solve(&FourFoldTable::new(5, 1, 1, 5)).unwrap();
    assert_eq!(sym.path, SolutionPath::Exact);
    assert_relative_eq!(sym.r, (core::f64::consts::PI / 6.0).cos(), epsilon = 1e-15);

    let neg = brown::solve(&FourFoldTable::new(1, 5, 5, 1)).unwrap();
    assert_relative_eq!(neg.r, -(core::f64::consts::PI / 6.0).cos(), epsilon = 1e-15);

    let ind = brown::solve(&FourFoldTable::new(25, 25, 25, 25)).unwrap();
    assert_eq!(ind.r, 0.0);
    assert_eq!(ind.path, SolutionPath::Exact);

    let ind2 = brown::solve(&FourFoldTable::new(10, 20, 30, 60)).unwrap();
    assert_eq!(ind2.r, 0.0);
}

#[test]
fn test_brown_series_regime() {
    let outcome = brown::solve(&FourFoldTable::new(50, 10, 10, 30)).unwrap();
    assert_eq!(outcome.path, SolutionPath::Series);
    assert!(outcome.iterations <= brown::MAX_ITERATIONS);
    assert_relative_eq!(outcome.r, R_50_10_10_30, epsilon = 1e-5);

    let negative = brown::solve(&FourFoldTable::new(10, 30, 20, 5)).unwrap();
    assert_eq!(negative.path, SolutionPath::Series);
    assert_relative_eq!(negative.r, -0.755_968_680, epsilon = 1e-5);
}

/// Correlations above 0.95 switch to tail quadrature.
#[test]
fn test_brown_tail_regime() {
    let outcome = brown::solve(&FourFoldTable::new(40, 5, 3, 60)).unwrap();
    assert_eq!(outcome.path, SolutionPath::TailQuadrature);
    assert_relative_eq!(outcome.r, 0.972_654_717, epsilon = 1e-5);

    let outcome = brown::solve(&FourFoldTable::new(200, 1, 1, 3)).unwrap();
    assert_eq!(outcome.path, SolutionPath::TailQuadrature);
    assert_relative_eq!(outcome.r, 0.966_124_195, epsilon = 1e-5);
}

/// A single zero cell is continuity-adjusted rather than forced to ±1.
#[test]
fn test_brown_continuity_adjustment() {
    let off = brown::solve(&FourFoldTable::new(3, 0, 5, 9)).unwrap();
    assert_relative_eq!(off.r, 0.604_792_17, epsilon = 1e-5);

    let diag = brown::solve(&FourFoldTable::new(0, 4, 5, 9)).unwrap();
    assert_relative_eq!(diag.r, -0.371_228_34, epsilon = 1e-5);
}

#[test]
fn test_brown_input_errors() {
    let err = brown::solve(&FourFoldTable::new(0, 0, 3, 4)).unwrap_err();
    assert_eq!(err, TetrachoricError::DegenerateTable { margin: "row 1" });

    let err = brown::solve(&FourFoldTable::new(1.0, -2.0, 3.0, 4.0)).unwrap_err();
    assert_eq!(
        err,
        TetrachoricError::NegativeCount {
            cell: "b",
            value: -2.0
        }
    );

    // The +0.5 shift would drive b below zero.
    // The continuity shift needs 0.5 in each cell it is taken from.
    let err = brown::solve(&FourFoldTable::new(0.0, 0.3, 2.0, 5.0)).unwrap_err();
    assert_eq!(
        err,
        TetrachoricError::InvalidInput(
            "continuity adjustment needs b >= 0.5, got 0.3".to_string()
        )
    );

    let err = brown::solve(&FourFoldTable::new(2.0, 0.0, 5.0, 0.25)).unwrap_err();
    assert_eq!(
        err,
        TetrachoricError::InvalidInput(
            "continuity adjustment needs d >= 0.5, got 0.25".to_string()
        )
    );

    // Fractional cells of at least 0.5 are adjusted as usual.
    let ok = brown::solve(&FourFoldTable::new(0.0, 0.75, 20.0, 50.0)).unwrap();
    assert_eq!(ok.path, SolutionPath::Series);
    assert_relative_eq!(ok.r, 0.369_888_155, epsilon = 1e-5);
}

/// Extreme margins flatten the series; the bracket keeps Newton out of the tail.
#[test]
fn test_brown_extreme_margins() {
    let outcome = brown::solve(&FourFoldTable::new(17_360, 523_935, 1, 1)).unwrap();
    assert_eq!(outcome.path, SolutionPath::Series);
    assert_relative_eq!(outcome.r, -0.394_979_268, epsilon = 1e-5);
}

#[test]
fn test_brown_series_iteration_limit() {
    let table = FourFoldTable::new(50, 10, 10, 30);
    let err = brown::solve_with_limit(&table, 2).unwrap_err();
    match err {
        TetrachoricError::ConvergenceFailure {
            method,
            iterations,
            last,
        } => {
            assert_eq!(method, "brown");
            assert_eq!(iterations, 2);
            assert_relative_eq!(last, R_50_10_10_30, epsilon = 1e-2);
        }
        other => panic!("expected ConvergenceFailure, got {:?}", other),
    }

    assert_eq!(brown::solve_with_limit(&table, brown::MAX_ITERATIONS), brown::solve(&table));
}

/// The tail secant gets its own budget after the series hands over.
#[test]
fn test_brown_tail_iteration_limit() {
    let err = brown::solve_with_limit(&FourFoldTable::new(40, 5, 3, 60), 3).unwrap_err();
    match err {
        TetrachoricError::ConvergenceFailure {
            method,
            iterations,
            last,
        } => {
            assert_eq!(method, "brown");
            // Handed over at the third series step, then three secant steps.
            assert_eq!(iterations, 6);
            assert!(last > brown::SERIES_CUTOFF);
            assert_relative_eq!(last, 0.972_654_717, epsilon = 1e-4);
        }
        other => panic!("expected ConvergenceFailure, got {:?}", other),
    }

    // The reported iterate carries the sign of the original table.
    let err = brown::solve_with_limit(&FourFoldTable::new(5, 40, 60, 3), 3).unwrap_err();
    match err {
        TetrachoricError::ConvergenceFailure { last, .. } => {
            assert_relative_eq!(last, -0.972_654_717, epsilon = 1e-4);
        }
        other => panic!("expected ConvergenceFailure, got {:?}", other),
    }
}

/// The series and its slope agree with the bivariate normal CDF and density.
#[test]
fn test_brown_series_matches_bvn() {
    let genz = GenzBivariateNormal;
    let (h, k, r) = (0.4, -0.3, 0.6);
    let ss = normal::pdf(h) * normal::pdf(k);

    let (sum, slope) = brown::tetrachoric_series(r, h, k);
    assert_relative_eq!(
        sum * ss,
        genz.cdf(h, k, r) - normal::cdf(h) * normal::cdf(k),
        epsilon = 1e-12
    );
    assert_relative_eq!(slope * ss, genz.density(h, k, r), epsilon = 1e-12);

    let (zero_sum, zero_slope) = brown::tetrachoric_series(0.0, h, k);
    assert_eq!(zero_sum, 0.0);
    assert_eq!(zero_slope, 1.0);
}

#[test]
fn test_brown_tail_cdf_matches_bvn() {
    let genz = GenzBivariateNormal;
    for &(h, k, r) in &[(0.2, 0.5, 0.96), (-0.4, 0.1, 0.99), (1.0, 1.0, 0.97)] {
        assert_relative_eq!(brown::tail_cdf(h, k, r), genz.cdf(h, k, r), epsilon = 1e-8);
    }
}
