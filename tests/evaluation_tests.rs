#![cfg(feature = "dev")]
//! Tests for standard errors and confidence intervals.
//!
//! ## Test Organization
//!
//! 1. **Standard Errors** - Delta-method and null standard errors
//! 2. **Intervals** - Fisher-z intervals and their accessors

use approx::assert_relative_eq;
use core::f64::consts::PI;

use tetrachoric_rs::internals::evaluation::intervals::{ConfidenceInterval, fisher_interval};
use tetrachoric_rs::internals::evaluation::standard_error::{
    null_standard_error, standard_error,
};
use tetrachoric_rs::internals::primitives::table::FourFoldTable;

const R_50_10_10_30: f64 = 0.796_341_351_937;

// ============================================================================
// Standard Error Tests
// ============================================================================

#[test]
fn test_standard_error_reference_table() {
    let t = FourFoldTable::new(50, 10, 10, 30);
    let se = standard_error(&t, R_50_10_10_30).unwrap();
    assert_relative_eq!(se, 0.078_296_684, epsilon = 1e-8);
    assert_relative_eq!(null_standard_error(&t), 0.160_792_651, epsilon = 1e-8);
}

#[test]
fn test_standard_error_negative_correlation() {
    let t = FourFoldTable::new(10, 30, 20, 5);
    let se = standard_error(&t, -0.755_968_679_6).unwrap();
    assert_relative_eq!(se, 0.108_915_830, epsilon = 1e-8);
    assert_relative_eq!(null_standard_error(&t), 0.198_246_774, epsilon = 1e-8);
}

/// At r = 0 with balanced margins both errors equal π/2 · 1/√n.
#[test]
fn test_standard_error_independence() {
    let t = FourFoldTable::new(25, 25, 25, 25);
    let se = standard_error(&t, 0.0).unwrap();
    assert_relative_eq!(se, PI / 20.0, epsilon = 1e-12);
    assert_relative_eq!(null_standard_error(&t), PI / 20.0, epsilon = 1e-12);

    // Scaling n by 20 divides the error by √20.
    let big = FourFoldTable::new(500, 500, 500, 500);
    assert_relative_eq!(null_standard_error(&big), PI / 20.0 / 20f64.sqrt(), epsilon = 1e-12);
}

/// No finite standard error exists on the boundary.
#[test]
fn test_standard_error_boundary() {
    let t = FourFoldTable::new(7, 0, 0, 3);
    assert_eq!(standard_error(&t, 1.0), None);
    assert_eq!(standard_error(&t, -1.0), None);
    assert!(null_standard_error(&t).is_finite());
}

// ============================================================================
// Interval Tests
// ============================================================================

#[test]
fn test_fisher_interval_levels() {
    let se = 0.078_296_684;
    let cases = [
        (0.90, 0.627_026_871, 0.893_810_476),
        (0.95, 0.584_362_612, 0.906_583_460),
        (0.99, 0.490_907_637, 0.927_445_518),
    ];

    for (level, lower, upper) in cases {
        let ci = fisher_interval(R_50_10_10_30, se, level).unwrap();
        assert_relative_eq!(ci.lower, lower, epsilon = 1e-7);
        assert_relative_eq!(ci.upper, upper, epsilon = 1e-7);
        assert_eq!(ci.level, level);
        assert!(ci.contains(R_50_10_10_30));
    }
}

/// Intervals are asymmetric on the r scale and stay inside (-1, 1).
#[test]
fn test_fisher_interval_bounds() {
    let ci = fisher_interval(0.98, 0.05, 0.99).unwrap();
    assert!(ci.lower > -1.0 && ci.upper < 1.0);
    assert!(ci.upper - 0.98 < 0.98 - ci.lower);

    let sym = fisher_interval(0.0, 0.1, 0.95).unwrap();
    assert_relative_eq!(sym.lower, -sym.upper, epsilon = 1e-15);
}

#[test]
fn test_fisher_interval_undefined() {
    assert_eq!(fisher_interval(1.0, 0.1, 0.95), None);
    assert_eq!(fisher_interval(-1.0, 0.1, 0.95), None);
    assert_eq!(fisher_interval(0.5, f64::NAN, 0.95), None);
}

#[test]
fn test_confidence_interval_accessors() {
    let ci = ConfidenceInterval {
        lower: 0.2,
        upper: 0.7,
        level: 0.9,
    };
    assert_relative_eq!(ci.width(), 0.5);
    assert!(ci.contains(0.2));
    assert!(ci.contains(0.7));
    assert!(!ci.contains(0.71));
}
