//! Closed-form tetrachoric approximations and 2x2 association coefficients.
//!
//! ## Purpose
//!
//! Non-iterative estimates of the tetrachoric correlation built from the odds
//! ratio, plus Yule's coefficients (Yule's Y seeds the AS 116 solver).
//!
//! ## Design notes
//!
//! * Odds-ratio powers return `±1` directly when one cross product vanishes
//!   instead of evaluating `0/0` or `∞/∞`.
//! * Bonett–Price adds ½ to every cell, so it is finite for any valid table.
//!
//! ## Key concepts
//!
//! ```text
//! Yule Q         (ad − bc) / (ad + bc)
//! Yule Y         (√ad − √bc) / (√ad + √bc)
//! cosine (Q4)    cos(π / (1 + √OR))
//! OR power       (OR^e − 1) / (OR^e + 1),  e = π/4 (Edwards), 3/4 (Digby), 13/40 (Becker–Clogg)
//! Bonett–Price   cos(π / (1 + ω)),  ω = ((a+½)(d+½) / ((b+½)(c+½)))^ĉ
//! ```

// External dependencies
use core::f64::consts::{FRAC_PI_4, PI};

// Internal dependencies
use crate::primitives::table::FourFoldTable;

/// Edwards' exponent.
pub const EDWARDS_EXPONENT: f64 = FRAC_PI_4;

/// Digby's exponent.
pub const DIGBY_EXPONENT: f64 = 0.75;

/// Becker and Clogg's exponent.
pub const BECKER_CLOGG_EXPONENT: f64 = 13.0 / 40.0;

// ============================================================================
// Association Coefficients
// ============================================================================

/// Yule's Q.
pub fn yule_q(table: &FourFoldTable) -> f64 {
    let ad = table.a * table.d;
    let bc = table.b * table.c;
    (ad - bc) / (ad + bc)
}

/// Yule's Y (coefficient of colligation).
pub fn yule_y(table: &FourFoldTable) -> f64 {
    let ad = (table.a * table.d).sqrt();
    let bc = (table.b * table.c).sqrt();
    (ad - bc) / (ad + bc)
}

// ============================================================================
// Tetrachoric Approximations
// ============================================================================

/// Pearson's Q4, the cos-pi approximation.
pub fn cosine(table: &FourFoldTable) -> f64 {
    (PI / (1.0 + table.odds_ratio().sqrt())).cos()
}

/// `(OR^e − 1) / (OR^e + 1)`.
pub fn odds_ratio_power(table: &FourFoldTable, exponent: f64) -> f64 {
    let ad = table.a * table.d;
    let bc = table.b * table.c;
    if bc == 0.0 {
        return 1.0;
    }
    if ad == 0.0 {
        return -1.0;
    }

    let powered = (ad / bc).powf(exponent);
    (powered - 1.0) / (powered + 1.0)
}

/// Edwards (1957).
pub fn edwards(table: &FourFoldTable) -> f64 {
    odds_ratio_power(table, EDWARDS_EXPONENT)
}

/// Digby (1983).
pub fn digby(table: &FourFoldTable) -> f64 {
    odds_ratio_power(table, DIGBY_EXPONENT)
}

/// Becker and Clogg (1988).
pub fn becker_clogg(table: &FourFoldTable) -> f64 {
    odds_ratio_power(table, BECKER_CLOGG_EXPONENT)
}

/// Bonett and Price (2005).
pub fn bonett_price(table: &FourFoldTable) -> f64 {
    let p1 = table.row1_proportion();
    let q1 = table.col1_proportion();
    let p_min = p1.min(1.0 - p1).min(q1).min(1.0 - q1);

    let c_hat = (1.0 - (p1 - q1).abs() / 5.0 - (0.5 - p_min).powi(2)) / 2.0;
    let omega = ((table.a + 0.5) * (table.d + 0.5) / ((table.b + 0.5) * (table.c + 0.5)))
        .powf(c_hat);

    (PI / (1.0 + omega)).cos()
}
