//! Univariate standard normal functions.
//!
//! ## Purpose
//!
//! Thin wrappers over `statrs` error functions giving the standard normal
//! CDF, density and quantile used to turn table margins into thresholds.
//!
//! ## Invariants
//!
//! * `quantile(cdf(x)) ≈ x` for finite `x`.
//! * `quantile(0) = -inf`, `quantile(1) = +inf`.

// External dependencies
use core::f64::consts::{PI, SQRT_2};
use statrs::function::erf::{erfc, erfc_inv};

/// `1 / sqrt(2π)`.
pub const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// `2π`, used by the bivariate integrals.
pub const TWO_PI: f64 = 2.0 * PI;

/// Standard normal CDF Φ(x).
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal density φ(x).
#[inline]
pub fn pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal quantile Φ⁻¹(p).
#[inline]
pub fn quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Sign with zero mapped to +1.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}
