//! Asymptotic standard errors of a tetrachoric estimate.
//!
//! ## Purpose
//!
//! This module computes the delta-method standard error of `r` under
//! multinomial sampling of the four cells, and the standard error under the
//! null hypothesis `r = 0`.
//!
//! ## Design notes
//!
//! * **Method-agnostic**: The standard error depends only on the table and the
//!   estimate, so every estimator shares it.
//! * **Absent at the boundary**: At `|r| = 1` the bivariate density vanishes
//!   and no finite standard error exists; `None` is returned.
//!
//! ## Key concepts
//!
//! ```text
//! A = Φ((k − rh) / √(1 − r²)),  B = Φ((h − rk) / √(1 − r²)),  ψ = φ₂(h, k; r)
//! ∂r/∂(pa, pb, pc, pd) = (1 − A − B, −A, −B, 0) / ψ
//! Var(r) = (Σ pᵢ gᵢ² − (Σ pᵢ gᵢ)²) / n
//! SE₀    = √(P(1 − P)Q(1 − Q) / n) / (φ(h)φ(k))
//! ```

// Internal dependencies
use crate::math::bivariate;
use crate::math::normal;
use crate::primitives::table::FourFoldTable;

/// Delta-method standard error of the estimate `r`.
///
/// Returns `None` when `|r| >= 1` or the variance is not a positive finite
/// number.
pub fn standard_error(table: &FourFoldTable, r: f64) -> Option<f64> {
    if !(r.abs() < 1.0) {
        return None;
    }

    let n = table.n();
    let h = normal::quantile(table.row1_proportion());
    let k = normal::quantile(table.col1_proportion());

    let s = (1.0 - r * r).sqrt();
    let big_a = normal::cdf((k - r * h) / s);
    let big_b = normal::cdf((h - r * k) / s);
    let psi = bivariate::density(h, k, r);
    if !(psi > 0.0) {
        return None;
    }

    let gradient = [(1.0 - big_a - big_b) / psi, -big_a / psi, -big_b / psi, 0.0];
    let probs = [table.a / n, table.b / n, table.c / n, table.d / n];

    let mut mean = 0.0;
    let mut second = 0.0;
    for (p, g) in probs.iter().zip(gradient) {
        mean += p * g;
        second += p * g * g;
    }

    let variance = (second - mean * mean) / n;
    if variance > 0.0 && variance.is_finite() {
        Some(variance.sqrt())
    } else {
        None
    }
}

/// Standard error of `r` when the latent correlation is zero.
pub fn null_standard_error(table: &FourFoldTable) -> f64 {
    let p = table.row1_proportion();
    let q = table.col1_proportion();
    let h = normal::quantile(p);
    let k = normal::quantile(q);

    (p * (1.0 - p) * q * (1.0 - q) / table.n()).sqrt() / (normal::pdf(h) * normal::pdf(k))
}
