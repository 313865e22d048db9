//! Divgi's Newton–Raphson tetrachoric estimator.
//!
//! ## Purpose
//!
//! This module implements Divgi (1979): a closed-form starting value built
//! from the odds ratio raised to a threshold-dependent exponent, refined by a
//! fixed number of Newton steps on the bivariate normal CDF.
//!
//! ## Design notes
//!
//! * **Reflection**: The table is relabelled so both thresholds are
//!   non-negative; the sign `sign(h)·sign(k)` is restored at the end.
//! * **Bounded**: Exactly ten Newton steps; a step that would leave (-1, 1)
//!   is replaced by a halving step towards the boundary.
//! * **Fail closed**: A final residual above `RESIDUAL_TOLERANCE` is an error.
//!
//! ## Key concepts
//!
//! ```text
//! α  = dA + dB·(−1 + 1/(1 + dC·(log10 OR − dD)²))
//! r₀ = cos(π / (1 + OR^α))
//! r  ← r − (Φ₂(h, k; r) − a/n) / φ₂(h, k; r)
//! ```
//!
//! ## Non-goals
//!
//! * This module does not resolve perfect tables (handled by the engine).

// External dependencies
use core::f64::consts::PI;
use tracing::trace;

// Internal dependencies
use crate::algorithms::outcome::{SolutionPath, SolverOutcome, Thresholds};
use crate::math::bivariate::BivariateNormalCdf;
use crate::math::normal::sign;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

/// Number of Newton iterations.
pub const NEWTON_ITERATIONS: usize = 10;

/// Largest acceptable `|Φ₂(h, k; r) − a/n|` after the Newton sweep.
pub const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Bound applied to the starting value so the density is non-zero.
const START_BOUND: f64 = 0.999_999;

// ============================================================================
// Starting Value
// ============================================================================

/// Divgi's closed-form starting value.
///
/// `h_adj >= k_adj >= 0` are the absolute thresholds and `odds_ratio` belongs
/// to the reflected table.
pub fn starting_value(odds_ratio: f64, h_adj: f64, k_adj: f64) -> f64 {
    let h = h_adj;
    let k = k_adj;
    let h2k2 = h * h + k * k;

    let (da, db) = if h2k2 > 0.0 {
        let len = h2k2.sqrt();
        (
            0.5 / (1.0 + h2k2 * (0.12454 - 0.27102 * (1.0 - h / len))),
            0.5 / (1.0 + h2k2 * (0.82281 - 1.03514 * k / len)),
        )
    } else {
        (0.5, 0.5)
    };

    // (h - k)² / h vanishes with h since k <= h.
    let dc = if h > 0.0 {
        0.07557 * h + (h - k) * (h - k) * (0.51141 / (h + 2.05793) - 0.07557 / h)
    } else {
        0.0
    };
    let dd = k * (0.79289 + 4.28981 / (1.0 + 3.30231 * h));

    let shift = odds_ratio.log10() - dd;
    let alpha = da + db * (-1.0 + 1.0 / (1.0 + dc * shift * shift));

    (PI / (1.0 + odds_ratio.powf(alpha))).cos()
}

// ============================================================================
// Solver
// ============================================================================

/// Estimate `r` with Divgi's method.
pub fn solve<B: BivariateNormalCdf>(
    table: &FourFoldTable,
    backend: &B,
) -> Result<SolverOutcome, TetrachoricError> {
    let t = Thresholds::from_table(table);
    let sg = sign(t.h) * sign(t.k);

    let mut work = *table;
    if t.h < 0.0 {
        work = work.swap_rows();
    }
    if t.k < 0.0 {
        work = work.swap_columns();
    }
    let h = t.h.abs();
    let k = t.k.abs();
    let p = work.a_proportion();

    let odds_ratio = if work.has_zero_cell() {
        work.with_added(0.5).odds_ratio()
    } else {
        work.odds_ratio()
    };

    let mut r =
        starting_value(odds_ratio, h.max(k), h.min(k)).clamp(-START_BOUND, START_BOUND);
    trace!(r, odds_ratio, "divgi starting value");

    let mut iterations = 0;
    for _ in 0..NEWTON_ITERATIONS {
        let dens = backend.density(h, k, r);
        if !(dens > 0.0 && dens.is_finite()) {
            break;
        }
        iterations += 1;

        let step = (backend.cdf(h, k, r) - p) / dens;
        let next = r - step;
        r = if next.abs() < 1.0 {
            next
        } else {
            0.5 * (r + sign(next))
        };
        trace!(iteration = iterations, r, "divgi newton step");
    }

    let residual = backend.cdf(h, k, r) - p;
    if !r.is_finite() || residual.abs() > RESIDUAL_TOLERANCE {
        return Err(TetrachoricError::ConvergenceFailure {
            method: "divgi",
            iterations,
            last: sg * r,
        });
    }

    Ok(SolverOutcome {
        r: sg * r,
        iterations,
        path: SolutionPath::Newton,
    })
}
