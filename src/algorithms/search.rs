//! Digit-by-digit search for the tetrachoric correlation.
//!
//! ## Purpose
//!
//! This module solves `Φ₂(h, k; r) = a/n` by fixing one decimal place of `r`
//! at a time, exploiting that the bivariate normal CDF is increasing in `r`
//! for fixed thresholds.
//!
//! ## Design notes
//!
//! * **Derivative-free**: Only bivariate CDF evaluations are needed.
//! * **Precision**: Ten decimal places.
//! * **Bounded**: The first place may take 20 steps to cross `[-1, 1]`.
//!   Every later place starts below a bracket one step of the previous place
//!   wide, so it needs at most 10; more means the backend is not monotone in
//!   `r` and the search fails closed.
//!
//! ## Invariants
//!
//! * On return, `Φ₂(h, k; r) < a/n <= Φ₂(h, k; r + 1e-10)` unless `r` hit 1.
//!
//! ## Non-goals
//!
//! * This module does not resolve perfect tables (handled by the engine).

// External dependencies
use tracing::trace;

// Internal dependencies
use crate::algorithms::outcome::{SolutionPath, SolverOutcome, Thresholds};
use crate::math::bivariate::BivariateNormalCdf;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

/// Number of decimal places resolved.
pub const DECIMAL_PLACES: i32 = 10;

/// Maximum steps taken within the first decimal place.
pub const MAX_STEPS_FIRST_PLACE: usize = 20;

/// Maximum steps taken within each later decimal place.
pub const MAX_STEPS_PER_PLACE: usize = 10;

/// Estimate `r` by decimal search against the given bivariate normal CDF.
pub fn solve<B: BivariateNormalCdf>(
    table: &FourFoldTable,
    backend: &B,
) -> Result<SolverOutcome, TetrachoricError> {
    let t = Thresholds::from_table(table);

    let mut r = -1.0;
    let mut evaluations = 0;

    for place in 1..=DECIMAL_PLACES {
        let step = 10f64.powi(-place);
        let limit = if place == 1 {
            MAX_STEPS_FIRST_PLACE
        } else {
            MAX_STEPS_PER_PLACE
        };
        let mut steps = 0;

        loop {
            let trial = r + step;
            evaluations += 1;
            if trial > 1.0 || backend.cdf(t.h, t.k, trial) >= t.p {
                break;
            }

            steps += 1;
            if steps > limit {
                return Err(TetrachoricError::IterationLimitExceeded {
                    method: "search",
                    phase: "decimal place",
                    limit,
                    last: r,
                });
            }
            r = trial;
        }

        trace!(place, r, "search fixed decimal place");
    }

    Ok(SolverOutcome {
        r,
        iterations: evaluations,
        path: SolutionPath::DecimalSearch,
    })
}
