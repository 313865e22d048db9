//! Kirk's TET8 tetrachoric estimator.
//!
//! ## Purpose
//!
//! This module reproduces Kirk (1973), a quadrature-based solver that first
//! recovers both normal thresholds from the margins and then solves for the
//! correlation, all with 8-point Gauss–Legendre integrals and Newton steps.
//!
//! ## Design notes
//!
//! * **State machine**: The legacy jump-based control flow is expressed as
//!   `Phase` transitions, each consuming and returning a `SolverState`.
//! * **Typed failures**: Divergence, exhausted iteration caps and escapes
//!   from [-1, 1] map to distinct error variants.
//! * **Heuristic reset**: When the correlation trial leaves (-1, 1) it is
//!   reset once to `0.97·sign(trial)`. This patch comes from the FORTRAN
//!   routine and is not guaranteed to recover every table.
//!
//! ## Key concepts
//!
//! ```text
//! marginal:     ∫₀ʰ φ(t) dt = p − ½                          (hEfn1)
//! correlation:  ∫₀ʳ g(t) dt = (a/n − p₁p₂)·2π                 (hEfn2)
//!               g(t) = exp(−(h² − 2thk + k²) / (2(1 − t²))) / √(1 − t²)
//! ```
//!
//! ## Invariants
//!
//! * Each phase performs at most `MAX_ITERATIONS` Newton steps.
//!
//! ## Non-goals
//!
//! * This module does not resolve perfect tables (handled by the engine).

// External dependencies
use tracing::{debug, trace};

// Internal dependencies
use crate::algorithms::outcome::{SolutionPath, SolverOutcome};
use crate::math::normal::{self, TWO_PI, sign};
use crate::math::quadrature::GL8;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

/// Convergence tolerance of the threshold phases.
pub const MARGINAL_TOLERANCE: f64 = 1e-5;

/// Convergence tolerance of the correlation phase.
pub const CORRELATION_TOLERANCE: f64 = 1e-4;

/// Newton step cap per phase.
pub const MAX_ITERATIONS: usize = 20;

/// Magnitude the correlation trial is reset to after leaving (-1, 1).
pub const RETRY_MAGNITUDE: f64 = 0.97;

// ============================================================================
// Solver State
// ============================================================================

/// Running state of one Newton phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverState {
    /// Current trial value.
    pub trial: f64,
    /// Newton steps taken in this phase.
    pub iterations: usize,
    /// Step size below which the phase has converged.
    pub tolerance: f64,
}

impl SolverState {
    fn start(trial: f64, tolerance: f64) -> Self {
        Self {
            trial,
            iterations: 0,
            tolerance,
        }
    }
}

/// Phases of the TET8 solve.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Solve the row threshold `h`.
    SolveMarginal1,
    /// Solve the column threshold `k`.
    SolveMarginal2 {
        /// Row threshold.
        h: f64,
    },
    /// Solve the correlation given both thresholds.
    SolveCorrelation {
        /// Row threshold.
        h: f64,
        /// Column threshold.
        k: f64,
    },
    /// Finished successfully.
    Converged(SolverState),
    /// Finished with an error.
    Failed(TetrachoricError),
}

// ============================================================================
// Integrals
// ============================================================================

/// `∫₀ʰ φ(t) dt`, i.e. `Φ(h) − ½`.
pub fn hefn1(h: f64) -> f64 {
    GL8.integrate(normal::pdf, 0.0, h)
}

/// Correlation-phase integrand.
pub fn correlation_integrand(t: f64, h: f64, k: f64) -> f64 {
    let one_minus = 1.0 - t * t;
    let q = (h * h - 2.0 * t * h * k + k * k) / (2.0 * one_minus);
    (-q).exp() / one_minus.sqrt()
}

/// `∫₀ʳ g(t) dt`, i.e. `2π·(Φ₂(h, k; r) − Φ(h)Φ(k))`.
pub fn hefn2(r: f64, h: f64, k: f64) -> f64 {
    GL8.integrate(|t| correlation_integrand(t, h, k), 0.0, r)
}

// ============================================================================
// Phase Transitions
// ============================================================================

/// Newton solve of `hefn1(x) = proportion − ½` from zero.
fn solve_threshold(proportion: f64, phase: &'static str) -> Result<SolverState, TetrachoricError> {
    let target = proportion - 0.5;
    let mut state = SolverState::start(0.0, MARGINAL_TOLERANCE);

    loop {
        if state.iterations >= MAX_ITERATIONS {
            return Err(TetrachoricError::IterationLimitExceeded {
                method: "kirk",
                phase,
                limit: MAX_ITERATIONS,
                last: state.trial,
            });
        }

        let next = state.trial - (hefn1(state.trial) - target) / normal::pdf(state.trial);
        if !next.is_finite() {
            return Err(TetrachoricError::ConvergenceFailure {
                method: "kirk",
                iterations: state.iterations,
                last: state.trial,
            });
        }

        let delta = (next - state.trial).abs();
        state.trial = next;
        state.iterations += 1;
        trace!(phase, iteration = state.iterations, value = next, "kirk threshold step");

        if delta < state.tolerance {
            return Ok(state);
        }
    }
}

/// Newton solve of `hefn2(r) = con` with the single out-of-range reset.
fn solve_correlation(h: f64, k: f64, con: f64) -> Result<SolverState, TetrachoricError> {
    let slope_at_zero = correlation_integrand(0.0, h, k);
    let mut state = SolverState::start(con / slope_at_zero, CORRELATION_TOLERANCE);
    let mut reset_used = false;

    if state.trial.abs() >= 1.0 {
        debug!(trial = state.trial, "kirk starting value outside (-1, 1), resetting");
        state.trial = RETRY_MAGNITUDE * sign(state.trial);
        reset_used = true;
    }

    loop {
        if state.iterations >= MAX_ITERATIONS {
            return Err(TetrachoricError::IterationLimitExceeded {
                method: "kirk",
                phase: "correlation",
                limit: MAX_ITERATIONS,
                last: state.trial,
            });
        }

        let next = state.trial
            - (hefn2(state.trial, h, k) - con) / correlation_integrand(state.trial, h, k);
        state.iterations += 1;

        if !next.is_finite() {
            return Err(TetrachoricError::ConvergenceFailure {
                method: "kirk",
                iterations: state.iterations,
                last: state.trial,
            });
        }

        if next.abs() >= 1.0 {
            if reset_used {
                return Err(TetrachoricError::OutOfRangeEscape { last: next });
            }
            debug!(trial = next, "kirk trial left (-1, 1), resetting");
            reset_used = true;
            state.trial = RETRY_MAGNITUDE * sign(next);
            continue;
        }

        let delta = (next - state.trial).abs();
        state.trial = next;
        trace!(iteration = state.iterations, r = next, "kirk correlation step");

        if delta < state.tolerance {
            return Ok(state);
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Estimate `r` with Kirk's TET8 procedure.
pub fn solve(table: &FourFoldTable) -> Result<SolverOutcome, TetrachoricError> {
    let fm1 = table.row1_proportion();
    let fm2 = table.col1_proportion();
    let con = (table.a_proportion() - fm1 * fm2) * TWO_PI;

    let mut iterations = 0;
    let mut phase = Phase::SolveMarginal1;

    loop {
        phase = match phase {
            Phase::SolveMarginal1 => match solve_threshold(fm1, "marginal 1") {
                Ok(state) => {
                    iterations += state.iterations;
                    Phase::SolveMarginal2 { h: state.trial }
                }
                Err(e) => Phase::Failed(e),
            },
            Phase::SolveMarginal2 { h } => match solve_threshold(fm2, "marginal 2") {
                Ok(state) => {
                    iterations += state.iterations;
                    Phase::SolveCorrelation { h, k: state.trial }
                }
                Err(e) => Phase::Failed(e),
            },
            Phase::SolveCorrelation { h, k } => match solve_correlation(h, k, con) {
                Ok(state) => Phase::Converged(state),
                Err(e) => Phase::Failed(e),
            },
            Phase::Converged(state) => {
                return Ok(SolverOutcome {
                    r: state.trial,
                    iterations: iterations + state.iterations,
                    path: SolutionPath::QuadratureNewton,
                });
            }
            Phase::Failed(e) => return Err(e),
        };
    }
}
