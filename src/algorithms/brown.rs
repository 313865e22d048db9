//! Brown's AS 116 tetrachoric estimator.
//!
//! ## Purpose
//!
//! This module implements Applied Statistics Algorithm 116 (Brown, 1977).
//! Zero cells are classified and continuity-adjusted, the table is oriented
//! so the working correlation is non-negative, and the correlation is found
//! from the tetrachoric series or, close to one, by tail quadrature.
//!
//! ## Design notes
//!
//! * **Self-contained**: Perfect and zero-cell tables are resolved here rather
//!   than by the engine shortcut.
//! * **Rescaled series**: The Hermite recursions are divided by `CHALF` and the
//!   running power multiplied by `CHALF²` whenever the power drops below
//!   `VAR_CONST`, so no term underflows before the series converges.
//! * **Two regimes**: Newton on the series while `r <= 0.95`; secant steps
//!   on a 16-point Gauss–Legendre tail integral above it.
//! * **Bracketed Newton**: A series step that leaves the bracket built from
//!   earlier residual signs is replaced by bisection, so a flat series on
//!   extreme margins cannot throw the iterate into the tail regime.
//!
//! ## Key concepts
//!
//! ```text
//! (ad − bc) / n² = φ(h)φ(k) · Σⱼ r^(j+1)/(j+1)! · Heⱼ(h) · Heⱼ(k)
//! Φ₂(h, k; r)    = Φ(min(h, k)) − 1/(2π) ∫_{asin r}^{π/2} exp(−(h² − 2hk sinθ + k²) / (2cos²θ)) dθ
//! ```
//!
//! ## Zero-cell classes
//!
//! | class | zero cells      | action                                    |
//! |-------|-----------------|-------------------------------------------|
//! | 1     | none            | solve as is                               |
//! | 2     | `a` or `d`      | `-1` if both, else shift 0.5 onto `a`, `d` |
//! | 3     | `b` or `c`      | `+1` if both, else shift 0.5 onto `b`, `c` |
//! | 4     | one of each     | degenerate (a whole margin is empty)      |

// External dependencies
use core::f64::consts::{FRAC_PI_2, PI};
use tracing::{debug, trace};

// Internal dependencies
use crate::algorithms::approximations::yule_y;
use crate::algorithms::outcome::{SolutionPath, SolverOutcome};
use crate::math::normal::{self, TWO_PI};
use crate::math::quadrature::GL16;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

/// Newton and secant iteration cap.
pub const MAX_ITERATIONS: usize = 25;

/// Convergence tolerance on the series residual and the secant step.
pub const TOLERANCE: f64 = 1e-6;

/// Working correlation above which tail quadrature replaces the series.
pub const SERIES_CUTOFF: f64 = 0.95;

/// Amount moved onto a lone zero cell and its diagonal partner.
pub const CONTINUITY_SHIFT: f64 = 0.5;

/// Underflow guard on the running series power.
pub const VAR_CONST: f64 = 1e-20;

/// Rescaling constant applied to the Hermite recursions.
pub const CHALF: f64 = 1e10;

const SERIES_EPS: f64 = 1e-14;
const MAX_SERIES_TERMS: usize = 5000;
const MAX_R: f64 = 1.0 - 1e-12;

// ============================================================================
// Zero Cells
// ============================================================================

/// Zero-cell classification of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroCells {
    /// No cell is zero.
    None,
    /// `a` or `d` is zero.
    Diagonal,
    /// `b` or `c` is zero.
    OffDiagonal,
    /// A diagonal and an off-diagonal cell are both zero.
    Both,
}

impl ZeroCells {
    /// Classify the zero cells of `table`.
    pub fn classify(table: &FourFoldTable) -> Self {
        let diagonal = table.a == 0.0 || table.d == 0.0;
        let off_diagonal = table.b == 0.0 || table.c == 0.0;
        match (diagonal, off_diagonal) {
            (false, false) => Self::None,
            (true, false) => Self::Diagonal,
            (false, true) => Self::OffDiagonal,
            (true, true) => Self::Both,
        }
    }
}

fn check_adjustable(cells: &[(&'static str, f64)]) -> Result<(), TetrachoricError> {
    for &(cell, value) in cells {
        if value < CONTINUITY_SHIFT {
            return Err(TetrachoricError::InvalidInput(format!(
                "continuity adjustment needs {cell} >= {CONTINUITY_SHIFT}, got {value}"
            )));
        }
    }
    Ok(())
}

fn check_non_negative(table: &FourFoldTable) -> Result<(), TetrachoricError> {
    for (cell, value) in [("a", table.a), ("b", table.b), ("c", table.c), ("d", table.d)] {
        if value < 0.0 {
            return Err(TetrachoricError::NegativeCount { cell, value });
        }
    }
    Ok(())
}

// ============================================================================
// Series and Tail Integral
// ============================================================================

/// Tetrachoric series `S(r)` and its derivative `S'(r)` at `(h, k)`.
pub fn tetrachoric_series(r: f64, h: f64, k: f64) -> (f64, f64) {
    // va/wa and vb/wb hold He_{j-1}, He_j at h and k; rpow holds r^j / j!.
    let (mut va, mut wa) = (0.0, 1.0);
    let (mut vb, mut wb) = (0.0, 1.0);
    let mut rpow = 1.0;

    let mut sum = 0.0;
    let mut slope = 0.0;
    let mut negligible = 0;

    for j in 0..MAX_SERIES_TERMS {
        let jf = j as f64;
        let slope_term = rpow * wa * wb;
        let term = slope_term * r / (jf + 1.0);
        sum += term;
        slope += slope_term;

        if term.abs() <= SERIES_EPS * (1.0 + sum.abs()) {
            negligible += 1;
            if negligible == 2 {
                break;
            }
        } else {
            negligible = 0;
        }

        let next_a = h * wa - jf * va;
        va = wa;
        wa = next_a;
        let next_b = k * wb - jf * vb;
        vb = wb;
        wb = next_b;

        rpow *= r / (jf + 1.0);
        if rpow != 0.0 && rpow.abs() < VAR_CONST {
            rpow *= CHALF * CHALF;
            va /= CHALF;
            wa /= CHALF;
            vb /= CHALF;
            wb /= CHALF;
        }
    }

    (sum, slope)
}

/// Lower-orthant probability `Φ₂(h, k; r)` for `0 <= r < 1` from the tail integral.
pub fn tail_cdf(h: f64, k: f64, r: f64) -> f64 {
    let hk = h * k;
    let h2k2 = h * h + k * k;
    let integral = GL16.integrate(
        |theta| {
            let cos = theta.cos();
            (-(h2k2 - 2.0 * hk * theta.sin()) / (2.0 * cos * cos)).exp()
        },
        r.asin(),
        FRAC_PI_2,
    );
    normal::cdf(h.min(k)) - integral / TWO_PI
}

// ============================================================================
// Solver
// ============================================================================

/// Estimate `r` with AS 116.
///
/// A single zero cell is continuity-adjusted by moving 0.5 onto it and its
/// diagonal partner and off the other two cells, so those two cells must hold
/// at least 0.5. Fractional tables that break this are rejected with
/// `InvalidInput`.
pub fn solve(table: &FourFoldTable) -> Result<SolverOutcome, TetrachoricError> {
    solve_with_limit(table, MAX_ITERATIONS)
}

/// Estimate `r` with AS 116, capping each of the series and tail iterations
/// at `max_iterations` steps.
pub fn solve_with_limit(
    table: &FourFoldTable,
    max_iterations: usize,
) -> Result<SolverOutcome, TetrachoricError> {
    check_non_negative(table)?;

    let delta = match ZeroCells::classify(table) {
        ZeroCells::None => 0.0,
        ZeroCells::Diagonal => {
            if table.a == 0.0 && table.d == 0.0 {
                return Ok(SolverOutcome::exact(-1.0));
            }
            check_adjustable(&[("b", table.b), ("c", table.c)])?;
            CONTINUITY_SHIFT
        }
        ZeroCells::OffDiagonal => {
            if table.b == 0.0 && table.c == 0.0 {
                return Ok(SolverOutcome::exact(1.0));
            }
            check_adjustable(&[("a", table.a), ("d", table.d)])?;
            -CONTINUITY_SHIFT
        }
        ZeroCells::Both => {
            return Err(match table.zero_margin() {
                Some(margin) => TetrachoricError::DegenerateTable { margin },
                None => TetrachoricError::InvalidInput(
                    "table has zero cells on both diagonals".into(),
                ),
            });
        }
    };

    let mut work = FourFoldTable {
        a: table.a + delta,
        b: table.b - delta,
        c: table.c - delta,
        d: table.d + delta,
    };
    if delta != 0.0 {
        debug!(delta, "brown continuity adjustment");
    }

    let ksign = if work.cross_difference() < 0.0 {
        work = work.swap_columns();
        -1.0
    } else {
        1.0
    };

    let cross = work.cross_difference();
    if cross == 0.0 {
        return Ok(SolverOutcome::exact(0.0));
    }
    if work.a == work.d && work.b == work.c {
        let r = (PI * work.b / (work.a + work.b)).cos();
        return Ok(SolverOutcome::exact(ksign * r));
    }

    let n = work.n();
    let h = normal::quantile(work.row1_proportion());
    let k = normal::quantile(work.col1_proportion());
    let ss = normal::pdf(h) * normal::pdf(k);
    let target = cross / (n * n) / ss;

    let mut r = yule_y(&work).clamp(0.0, MAX_R);
    trace!(r, target, "brown starting value");

    // S(r) increases with r, so residual signs bracket the root.
    let (mut lower, mut upper) = (0.0, MAX_R);

    for iteration in 1..=max_iterations {
        if r > SERIES_CUTOFF {
            debug!(r, "brown switching to tail quadrature");
            let outcome = solve_tail(h, k, work.a_proportion(), r, iteration, max_iterations)
                .map_err(|e| match e {
                    TetrachoricError::ConvergenceFailure {
                        method,
                        iterations,
                        last,
                    } => TetrachoricError::ConvergenceFailure {
                        method,
                        iterations,
                        last: ksign * last,
                    },
                    other => other,
                })?;
            return Ok(SolverOutcome {
                r: ksign * outcome.r,
                ..outcome
            });
        }

        let (sum, slope) = tetrachoric_series(r, h, k);
        let residual = sum - target;
        trace!(iteration, r, residual, "brown series step");

        if residual.abs() < TOLERANCE {
            return Ok(SolverOutcome {
                r: ksign * r,
                iterations: iteration,
                path: SolutionPath::Series,
            });
        }

        if residual < 0.0 {
            lower = r;
        } else {
            upper = r;
        }

        let next = r - residual / slope;
        r = if next > lower && next < upper {
            next
        } else {
            trace!(iteration, lower, upper, "brown bisecting bracket");
            0.5 * (lower + upper)
        };
    }

    Err(TetrachoricError::ConvergenceFailure {
        method: "brown",
        iterations: max_iterations,
        last: ksign * r,
    })
}

/// Secant iterations on the tail integral, started from the series cutoff.
fn solve_tail(
    h: f64,
    k: f64,
    p: f64,
    trial: f64,
    offset: usize,
    max_iterations: usize,
) -> Result<SolverOutcome, TetrachoricError> {
    let mut r0 = SERIES_CUTOFF;
    let mut f0 = tail_cdf(h, k, r0) - p;
    let mut r1 = trial;
    let mut f1 = tail_cdf(h, k, r1) - p;

    for iteration in 1..=max_iterations {
        if f1 == f0 {
            break;
        }
        let r2 = (r1 - f1 * (r1 - r0) / (f1 - f0)).clamp(0.0, MAX_R);
        trace!(iteration, r = r2, "brown tail step");

        if !r2.is_finite() {
            break;
        }
        if (r2 - r1).abs() < TOLERANCE {
            return Ok(SolverOutcome {
                r: r2,
                iterations: offset + iteration,
                path: SolutionPath::TailQuadrature,
            });
        }

        r0 = r1;
        f0 = f1;
        r1 = r2;
        f1 = tail_cdf(h, k, r1) - p;
    }

    if f1.abs() < TOLERANCE * TOLERANCE {
        return Ok(SolverOutcome {
            r: r1,
            iterations: offset + max_iterations,
            path: SolutionPath::TailQuadrature,
        });
    }

    Err(TetrachoricError::ConvergenceFailure {
        method: "brown",
        iterations: offset + max_iterations,
        last: r1,
    })
}
