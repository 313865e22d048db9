//! Solver outcomes shared by all estimators.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::normal;
use crate::primitives::table::FourFoldTable;

/// How an estimate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionPath {
    /// Resolved without iteration (perfect, independent or symmetric table).
    Exact,
    /// Digit-by-digit search.
    DecimalSearch,
    /// Newton iterations on the bivariate normal CDF.
    Newton,
    /// Newton iterations on quadrature integrals (TET8).
    QuadratureNewton,
    /// Tetrachoric power series with Newton correction (AS 116).
    Series,
    /// Tail quadrature with secant update (AS 116, high correlation).
    TailQuadrature,
    /// Closed-form approximation.
    ClosedForm,
}

/// Point estimate returned by a solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    /// Estimated tetrachoric correlation.
    pub r: f64,
    /// Iterations used (0 for exact and closed-form paths).
    pub iterations: usize,
    /// Path that produced the estimate.
    pub path: SolutionPath,
}

impl SolverOutcome {
    /// Outcome of a shortcut that needed no iteration.
    pub fn exact(r: f64) -> Self {
        Self {
            r,
            iterations: 0,
            path: SolutionPath::Exact,
        }
    }

    /// Outcome of a closed-form approximation.
    pub fn closed_form(r: f64) -> Self {
        Self {
            r,
            iterations: 0,
            path: SolutionPath::ClosedForm,
        }
    }
}

/// Normal thresholds implied by the margins of a table.
///
/// `h` and `k` solve `Φ(h) = (a+b)/n` and `Φ(k) = (a+c)/n`; `p = a/n` is the
/// lower-orthant probability every iterative solver targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Row threshold.
    pub h: f64,
    /// Column threshold.
    pub k: f64,
    /// Target probability `a / n`.
    pub p: f64,
}

impl Thresholds {
    /// Thresholds of a validated table.
    pub fn from_table(table: &FourFoldTable) -> Self {
        Self {
            h: normal::quantile(table.row1_proportion()),
            k: normal::quantile(table.col1_proportion()),
            p: table.a_proportion(),
        }
    }
}
