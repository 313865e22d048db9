//! Output type of a tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module defines `TetrachoricResult`, which carries the estimate
//! together with how it was obtained and the optional standard errors and
//! confidence interval.
//!
//! ## Design notes
//!
//! * **Optional outputs**: Diagnostics are only populated when requested.
//! * **Ergonomics**: Implements `Display` for a human-readable summary.
//!
//! ## Invariants
//!
//! * `r` lies in [-1, 1].
//! * The confidence interval, when present, contains `r`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use core::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::method::Method;
use crate::algorithms::outcome::SolutionPath;
use crate::evaluation::intervals::ConfidenceInterval;

// ============================================================================
// Result Structure
// ============================================================================

/// Tetrachoric estimate with diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetrachoricResult {
    /// Estimated tetrachoric correlation.
    pub r: f64,

    /// Method that produced the estimate.
    pub method: Method,

    /// Solver path that produced the estimate.
    pub path: SolutionPath,

    /// Solver iterations used.
    pub iterations: usize,

    /// Grand total of the table.
    pub n: f64,

    /// Asymptotic standard error at the estimate (absent at `|r| = 1`).
    pub standard_error: Option<f64>,

    /// Standard error under `r = 0`.
    pub null_standard_error: Option<f64>,

    /// Fisher-z confidence interval.
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl TetrachoricResult {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Check if standard errors were computed.
    pub fn has_standard_errors(&self) -> bool {
        self.null_standard_error.is_some()
    }

    /// Check if a confidence interval was computed.
    pub fn has_confidence_interval(&self) -> bool {
        self.confidence_interval.is_some()
    }

    /// Whether the estimate sits on the boundary of [-1, 1].
    pub fn is_perfect(&self) -> bool {
        self.r.abs() == 1.0
    }

    /// `r / SE₀`, the Wald statistic against `r = 0`.
    pub fn z_statistic(&self) -> Option<f64> {
        self.null_standard_error.map(|se0| self.r / se0)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for TetrachoricResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Method:      {}", self.method)?;
        writeln!(f, "  Path:        {:?}", self.path)?;
        writeln!(f, "  Iterations:  {}", self.iterations)?;
        writeln!(f, "  Total (n):   {}", self.n)?;
        writeln!(f)?;

        writeln!(f, "Estimate:")?;
        writeln!(f, "  r:           {:.6}", self.r)?;

        if self.has_standard_errors() {
            match self.standard_error {
                Some(se) => writeln!(f, "  Std_Err:     {:.6}", se)?,
                None => writeln!(f, "  Std_Err:     undefined")?,
            }
        }
        if let Some(se0) = self.null_standard_error {
            writeln!(f, "  Std_Err (0): {:.6}", se0)?;
        }
        if let Some(ci) = &self.confidence_interval {
            writeln!(
                f,
                "  {:.0}% CI:     [{:.6}, {:.6}]",
                ci.level * 100.0,
                ci.lower,
                ci.upper
            )?;
        }

        Ok(())
    }
}
