//! Error types for tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while estimating a
//! tetrachoric correlation: invalid or degenerate tables, solvers that fail to
//! converge, and builder misconfiguration.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending cell, margin or last trial value.
//! * **Deferred**: Builder conflicts are recorded during configuration and
//!   surfaced when `build()` is called.
//! * **No sentinels**: Every failure mode of the legacy solvers has its own variant.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Negative, non-finite or empty tables.
//! 2. **Degenerate tables**: A zero row or column leaves the estimate undefined.
//! 3. **Solver failures**: Divergence, exhausted iteration caps, range escapes.
//! 4. **Configuration**: Unknown method names, interval levels, duplicate parameters.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback between methods.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for tetrachoric estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum TetrachoricError {
    /// The table has no observations (all four cells are zero).
    EmptyTable,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// A cell count is negative.
    NegativeCount {
        /// Cell label (`"a"`, `"b"`, `"c"` or `"d"`).
        cell: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A cell count is NaN or infinite.
    InvalidNumericValue(String),

    /// A whole row or column of the table is zero.
    DegenerateTable {
        /// Label of the empty margin (e.g. `"row 1"`, `"column 2"`).
        margin: &'static str,
    },

    /// An iterative solver diverged or ended without meeting its tolerance.
    ConvergenceFailure {
        /// Name of the estimator.
        method: &'static str,
        /// Iterations performed before giving up.
        iterations: usize,
        /// Last trial value.
        last: f64,
    },

    /// An iterative solver hit its iteration cap.
    IterationLimitExceeded {
        /// Name of the estimator.
        method: &'static str,
        /// Solver phase that exhausted its budget.
        phase: &'static str,
        /// The iteration cap.
        limit: usize,
        /// Last trial value.
        last: f64,
    },

    /// The trial correlation left [-1, 1] twice during the TET8 correlation phase.
    OutOfRangeEscape {
        /// Last trial value.
        last: f64,
    },

    /// Method name could not be parsed.
    UnknownMethod(String),

    /// Interval coverage level must be strictly between 0 and 1.
    InvalidIntervals(f64),

    /// Indicator vectors must have the same number of observations.
    MismatchedInputs {
        /// Length of the first vector.
        x_len: usize,
        /// Length of the second vector.
        y_len: usize,
    },

    /// A correlation matrix needs at least two variables.
    TooFewVariables {
        /// Number of variables provided.
        got: usize,
        /// Minimum required.
        min: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for TetrachoricError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyTable => write!(f, "Table is empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NegativeCount { cell, value } => {
                write!(f, "Negative count: cell {cell} = {value}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::DegenerateTable { margin } => {
                write!(f, "Degenerate table: {margin} total is zero")
            }
            Self::ConvergenceFailure {
                method,
                iterations,
                last,
            } => {
                write!(
                    f,
                    "Method '{method}' failed to converge after {iterations} iterations (last r = {last})"
                )
            }
            Self::IterationLimitExceeded {
                method,
                phase,
                limit,
                last,
            } => {
                write!(
                    f,
                    "Method '{method}' exceeded {limit} iterations in phase '{phase}' (last value = {last})"
                )
            }
            Self::OutOfRangeEscape { last } => {
                write!(f, "Trial correlation escaped [-1, 1] after retry (last r = {last})")
            }
            Self::UnknownMethod(name) => write!(f, "Unknown method: '{name}'"),
            Self::InvalidIntervals(level) => {
                write!(f, "Invalid interval level: {level} (must be > 0 and < 1)")
            }
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} observations, y has {y_len}")
            }
            Self::TooFewVariables { got, min } => {
                write!(f, "Too few variables: got {got}, need at least {min}")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for TetrachoricError {}
