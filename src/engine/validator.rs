//! Input validation for tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module checks tables and configuration parameters before any solver
//! runs, so the solvers can assume finite, non-negative counts and non-empty
//! margins.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Ordered**: Finite checks precede sign checks, which precede margin checks.
//!
//! ## Invariants
//!
//! * A table passing `validate_table` has four finite cells `>= 0`, `n > 0`
//!   and four positive margins.
//!
//! ## Non-goals
//!
//! * This module does not adjust or correct tables.

// Internal dependencies
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for tables and estimator configuration.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Table Validation
    // ========================================================================

    /// Validate a table for estimation.
    pub fn validate_table(table: &FourFoldTable) -> Result<(), TetrachoricError> {
        let cells = [("a", table.a), ("b", table.b), ("c", table.c), ("d", table.d)];

        // Check 1: Finite cells
        for (cell, value) in cells {
            if !value.is_finite() {
                return Err(TetrachoricError::InvalidNumericValue(format!(
                    "{}={}",
                    cell, value
                )));
            }
        }

        // Check 2: Non-negative cells
        for (cell, value) in cells {
            if value < 0.0 {
                return Err(TetrachoricError::NegativeCount { cell, value });
            }
        }

        // Check 3: Non-empty table
        if table.n() <= 0.0 {
            return Err(TetrachoricError::EmptyTable);
        }

        // Check 4: Non-empty margins
        if let Some(margin) = table.zero_margin() {
            return Err(TetrachoricError::DegenerateTable { margin });
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the confidence interval level.
    pub fn validate_interval_level(level: f64) -> Result<(), TetrachoricError> {
        if !level.is_finite() || level <= 0.0 || level >= 1.0 {
            return Err(TetrachoricError::InvalidIntervals(level));
        }
        Ok(())
    }

    /// Validate the number of variables of a correlation matrix.
    pub fn validate_variables(count: usize) -> Result<(), TetrachoricError> {
        if count < 2 {
            return Err(TetrachoricError::TooFewVariables { got: count, min: 2 });
        }
        Ok(())
    }

    /// Validate that paired observations have equal length.
    pub fn validate_lengths(x_len: usize, y_len: usize) -> Result<(), TetrachoricError> {
        if x_len != y_len {
            return Err(TetrachoricError::MismatchedInputs { x_len, y_len });
        }
        Ok(())
    }

    /// Validate that no parameter was set multiple times.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), TetrachoricError> {
        if let Some(parameter) = duplicate_param {
            return Err(TetrachoricError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
