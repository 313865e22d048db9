//! Fourfold (2x2) contingency table.
//!
//! ## Purpose
//!
//! This module defines `FourFoldTable`, the single input type shared by every
//! estimator in the crate, together with its margins and the relabelling
//! operations the solvers use to normalise sign conventions.
//!
//! ## Design notes
//!
//! * **Storage**: Cells are stored as `f64` so continuity-adjusted tables
//!   (half counts) are representable.
//! * **Construction**: Any `ToPrimitive` count type is accepted; validation is
//!   deferred to the engine so construction never fails.
//!
//! ## Key concepts
//!
//! ```text
//!            col 1   col 2
//!   row 1      a       b      row1 = a + b
//!   row 2      c       d      row2 = c + d
//!           col1 = a + c   col2 = b + d
//! ```
//!
//! Positive association means `ad > bc`.
//!
//! ## Invariants
//!
//! * Relabelling operations preserve the grand total.
//! * Swapping rows or columns negates the latent correlation; transposing
//!   leaves it unchanged.
//!
//! ## Non-goals
//!
//! * This module does not validate cell values (handled by `validator`).
//! * This module does not support tables larger than 2x2.

// External dependencies
use num_traits::ToPrimitive;

// Internal dependencies
use crate::primitives::errors::TetrachoricError;

// ============================================================================
// Table
// ============================================================================

/// A 2x2 cross-tabulation of two binary variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourFoldTable {
    /// Row 1, column 1.
    pub a: f64,
    /// Row 1, column 2.
    pub b: f64,
    /// Row 2, column 1.
    pub c: f64,
    /// Row 2, column 2.
    pub d: f64,
}

impl FourFoldTable {
    /// Build a table from four cell counts.
    ///
    /// Counts that cannot be represented as `f64` become NaN and are rejected
    /// at validation time.
    pub fn new<T: ToPrimitive>(a: T, b: T, c: T, d: T) -> Self {
        let conv = |v: T| v.to_f64().unwrap_or(f64::NAN);
        Self {
            a: conv(a),
            b: conv(b),
            c: conv(c),
            d: conv(d),
        }
    }

    /// Cross-tabulate two paired binary variables.
    ///
    /// `true` is the first category of each variable, so `a` counts the
    /// observations where both are `true`.
    pub fn from_indicators(x: &[bool], y: &[bool]) -> Result<Self, TetrachoricError> {
        if x.len() != y.len() {
            return Err(TetrachoricError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        let mut counts = [0usize; 4];
        for (&xi, &yi) in x.iter().zip(y) {
            let idx = match (xi, yi) {
                (true, true) => 0,
                (true, false) => 1,
                (false, true) => 2,
                (false, false) => 3,
            };
            counts[idx] += 1;
        }

        Ok(Self::new(counts[0], counts[1], counts[2], counts[3]))
    }

    // ========================================================================
    // Margins
    // ========================================================================

    /// Grand total.
    #[inline]
    pub fn n(&self) -> f64 {
        self.a + self.b + self.c + self.d
    }

    /// First row total (`a + b`).
    #[inline]
    pub fn row1(&self) -> f64 {
        self.a + self.b
    }

    /// Second row total (`c + d`).
    #[inline]
    pub fn row2(&self) -> f64 {
        self.c + self.d
    }

    /// First column total (`a + c`).
    #[inline]
    pub fn col1(&self) -> f64 {
        self.a + self.c
    }

    /// Second column total (`b + d`).
    #[inline]
    pub fn col2(&self) -> f64 {
        self.b + self.d
    }

    /// Label of the first empty row or column, if any.
    pub fn zero_margin(&self) -> Option<&'static str> {
        if self.row1() == 0.0 {
            Some("row 1")
        } else if self.row2() == 0.0 {
            Some("row 2")
        } else if self.col1() == 0.0 {
            Some("column 1")
        } else if self.col2() == 0.0 {
            Some("column 2")
        } else {
            None
        }
    }

    /// Proportion of observations in the first row.
    #[inline]
    pub fn row1_proportion(&self) -> f64 {
        self.row1() / self.n()
    }

    /// Proportion of observations in the first column.
    #[inline]
    pub fn col1_proportion(&self) -> f64 {
        self.col1() / self.n()
    }

    /// Proportion of observations in cell `a`.
    #[inline]
    pub fn a_proportion(&self) -> f64 {
        self.a / self.n()
    }

    // ========================================================================
    // Association
    // ========================================================================

    /// Cross-product difference `ad - bc`.
    #[inline]
    pub fn cross_difference(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Sample odds ratio `ad / bc` (infinite or NaN when `bc = 0`).
    #[inline]
    pub fn odds_ratio(&self) -> f64 {
        (self.a * self.d) / (self.b * self.c)
    }

    /// Whether any cell is exactly zero.
    #[inline]
    pub fn has_zero_cell(&self) -> bool {
        self.a == 0.0 || self.b == 0.0 || self.c == 0.0 || self.d == 0.0
    }

    /// Table with `add` added to every cell.
    pub fn with_added(&self, add: f64) -> Self {
        Self {
            a: self.a + add,
            b: self.b + add,
            c: self.c + add,
            d: self.d + add,
        }
    }

    // ========================================================================
    // Relabelling
    // ========================================================================

    /// Exchange the two row categories (negates the latent correlation).
    pub fn swap_rows(&self) -> Self {
        Self {
            a: self.c,
            b: self.d,
            c: self.a,
            d: self.b,
        }
    }

    /// Exchange the two column categories (negates the latent correlation).
    pub fn swap_columns(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            c: self.d,
            d: self.c,
        }
    }

    /// Exchange the roles of the two variables.
    pub fn transpose(&self) -> Self {
        Self {
            a: self.a,
            b: self.c,
            c: self.b,
            d: self.d,
        }
    }
}
