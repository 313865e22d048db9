//! Pairwise tetrachoric correlation matrix.
//!
//! ## Purpose
//!
//! This module cross-tabulates every pair of binary columns and estimates
//! their tetrachoric correlation, producing a symmetric matrix with a unit
//! diagonal. This is the usual input to factor analysis of binary items.
//!
//! ## Design notes
//!
//! * **Upper triangle**: Each pair is estimated once and mirrored.
//! * **Row-major**: Values are stored in a flat `Vec<f64>`.
//!
//! ## Invariants
//!
//! * `get(i, j) == get(j, i)` and `get(i, i) == 1`.
//!
//! ## Non-goals
//!
//! * This module does not repair matrices that are not positive definite.
//! * This module does not skip or impute pairs whose estimation fails.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::executor::TetrachoricExecutor;
use crate::engine::validator::Validator;
use crate::math::bivariate::BivariateNormalCdf;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

// ============================================================================
// Matrix
// ============================================================================

/// Symmetric matrix of pairwise tetrachoric correlations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetrachoricMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl TetrachoricMatrix {
    /// Estimate the matrix of `columns` with `executor`.
    pub(crate) fn from_columns<B, C>(
        executor: &TetrachoricExecutor<B>,
        columns: &[C],
    ) -> Result<Self, TetrachoricError>
    where
        B: BivariateNormalCdf,
        C: AsRef<[bool]>,
    {
        let p = columns.len();
        Validator::validate_variables(p)?;

        let len = columns[0].as_ref().len();
        for column in &columns[1..] {
            Validator::validate_lengths(len, column.as_ref().len())?;
        }

        let mut values = vec![0.0; p * p];
        for i in 0..p {
            values[i * p + i] = 1.0;
            for j in (i + 1)..p {
                let table =
                    FourFoldTable::from_indicators(columns[i].as_ref(), columns[j].as_ref())?;
                let r = executor.estimate_point(&table)?.r;
                values[i * p + j] = r;
                values[j * p + i] = r;
            }
        }
        debug!(variables = p, observations = len, "tetrachoric matrix");

        Ok(Self {
            dimension: p,
            values,
        })
    }

    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Correlation between variables `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.dimension && j < self.dimension {
            Some(self.values[i * self.dimension + j])
        } else {
            None
        }
    }

    /// Row `i` of the matrix.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.dimension).then(|| &self.values[i * self.dimension..(i + 1) * self.dimension])
    }

    /// Row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Row-major values, consuming the matrix.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl Display for TetrachoricMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for row in self.values.chunks(self.dimension) {
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>9.4}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
