//! Batch adapter for tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module provides the configured estimator returned by the builder. It
//! accepts tables, raw counts or paired binary indicators, one at a time or
//! as a batch.
//!
//! ## Design notes
//!
//! * **Delegation**: Every estimate is delegated to the execution engine.
//! * **Reusable**: The estimator is immutable; it can be reused for any
//!   number of tables.
//!
//! ## Invariants
//!
//! * Batch output order matches input order.
//!
//! ## Non-goals
//!
//! * This adapter does not substitute values for failed tables; the first
//!   error is returned.

// External dependencies
use num_traits::ToPrimitive;

// Internal dependencies
use crate::adapters::matrix::TetrachoricMatrix;
use crate::engine::executor::{TetrachoricConfig, TetrachoricExecutor};
use crate::engine::output::TetrachoricResult;
use crate::engine::validator::Validator;
use crate::math::bivariate::{BivariateNormalCdf, GenzBivariateNormal};
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

// ============================================================================
// Batch Estimator
// ============================================================================

/// Configured tetrachoric estimator.
#[derive(Debug, Clone)]
pub struct BatchTetrachoric<B = GenzBivariateNormal> {
    executor: TetrachoricExecutor<B>,
}

impl<B: BivariateNormalCdf> BatchTetrachoric<B> {
    /// Wrap a configured executor.
    pub(crate) fn new(config: TetrachoricConfig, backend: B) -> Self {
        Self {
            executor: TetrachoricExecutor::new(config, backend),
        }
    }

    /// The estimation settings.
    pub fn config(&self) -> &TetrachoricConfig {
        &self.executor.config
    }

    /// Estimate the tetrachoric correlation of `table`.
    pub fn estimate(&self, table: &FourFoldTable) -> Result<TetrachoricResult, TetrachoricError> {
        self.executor.run(table)
    }

    /// Estimate from four cell counts.
    pub fn estimate_counts<T: ToPrimitive>(
        &self,
        a: T,
        b: T,
        c: T,
        d: T,
    ) -> Result<TetrachoricResult, TetrachoricError> {
        self.estimate(&FourFoldTable::new(a, b, c, d))
    }

    /// Estimate from two paired binary variables.
    pub fn estimate_indicators(
        &self,
        x: &[bool],
        y: &[bool],
    ) -> Result<TetrachoricResult, TetrachoricError> {
        Validator::validate_lengths(x.len(), y.len())?;
        self.estimate(&FourFoldTable::from_indicators(x, y)?)
    }

    /// Estimate every table in order.
    pub fn estimate_all(
        &self,
        tables: &[FourFoldTable],
    ) -> Result<Vec<TetrachoricResult>, TetrachoricError> {
        tables.iter().map(|table| self.estimate(table)).collect()
    }

    /// Pairwise tetrachoric correlation matrix of binary columns.
    pub fn matrix<C: AsRef<[bool]>>(
        &self,
        columns: &[C],
    ) -> Result<TetrachoricMatrix, TetrachoricError> {
        TetrachoricMatrix::from_columns(&self.executor, columns)
    }
}
