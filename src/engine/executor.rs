//! Execution engine for tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module orchestrates a single estimation: it validates the table,
//! resolves perfect tables, dispatches to the selected estimator and
//! assembles the result with the requested diagnostics.
//!
//! ## Design notes
//!
//! * **Injected backend**: The bivariate normal CDF is a type parameter so
//!   solvers are testable against any implementation.
//! * **Shortcut**: For search, divgi and kirk a zero cell fixes the answer.
//!   `b = 0` or `c = 0` forces `Φ₂(h, k; r) = a/n` only at `r = 1`, and
//!   `a = 0` or `d = 0` only at `r = -1`. AS 116 handles zero cells itself.
//! * **Stateless**: Each call is independent; identical inputs give
//!   bit-identical outputs.
//!
//! ## Key concepts
//!
//! * **Execution**: Validate -> Shortcut -> Solve -> Diagnostics.
//!
//! ## Invariants
//!
//! * Solvers only ever see tables that passed `Validator::validate_table`.
//!
//! ## Non-goals
//!
//! * This module does not parse method names (handled by `Method`).
//! * This module does not fall back to another method on failure.

// External dependencies
use tracing::debug;

// Internal dependencies
use crate::algorithms::method::Method;
use crate::algorithms::outcome::SolverOutcome;
use crate::algorithms::{brown, divgi, kirk, search};
use crate::engine::output::TetrachoricResult;
use crate::engine::validator::Validator;
use crate::evaluation::intervals::fisher_interval;
use crate::evaluation::standard_error::{null_standard_error, standard_error};
use crate::math::bivariate::{BivariateNormalCdf, GenzBivariateNormal};
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration of one estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetrachoricConfig {
    /// Estimator to run.
    pub method: Method,

    /// Whether to compute standard errors.
    pub return_se: bool,

    /// Confidence interval level, if an interval is requested.
    pub confidence_level: Option<f64>,
}

impl Default for TetrachoricConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            return_se: false,
            confidence_level: None,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs estimations against a bivariate normal backend.
#[derive(Debug, Clone, Default)]
pub struct TetrachoricExecutor<B = GenzBivariateNormal> {
    /// Estimation settings.
    pub config: TetrachoricConfig,

    /// Bivariate normal CDF used by search and divgi.
    pub backend: B,
}

impl<B: BivariateNormalCdf> TetrachoricExecutor<B> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create an executor from a configuration and backend.
    pub fn new(config: TetrachoricConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Set the estimator.
    pub fn method(mut self, method: Method) -> Self {
        self.config.method = method;
        self
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Estimate `r` and the requested diagnostics for `table`.
    pub fn run(&self, table: &FourFoldTable) -> Result<TetrachoricResult, TetrachoricError> {
        let method = self.config.method;
        let outcome = self.estimate_point(table)?;
        debug!(
            method = method.name(),
            r = outcome.r,
            iterations = outcome.iterations,
            "tetrachoric estimate"
        );

        let wants_se = self.config.return_se || self.config.confidence_level.is_some();
        let (se, se0) = if wants_se {
            (
                standard_error(table, outcome.r),
                Some(null_standard_error(table)),
            )
        } else {
            (None, None)
        };

        let confidence_interval = match (self.config.confidence_level, se) {
            (Some(level), Some(se)) => fisher_interval(outcome.r, se, level),
            _ => None,
        };

        Ok(TetrachoricResult {
            r: outcome.r,
            method,
            path: outcome.path,
            iterations: outcome.iterations,
            n: table.n(),
            standard_error: se,
            null_standard_error: se0,
            confidence_interval,
        })
    }

    /// Estimate `r` only.
    pub fn estimate_point(&self, table: &FourFoldTable) -> Result<SolverOutcome, TetrachoricError> {
        Validator::validate_table(table)?;

        let method = self.config.method;
        if let Some(r) = method.closed_form(table) {
            return Ok(SolverOutcome::closed_form(r));
        }

        if !method.resolves_zero_cells() {
            if let Some(r) = Self::perfect_table(table) {
                debug!(method = method.name(), r, "perfect table shortcut");
                return Ok(SolverOutcome::exact(r));
            }
        }

        match method {
            Method::Search => search::solve(table, &self.backend),
            Method::Divgi => divgi::solve(table, &self.backend),
            Method::Kirk => kirk::solve(table),
            Method::Brown => brown::solve(table),
            Method::Cosine
            | Method::Edwards
            | Method::Digby
            | Method::BeckerClogg
            | Method::BonettPrice => Err(TetrachoricError::InvalidInput(format!(
                "method '{}' has no iterative solver",
                method
            ))),
        }
    }

    /// `±1` when a zero cell pins the solution to the boundary.
    fn perfect_table(table: &FourFoldTable) -> Option<f64> {
        if table.b == 0.0 || table.c == 0.0 {
            Some(1.0)
        } else if table.a == 0.0 || table.d == 0.0 {
            Some(-1.0)
        } else {
            None
        }
    }
}
