//! High-level API for tetrachoric estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder that produces a reusable estimator, and the one-shot
//! [`tetrachoric`] function taking four counts and a method name.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Deferred errors**: Duplicate parameters and unparsable method names are
//!   recorded while configuring and surfaced by `.build()`.
//! * **Pluggable**: The bivariate normal CDF backend is a type parameter.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`TetrachoricBuilder`] via `Tetrachoric::new()`.
//! 2. Chain configuration methods (`.method()`, `.return_se()`, etc.).
//! 3. Call `.build()` to obtain a [`BatchTetrachoric`] estimator.

// External dependencies
use num_traits::ToPrimitive;

// Internal dependencies
use crate::engine::executor::TetrachoricExecutor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::adapters::batch::BatchTetrachoric;
pub use crate::adapters::matrix::TetrachoricMatrix;
pub use crate::algorithms::method::Method;
pub use crate::algorithms::outcome::SolutionPath;
pub use crate::engine::executor::TetrachoricConfig;
pub use crate::engine::output::TetrachoricResult;
pub use crate::evaluation::intervals::ConfidenceInterval;
pub use crate::math::bivariate::{BivariateNormalCdf, GenzBivariateNormal};
pub use crate::primitives::errors::TetrachoricError;
pub use crate::primitives::table::FourFoldTable;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a tetrachoric estimator.
#[derive(Debug, Clone)]
pub struct TetrachoricBuilder<B = GenzBivariateNormal> {
    /// Estimator to run.
    pub method: Option<Method>,

    /// Whether to compute standard errors.
    pub return_se: Option<bool>,

    /// Confidence interval level.
    pub confidence_level: Option<f64>,

    /// Bivariate normal CDF backend.
    pub backend: B,

    /// Whether the backend was set explicitly.
    #[doc(hidden)]
    pub backend_set: bool,

    /// Deferred error from parsing a method name.
    #[doc(hidden)]
    pub deferred_error: Option<TetrachoricError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for TetrachoricBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TetrachoricBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            method: None,
            return_se: None,
            confidence_level: None,
            backend: GenzBivariateNormal,
            backend_set: false,
            deferred_error: None,
            duplicate_param: None,
        }
    }
}

impl<B: BivariateNormalCdf> TetrachoricBuilder<B> {
    /// Set the estimator (default: [`Method::Divgi`]).
    pub fn method(mut self, method: Method) -> Self {
        if self.method.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the estimator by name (e.g. `"brown"`).
    pub fn method_name(self, name: &str) -> Self {
        match name.parse::<Method>() {
            Ok(method) => self.method(method),
            Err(err) => {
                let mut builder = self;
                if builder.method.is_some() {
                    builder.duplicate_param = Some("method");
                }
                builder.deferred_error.get_or_insert(err);
                builder
            }
        }
    }

    /// Compute the asymptotic and null standard errors.
    pub fn return_se(mut self) -> Self {
        if self.return_se.is_some() {
            self.duplicate_param = Some("return_se");
        }
        self.return_se = Some(true);
        self
    }

    /// Compute a Fisher-z confidence interval at `level` (e.g. 0.95).
    ///
    /// Implies standard errors.
    pub fn confidence_interval(mut self, level: f64) -> Self {
        if self.confidence_level.is_some() {
            self.duplicate_param = Some("confidence_interval");
        }
        self.confidence_level = Some(level);
        self
    }

    /// Replace the bivariate normal CDF backend.
    pub fn bivariate_normal<C: BivariateNormalCdf>(self, backend: C) -> TetrachoricBuilder<C> {
        let duplicate_param = if self.backend_set {
            Some("bivariate_normal")
        } else {
            self.duplicate_param
        };
        TetrachoricBuilder {
            method: self.method,
            return_se: self.return_se,
            confidence_level: self.confidence_level,
            backend,
            backend_set: true,
            deferred_error: self.deferred_error,
            duplicate_param,
        }
    }

    /// Validate the configuration and build the estimator.
    pub fn build(self) -> Result<BatchTetrachoric<B>, TetrachoricError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate interval level
        if let Some(level) = self.confidence_level {
            Validator::validate_interval_level(level)?;
        }

        let config = TetrachoricConfig {
            method: self.method.unwrap_or_default(),
            return_se: self.return_se.unwrap_or(false),
            confidence_level: self.confidence_level,
        };

        Ok(BatchTetrachoric::new(config, self.backend))
    }
}

// ============================================================================
// Convenience Function
// ============================================================================

/// Tetrachoric correlation of the table `[[a, b], [c, d]]` by the named method.
///
/// `method` is one of `"search"`, `"kirk"`, `"brown"`, `"divgi"` or a
/// closed-form name such as `"bonett-price"`.
pub fn tetrachoric<T: ToPrimitive>(
    a: T,
    b: T,
    c: T,
    d: T,
    method: &str,
) -> Result<f64, TetrachoricError> {
    let method: Method = method.parse()?;
    let executor = TetrachoricExecutor::new(
        TetrachoricConfig {
            method,
            ..TetrachoricConfig::default()
        },
        GenzBivariateNormal,
    );
    executor
        .estimate_point(&FourFoldTable::new(a, b, c, d))
        .map(|outcome| outcome.r)
}
