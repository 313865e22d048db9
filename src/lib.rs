//! # Tetrachoric — latent correlation of 2x2 tables for Rust
//!
//! Estimators of the tetrachoric correlation: the Pearson correlation of a
//! bivariate normal distribution whose dichotomisation at two thresholds
//! produced an observed fourfold table.
//!
//! ## What is the tetrachoric correlation?
//!
//! Two binary variables are often coarse readings of continuous traits (pass
//! or fail on an item, above or below a cut-off). Assuming the traits are
//! jointly normal, the table
//!
//! ```text
//!            y = 1   y = 0
//!   x = 1      a       b
//!   x = 0      c       d
//! ```
//!
//! fixes the two thresholds through its margins, `h = Φ⁻¹((a+b)/n)` and
//! `k = Φ⁻¹((a+c)/n)`, and the correlation through the cell proportion:
//!
//! ```text
//! Φ₂(h, k; r) = a / n
//! ```
//!
//! Every iterative estimator in this crate solves that equation for `r`.
//!
//! **Estimators:**
//! - `Divgi` (default): closed-form starting value and ten Newton steps
//! - `Search`: decimal-place search, derivative free
//! - `Kirk`: the TET8 quadrature routine (1973)
//! - `Brown`: Applied Statistics algorithm AS 116 (1977)
//! - Closed-form approximations: `Cosine`, `Edwards`, `Digby`,
//!   `BeckerClogg`, `BonettPrice`
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use tetrachoric_rs::prelude::*;
//!
//! let r = tetrachoric(50, 10, 10, 30, "divgi")?;
//! assert!((r - 0.7963).abs() < 1e-3);
//! # Result::<(), TetrachoricError>::Ok(())
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use tetrachoric_rs::prelude::*;
//!
//! let model = Tetrachoric::new()
//!     .method(Brown)                // AS 116
//!     .return_se()                  // Asymptotic and null standard errors
//!     .confidence_interval(0.95)    // Fisher-z interval
//!     .build()?;
//!
//! let result = model.estimate_counts(50, 10, 10, 30)?;
//! println!("{}", result);
//!
//! let ci = result.confidence_interval.expect("interval requested");
//! assert!(ci.lower < result.r && result.r < ci.upper);
//! # Result::<(), TetrachoricError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Method:      brown
//!   Path:        Series
//!   Iterations:  5
//!   Total (n):   100
//!
//! Estimate:
//!   r:           0.796341
//!   Std_Err:     0.078297
//!   Std_Err (0): 0.160793
//!   95% CI:     [0.584363, 0.906583]
//! ```
//!
//! ### Result and Error Handling
//!
//! Every estimate returns `Result<_, TetrachoricError>`. Invalid tables,
//! degenerate margins and solvers that fail to converge are reported as
//! distinct variants; no estimator returns a sentinel value.
//!
//! ```rust
//! use tetrachoric_rs::prelude::*;
//!
//! // First row is empty: the row threshold is undefined.
//! match tetrachoric(0, 0, 10, 20, "kirk") {
//!     Err(TetrachoricError::DegenerateTable { margin }) => assert_eq!(margin, "row 1"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ### Binary Data
//!
//! ```rust
//! use tetrachoric_rs::prelude::*;
//!
//! let item1 = [true, true, false, true, false, false, true, false];
//! let item2 = [true, false, false, true, false, true, true, false];
//! let item3 = [false, true, false, true, true, false, true, false];
//!
//! let model = Tetrachoric::new().build()?;
//! let matrix = model.matrix(&[&item1[..], &item2[..], &item3[..]])?;
//!
//! assert_eq!(matrix.dimension(), 3);
//! assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
//! # Result::<(), TetrachoricError>::Ok(())
//! ```
//!
//! ## Bivariate Normal Backend
//!
//! `Search` and `Divgi` evaluate the bivariate normal CDF through the
//! [`BivariateNormalCdf`](prelude::BivariateNormalCdf) trait. The default
//! backend is Genz's BVN algorithm; any other implementation can be injected
//! with `.bivariate_normal(..)`.
//!
//! ## Logging
//!
//! Solvers emit `tracing` events: `debug` for shortcuts, regime switches and
//! final estimates, `trace` for every iteration. Install any subscriber to
//! see them.
//!
//! ## References
//!
//! - Divgi, D. R. (1979). "Calculation of the tetrachoric correlation coefficient"
//! - Kirk, D. B. (1973). "On the numerical approximation of the bivariate normal (tetrachoric) correlation coefficient"
//! - Brown, M. B. (1977). "Algorithm AS 116: The tetrachoric correlation and its asymptotic standard error"
//! - Genz, A. (2004). "Numerical computation of rectangular bivariate and trivariate normal and t probabilities"
//! - Bonett, D. G. & Price, R. M. (2005). "Inferential methods for the tetrachoric correlation coefficient"

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the fourfold table and the shared error type.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the univariate normal functions, the bivariate normal CDF
// capability and Gauss–Legendre quadrature.
mod math;

// Layer 3: Algorithms - the estimators.
//
// Contains search, divgi, kirk, brown and the closed-form approximations.
mod algorithms;

// Layer 4: Evaluation - post-estimation diagnostics.
//
// Contains standard errors and confidence intervals.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains validation, dispatch and result assembly.
mod engine;

// Layer 6: Adapters - execution adapters.
//
// Contains the batch estimator and the pairwise correlation matrix.
mod adapters;

// High-level fluent API for tetrachoric estimation.
//
// Provides the `Tetrachoric` builder and the `tetrachoric` function.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard tetrachoric prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use tetrachoric_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        BatchTetrachoric, BivariateNormalCdf, ConfidenceInterval, FourFoldTable,
        GenzBivariateNormal, Method,
        Method::{BeckerClogg, BonettPrice, Brown, Cosine, Digby, Divgi, Edwards, Kirk, Search},
        SolutionPath, TetrachoricBuilder as Tetrachoric, TetrachoricConfig, TetrachoricError,
        TetrachoricMatrix, TetrachoricResult, tetrachoric,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal estimators.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
