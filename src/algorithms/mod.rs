//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the tetrachoric estimators themselves:
//! - Decimal-place search on the bivariate normal CDF
//! - Divgi's Newton solver
//! - Kirk's TET8 quadrature solver
//! - Brown's AS 116 series/quadrature solver
//! - Closed-form odds-ratio approximations
//!
//! Every solver assumes a validated table with non-empty margins.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Solver outcomes and margin thresholds.
pub mod outcome;

/// Estimator selection.
pub mod method;

/// Decimal-place search.
pub mod search;

/// Divgi's Newton solver.
pub mod divgi;

/// Kirk's TET8 solver.
pub mod kirk;

/// Brown's AS 116 solver.
pub mod brown;

/// Closed-form approximations and Yule coefficients.
pub mod approximations;
