//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numerical building blocks used by the
//! estimators:
//! - Univariate standard normal CDF, density and quantile
//! - The bivariate normal CDF capability and its default backend
//! - Gauss–Legendre quadrature rules
//!
//! These contain no estimator-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Univariate standard normal functions.
pub mod normal;

/// Bivariate normal CDF capability and Genz backend.
pub mod bivariate;

/// Gauss–Legendre quadrature rules.
pub mod quadrature;
