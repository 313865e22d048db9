//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides the execution adapters returned by the builder:
//! - The batch estimator for single tables, counts and indicators
//! - The pairwise correlation matrix over binary columns
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Configured estimator for tables and indicators.
pub mod batch;

/// Pairwise correlation matrix.
pub mod matrix;
