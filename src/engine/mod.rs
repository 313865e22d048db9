//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates estimation:
//! - Validation of tables and parameters
//! - Dispatch to the selected estimator
//! - Assembly of the result and its diagnostics
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Estimation executor and configuration.
pub mod executor;

/// Result type.
pub mod output;

/// Input validation.
pub mod validator;
