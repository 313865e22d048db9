//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer provides post-estimation diagnostics:
//! - Delta-method and null standard errors
//! - Fisher-z confidence intervals
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Asymptotic standard errors.
pub mod standard_error;

/// Confidence intervals.
pub mod intervals;
