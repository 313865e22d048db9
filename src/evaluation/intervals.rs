//! Confidence intervals for a tetrachoric estimate.
//!
//! ## Purpose
//!
//! Wald intervals on Fisher's z scale, transformed back so both bounds stay
//! inside [-1, 1].
//!
//! ## Key concepts
//!
//! ```text
//! z = atanh(r),  SE_z = SE / (1 − r²)
//! [tanh(z − c·SE_z), tanh(z + c·SE_z)],  c = Φ⁻¹(1 − (1 − level)/2)
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::normal;

/// A two-sided confidence interval for `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Coverage level in (0, 1).
    pub level: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Interval width.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Fisher-z interval around `r` with standard error `se`.
///
/// Returns `None` for `|r| >= 1`, where the z transform is infinite.
pub fn fisher_interval(r: f64, se: f64, level: f64) -> Option<ConfidenceInterval> {
    if !(r.abs() < 1.0) || !se.is_finite() {
        return None;
    }

    let z = r.atanh();
    let se_z = se / (1.0 - r * r);
    let crit = normal::quantile(1.0 - (1.0 - level) / 2.0);

    Some(ConfidenceInterval {
        lower: (z - crit * se_z).tanh(),
        upper: (z + crit * se_z).tanh(),
        level,
    })
}
