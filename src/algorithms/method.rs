//! Estimator selection.
//!
//! ## Purpose
//!
//! This module defines `Method`, the selector shared by the builder, the
//! executor and the matrix adapter. Methods parse from their legacy string
//! names so callers holding a method name can dispatch without a lookup table.
//!
//! ## Key concepts
//!
//! * **Iterative**: `search`, `divgi`, `kirk`, `brown` solve `Φ₂(h, k; r) = a/n`.
//! * **Closed form**: odds-ratio approximations that need no solver.
//!
//! ## Non-goals
//!
//! * This module does not run any estimator (handled by the executor).

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::approximations;
use crate::primitives::errors::TetrachoricError;
use crate::primitives::table::FourFoldTable;

// ============================================================================
// Method
// ============================================================================

/// Tetrachoric estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Method {
    /// Decimal-place search on the bivariate normal CDF.
    Search,

    /// Divgi (1979) starting value with ten Newton steps - default.
    #[default]
    Divgi,

    /// Kirk (1973) TET8 quadrature solver.
    Kirk,

    /// Brown (1977) AS 116 series and quadrature solver.
    ///
    /// A single zero cell is continuity-adjusted by 0.5 rather than treated as
    /// perfect, so Brown returns an interior value where `Search`, `Divgi` and
    /// `Kirk` return `±1`: `50/0/10/30` gives about 0.9696 instead of 1. Only
    /// two zero cells on the same diagonal give `±1`. The cells the shift is
    /// taken from must hold at least 0.5.
    Brown,

    /// Pearson's Q4 (cos-pi) approximation.
    Cosine,

    /// Edwards' odds-ratio approximation.
    Edwards,

    /// Digby's odds-ratio approximation.
    Digby,

    /// Becker and Clogg's odds-ratio approximation.
    BeckerClogg,

    /// Bonett and Price's approximation.
    BonettPrice,
}

impl Method {
    /// Every method, iterative ones first.
    pub const ALL: [Method; 9] = [
        Method::Search,
        Method::Divgi,
        Method::Kirk,
        Method::Brown,
        Method::Cosine,
        Method::Edwards,
        Method::Digby,
        Method::BeckerClogg,
        Method::BonettPrice,
    ];

    /// The four iterative estimators.
    pub const ITERATIVE: [Method; 4] = [Method::Search, Method::Divgi, Method::Kirk, Method::Brown];

    /// Canonical name, as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Divgi => "divgi",
            Self::Kirk => "kirk",
            Self::Brown => "brown",
            Self::Cosine => "cosine",
            Self::Edwards => "edwards",
            Self::Digby => "digby",
            Self::BeckerClogg => "becker-clogg",
            Self::BonettPrice => "bonett-price",
        }
    }

    /// Whether the method solves `Φ₂(h, k; r) = a/n` iteratively.
    pub fn is_iterative(&self) -> bool {
        matches!(self, Self::Search | Self::Divgi | Self::Kirk | Self::Brown)
    }

    /// Whether the method handles perfect and zero-cell tables itself.
    pub fn resolves_zero_cells(&self) -> bool {
        matches!(self, Self::Brown)
    }

    /// Closed-form estimate, or `None` for iterative methods.
    pub fn closed_form(&self, table: &FourFoldTable) -> Option<f64> {
        match self {
            Self::Cosine => Some(approximations::cosine(table)),
            Self::Edwards => Some(approximations::edwards(table)),
            Self::Digby => Some(approximations::digby(table)),
            Self::BeckerClogg => Some(approximations::becker_clogg(table)),
            Self::BonettPrice => Some(approximations::bonett_price(table)),
            Self::Search | Self::Divgi | Self::Kirk | Self::Brown => None,
        }
    }
}

impl FromStr for Method {
    type Err = TetrachoricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "search" => Ok(Self::Search),
            "divgi" => Ok(Self::Divgi),
            "kirk" | "tet8" => Ok(Self::Kirk),
            "brown" | "as116" => Ok(Self::Brown),
            "cosine" | "cos-pi" | "pearson-q4" => Ok(Self::Cosine),
            "edwards" => Ok(Self::Edwards),
            "digby" => Ok(Self::Digby),
            "becker-clogg" => Ok(Self::BeckerClogg),
            "bonett-price" => Ok(Self::BonettPrice),
            _ => Err(TetrachoricError::UnknownMethod(s.to_string())),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}
