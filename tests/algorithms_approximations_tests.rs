#![cfg(feature = "dev")]
//! Tests for the closed-form approximations and method selection.
//!
//! ## Test Organization
//!
//! 1. **Association** - Yule's Q and Y
//! 2. **Approximations** - Cosine, odds-ratio powers and Bonett–Price
//! 3. **Method** - Names, parsing and closed-form dispatch

use approx::assert_relative_eq;

use tetrachoric_rs::internals::algorithms::approximations::{self, *};
use tetrachoric_rs::internals::algorithms::method::Method;
use tetrachoric_rs::internals::primitives::errors::TetrachoricError;
use tetrachoric_rs::internals::primitives::table::FourFoldTable;

fn reference() -> FourFoldTable {
    FourFoldTable::new(50, 10, 10, 30)
}

// ============================================================================
// Association Tests
// ============================================================================

#[test]
fn test_yule_coefficients() {
    let t = reference();
    assert_relative_eq!(yule_q(&t), 0.875, epsilon = 1e-15);
    assert_relative_eq!(yule_y(&t), 0.589_573_8, epsilon = 1e-7);

    let neg = t.swap_columns();
    assert_relative_eq!(yule_q(&neg), -0.875, epsilon = 1e-15);
}

// ============================================================================
// Approximation Tests
// ============================================================================

#[test]
fn test_cosine_approximation() {
    assert_relative_eq!(cosine(&reference()), 0.799_282_5, epsilon = 1e-7);
    assert_relative_eq!(cosine(&FourFoldTable::new(25, 25, 25, 25)), 0.0, epsilon = 1e-15);

    // Zero cells drive the odds ratio to its limits.
    assert_relative_eq!(cosine(&FourFoldTable::new(5, 0, 3, 4)), 1.0);
    assert_relative_eq!(cosine(&FourFoldTable::new(0, 5, 3, 4)), -1.0);
}

#[test]
fn test_odds_ratio_power_family() {
    let t = reference();
    assert_relative_eq!(edwards(&t), 0.786_980_3, epsilon = 1e-7);
    assert_relative_eq!(digby(&t), 0.768_035_0, epsilon = 1e-7);
    assert_relative_eq!(becker_clogg(&t), 0.413_692_6, epsilon = 1e-7);

    // Exponent 1/2 gives Yule's Y and exponent 1 gives Yule's Q.
    assert_relative_eq!(odds_ratio_power(&t, 0.5), yule_y(&t), epsilon = 1e-15);
    assert_relative_eq!(odds_ratio_power(&t, 1.0), yule_q(&t), epsilon = 1e-15);
}

#[test]
fn test_odds_ratio_power_zero_cells() {
    assert_eq!(edwards(&FourFoldTable::new(5, 0, 3, 4)), 1.0);
    assert_eq!(digby(&FourFoldTable::new(5, 2, 0, 4)), 1.0);
    assert_eq!(becker_clogg(&FourFoldTable::new(0, 2, 3, 4)), -1.0);
}

#[test]
fn test_bonett_price() {
    assert_relative_eq!(bonett_price(&reference()), 0.783_805_2, epsilon = 1e-7);
    assert_relative_eq!(
        bonett_price(&FourFoldTable::new(40, 20, 10, 30)),
        0.587_842_9,
        epsilon = 1e-7
    );

    // The 0.5 correction keeps zero cells finite.
    let r = bonett_price(&FourFoldTable::new(5, 0, 3, 4));
    assert!(r > 0.0 && r < 1.0);
}

/// Swapping both variables preserves every approximation.
#[test]
fn test_approximations_relabelling() {
    let t = FourFoldTable::new(12, 7, 3, 21);
    let swapped = t.swap_rows().swap_columns();
    for f in [cosine, edwards, digby, becker_clogg, bonett_price] {
        assert_relative_eq!(f(&t), f(&swapped), epsilon = 1e-12);
    }

    // Swapping one variable flips the sign of the odds-ratio family.
    assert_relative_eq!(edwards(&t.swap_rows()), -edwards(&t), epsilon = 1e-12);
    assert_relative_eq!(cosine(&t.swap_rows()), -cosine(&t), epsilon = 1e-12);
}

// ============================================================================
// Method Tests
// ============================================================================

#[test]
fn test_method_names_roundtrip() {
    for method in Method::ALL {
        assert_eq!(method.name().parse::<Method>().unwrap(), method);
        assert_eq!(method.to_string(), method.name());
    }
    assert_eq!(Method::default(), Method::Divgi);
}

#[test]
fn test_method_aliases() {
    assert_eq!("TET8".parse::<Method>().unwrap(), Method::Kirk);
    assert_eq!("as116".parse::<Method>().unwrap(), Method::Brown);
    assert_eq!("cos_pi".parse::<Method>().unwrap(), Method::Cosine);
    assert_eq!("pearson-q4".parse::<Method>().unwrap(), Method::Cosine);
    assert_eq!(" Becker_Clogg ".parse::<Method>().unwrap(), Method::BeckerClogg);
}

#[test]
fn test_method_unknown() {
    let err = "polychoric".parse::<Method>().unwrap_err();
    assert_eq!(err, TetrachoricError::UnknownMethod("polychoric".to_string()));
}

#[test]
fn test_method_classification() {
    assert_eq!(Method::ITERATIVE.len(), 4);
    for method in Method::ALL {
        assert_eq!(method.is_iterative(), Method::ITERATIVE.contains(&method));
        assert_eq!(method.closed_form(&reference()).is_none(), method.is_iterative());
    }
    assert!(Method::Brown.resolves_zero_cells());
    assert!(!Method::Kirk.resolves_zero_cells());
}

#[test]
fn test_method_closed_form_dispatch() {
    let t = reference();
    assert_eq!(Method::Cosine.closed_form(&t), Some(approximations::cosine(&t)));
    assert_eq!(Method::Digby.closed_form(&t), Some(approximations::digby(&t)));
    assert_eq!(Method::BonettPrice.closed_form(&t), Some(approximations::bonett_price(&t)));
}
