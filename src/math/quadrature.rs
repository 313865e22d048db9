//! Gauss–Legendre quadrature rules.
//!
//! ## Purpose
//!
//! Fixed-order Gauss–Legendre rules used by the legacy TET8 (8 points) and
//! AS 116 (16 points) solvers to integrate the normal and bivariate normal
//! densities.
//!
//! ## Design notes
//!
//! * Rules store only the positive half of the symmetric abscissa set.
//! * `integrate` maps `[-1, 1]` onto `[lo, hi]`; `hi < lo` yields the signed
//!   integral.

/// A symmetric Gauss–Legendre rule on `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct GaussLegendre {
    /// Positive abscissas.
    pub nodes: &'static [f64],
    /// Weights matching `nodes`.
    pub weights: &'static [f64],
}

/// 8-point rule.
pub const GL8: GaussLegendre = GaussLegendre {
    nodes: &[
        0.183_434_642_495_649_8,
        0.525_532_409_916_329_0,
        0.796_666_477_413_626_7,
        0.960_289_856_497_536_3,
    ],
    weights: &[
        0.362_683_783_378_362_0,
        0.313_706_645_877_887_3,
        0.222_381_034_453_374_5,
        0.101_228_536_290_376_3,
    ],
};

/// 16-point rule.
pub const GL16: GaussLegendre = GaussLegendre {
    nodes: &[
        0.095_012_509_837_637_4,
        0.281_603_550_779_258_9,
        0.458_016_777_657_227_4,
        0.617_876_244_402_643_8,
        0.755_404_408_355_003_0,
        0.865_631_202_387_831_8,
        0.944_575_023_073_232_6,
        0.989_400_934_991_649_9,
    ],
    weights: &[
        0.189_450_610_455_068_5,
        0.182_603_415_044_923_6,
        0.169_156_519_395_002_5,
        0.149_595_988_816_576_7,
        0.124_628_971_255_533_9,
        0.095_158_511_682_492_8,
        0.062_253_523_938_647_9,
        0.027_152_459_411_754_1,
    ],
};

impl GaussLegendre {
    /// Number of evaluation points.
    pub fn order(&self) -> usize {
        2 * self.nodes.len()
    }

    /// Integrate `f` over `[lo, hi]`.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F, lo: f64, hi: f64) -> f64 {
        let mid = 0.5 * (lo + hi);
        let half = 0.5 * (hi - lo);

        let mut sum = 0.0;
        for (&x, &w) in self.nodes.iter().zip(self.weights) {
            sum += w * (f(mid - half * x) + f(mid + half * x));
        }
        sum * half
    }
}
