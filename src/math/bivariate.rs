//! Bivariate standard normal distribution.
//!
//! ## Purpose
//!
//! This module defines the `BivariateNormalCdf` capability that the `search`
//! and `divgi` solvers are written against, and its default backend, Genz's
//! BVN algorithm.
//!
//! ## Design notes
//!
//! * **Injected**: Solvers are generic over the trait, so a different backend
//!   can be swapped in without touching solver code.
//! * **Algorithm**: Drezner–Wesolowsky integration as refined by Genz (2004):
//!   6, 12 or 20-point Gauss–Legendre depending on `|rho|`, with an
//!   asymptotic expansion for `|rho| >= 0.925`.
//!
//! ## Key concepts
//!
//! * `cdf(x, y, rho) = P(X <= x, Y <= y)` for standard normals with correlation `rho`.
//! * `density` is `∂cdf/∂rho`, which is also the joint density at `(x, y)`.
//!
//! ## Invariants
//!
//! * `cdf` is clamped to `[0, 1]` and increasing in `rho`.
//! * `cdf(x, y, 0) = Φ(x)Φ(y)`.
//!
//! ## Non-goals
//!
//! * This module does not handle non-standardised margins.

// Internal dependencies
use crate::math::normal::{self, TWO_PI};

// ============================================================================
// Capability
// ============================================================================

/// Lower-orthant probability of a standard bivariate normal.
pub trait BivariateNormalCdf {
    /// `P(X <= x, Y <= y)` with correlation `rho`.
    fn cdf(&self, x: f64, y: f64, rho: f64) -> f64;

    /// Joint density at `(x, y)` with correlation `rho`.
    fn density(&self, x: f64, y: f64, rho: f64) -> f64 {
        density(x, y, rho)
    }
}

/// Standard bivariate normal density.
///
/// Returns zero for `|rho| >= 1`, where the density is singular.
#[inline]
pub fn density(x: f64, y: f64, rho: f64) -> f64 {
    let one_minus = 1.0 - rho * rho;
    if one_minus <= 0.0 {
        return 0.0;
    }
    let q = (x * x - 2.0 * rho * x * y + y * y) / (2.0 * one_minus);
    (-q).exp() / (TWO_PI * one_minus.sqrt())
}

// ============================================================================
// Genz backend
// ============================================================================

/// Genz's bivariate normal CDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenzBivariateNormal;

// Half rules on [0, 2]: evaluated at 1 - x and 1 + x.
const W6: [f64; 3] = [
    0.171_324_492_379_170_5,
    0.360_761_573_048_138_4,
    0.467_913_934_572_690_4,
];
const X6: [f64; 3] = [
    0.932_469_514_203_152_2,
    0.661_209_386_466_264_7,
    0.238_619_186_083_197_0,
];

const W12: [f64; 6] = [
    0.047_175_336_386_511_77,
    0.106_939_325_995_318_3,
    0.160_078_328_543_346_4,
    0.203_167_426_723_065_9,
    0.233_492_536_538_354_7,
    0.249_147_045_813_402_9,
];
const X12: [f64; 6] = [
    0.981_560_634_246_719_1,
    0.904_117_256_370_475_0,
    0.769_902_674_194_305_0,
    0.587_317_954_286_617_1,
    0.367_831_498_998_180_2,
    0.125_233_408_511_469_2,
];

const W20: [f64; 10] = [
    0.017_614_007_139_152_12,
    0.040_601_429_800_386_94,
    0.062_672_048_334_109_06,
    0.083_276_741_576_704_75,
    0.101_930_119_817_240_4,
    0.118_194_531_961_518_4,
    0.131_688_638_449_176_6,
    0.142_096_109_318_382_1,
    0.149_172_986_472_603_7,
    0.152_753_387_130_725_9,
];
const X20: [f64; 10] = [
    0.993_128_599_185_094_9,
    0.963_971_927_277_913_8,
    0.912_234_428_251_325_9,
    0.839_116_971_822_218_8,
    0.746_331_906_460_150_8,
    0.636_053_680_726_515_0,
    0.510_867_001_950_827_1,
    0.373_706_088_715_419_6,
    0.227_785_851_141_645_1,
    0.076_526_521_133_497_33,
];

/// Exponent floor below which terms are treated as zero.
const EXP_FLOOR: f64 = -100.0;

impl GenzBivariateNormal {
    fn rule(r: f64) -> (&'static [f64], &'static [f64]) {
        let ar = r.abs();
        if ar < 0.3 {
            (&W6, &X6)
        } else if ar < 0.75 {
            (&W12, &X12)
        } else {
            (&W20, &X20)
        }
    }

    /// Upper-orthant probability `P(X > dh, Y > dk)`.
    fn upper(dh: f64, dk: f64, r: f64) -> f64 {
        if dh == f64::INFINITY || dk == f64::INFINITY {
            return 0.0;
        }
        if dh == f64::NEG_INFINITY {
            return if dk == f64::NEG_INFINITY {
                1.0
            } else {
                normal::cdf(-dk)
            };
        }
        if dk == f64::NEG_INFINITY {
            return normal::cdf(-dh);
        }
        if r == 0.0 {
            return normal::cdf(-dh) * normal::cdf(-dk);
        }

        let (w, x) = Self::rule(r);
        let h = dh;
        let mut k = dk;
        let mut hk = h * k;
        let mut bvn = 0.0;

        if r.abs() < 0.925 {
            let hs = 0.5 * (h * h + k * k);
            let asr = 0.5 * r.asin();
            for (&wi, &xi) in w.iter().zip(x) {
                for node in [1.0 - xi, 1.0 + xi] {
                    let sn = (asr * node).sin();
                    bvn += wi * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
                }
            }
            bvn = bvn * asr / TWO_PI + normal::cdf(-h) * normal::cdf(-k);
        } else {
            if r < 0.0 {
                k = -k;
                hk = -hk;
            }
            if r.abs() < 1.0 {
                let as_ = 1.0 - r * r;
                let mut a = as_.sqrt();
                let bs = (h - k) * (h - k);
                let c = (4.0 - hk) / 8.0;
                let d = (12.0 - hk) / 80.0;

                let asr = -0.5 * (bs / as_ + hk);
                if asr > EXP_FLOOR {
                    bvn = a
                        * asr.exp()
                        * (1.0 - c * (bs - as_) * (1.0 - d * bs) / 3.0 + c * d * as_ * as_);
                }
                if hk > EXP_FLOOR {
                    let b = bs.sqrt();
                    let sp = TWO_PI.sqrt() * normal::cdf(-b / a);
                    bvn -= (-0.5 * hk).exp() * sp * b * (1.0 - c * bs * (1.0 - d * bs) / 3.0);
                }

                a *= 0.5;
                let mut sum = 0.0;
                for (&wi, &xi) in w.iter().zip(x) {
                    for node in [1.0 - xi, 1.0 + xi] {
                        let xs = (a * node) * (a * node);
                        let asr = -0.5 * (bs / xs + hk);
                        if asr > EXP_FLOOR {
                            let sp = 1.0 + c * xs * (1.0 + 5.0 * d * xs);
                            let rs = (1.0 - xs).sqrt();
                            let ep = (-0.5 * hk * xs / ((1.0 + rs) * (1.0 + rs))).exp() / rs;
                            sum += wi * asr.exp() * (sp - ep);
                        }
                    }
                }
                bvn = (a * sum - bvn) / TWO_PI;
            }

            if r > 0.0 {
                bvn += normal::cdf(-h.max(k));
            } else if h >= k {
                bvn = -bvn;
            } else {
                let l = if h < 0.0 {
                    normal::cdf(k) - normal::cdf(h)
                } else {
                    normal::cdf(-h) - normal::cdf(-k)
                };
                bvn = l - bvn;
            }
        }

        bvn.clamp(0.0, 1.0)
    }
}

impl BivariateNormalCdf for GenzBivariateNormal {
    fn cdf(&self, x: f64, y: f64, rho: f64) -> f64 {
        Self::upper(-x, -y, rho)
    }
}
