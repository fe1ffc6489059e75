//! Method-style access to the fast maths on primitive floats
//!
//! # Example:
//! ```
//! use fastmaths::FastFloat as _;
//!
//! fastmaths::set_default_tables();
//!
//! let gain = 2.0f32.fast_pow(10.0); // values are approximate!
//! assert!((gain - 1024.0).abs() < 1.0);
//! ```

use std::f64::consts::{LN_2, LOG10_2, LOG2_10, LOG2_E};

use num_traits::Float;

use crate::atan;
use crate::bits::{scale_by_exp2_f64, split_f64_unchecked};
use crate::registry::registry;

/// Fast (approximate) maths functions.
///
/// These read the tables from the process-wide registry and take the
/// unchecked fast path: input outside a function's domain yields an
/// unspecified value rather than an error. Empty registry slots fall back to
/// the built-in tables.
pub trait FastFloat: Float {
    /// Fast (approximate) power: `self^n`
    fn fast_pow(self, n: Self) -> Self;

    /// Fast (approximate) exp: `e^(self)`
    fn fast_exp(self) -> Self;

    /// Fast (approximate) exp2: `2^(self)`
    fn fast_exp2(self) -> Self;

    /// Fast (approximate) exp10 : `10^(self)`
    fn fast_exp10(self) -> Self;

    /// Fast (approximate) natural log
    fn fast_ln(self) -> Self;

    /// Fast (approximate) base 2 logarithm
    fn fast_log2(self) -> Self;

    /// Fast (approximate) base 10 logarithm
    fn fast_log10(self) -> Self;

    /// Fast (approximate) four quadrant arctangent of `self / x`
    fn fast_atan2(self, x: Self) -> Self;
}

impl FastFloat for f32 {
    #[inline]
    fn fast_pow(self, n: Self) -> Self {
        registry().maths_or_default().pow_unchecked(self, n)
    }
    #[inline]
    fn fast_exp(self) -> Self {
        registry().maths_or_default().exp_unchecked(self)
    }
    #[inline]
    fn fast_exp2(self) -> Self {
        registry().maths_or_default().exp2_unchecked(self)
    }
    #[inline]
    fn fast_exp10(self) -> Self {
        registry().maths_or_default().exp10_unchecked(self)
    }
    #[inline]
    fn fast_ln(self) -> Self {
        registry().maths_or_default().ln_unchecked(self)
    }
    #[inline]
    fn fast_log2(self) -> Self {
        registry().maths_or_default().log2_unchecked(self)
    }
    #[inline]
    fn fast_log10(self) -> Self {
        registry().maths_or_default().log10_unchecked(self)
    }
    #[inline]
    fn fast_atan2(self, x: Self) -> Self {
        atan::atan2(self, x)
    }
}

/// Largest `|p|` passed to the f64 exponential. Anything beyond it already
/// saturates to zero or infinity.
const F64_SPLIT_LIMIT: f64 = 2200.0;

#[inline]
fn log2_f64(x: f64) -> f64 {
    let (exponent, mantissa) = split_f64_unchecked(x);
    exponent as f64 + registry().maths_or_default().log2_unchecked(mantissa) as f64
}

#[inline]
fn exp2_f64(p: f64) -> f64 {
    let clamped = p.clamp(-F64_SPLIT_LIMIT, F64_SPLIT_LIMIT);
    let integral = clamped.floor();
    let fraction = (clamped - integral) as f32;
    let value = registry().maths_or_default().exp2_unchecked(fraction) as f64;
    scale_by_exp2_f64(value, integral as i32)
}

/// Keeps the full f64 range: exponents are split off in f64 and only the
/// mantissa goes through the single precision tables, so results carry
/// about f32 precision.
impl FastFloat for f64 {
    #[inline]
    fn fast_pow(self, n: Self) -> Self {
        if n == 0.0 || self == 1.0 {
            return 1.0;
        }
        exp2_f64(n * log2_f64(self))
    }
    #[inline]
    fn fast_exp(self) -> Self {
        exp2_f64(self * LOG2_E)
    }
    #[inline]
    fn fast_exp2(self) -> Self {
        exp2_f64(self)
    }
    #[inline]
    fn fast_exp10(self) -> Self {
        exp2_f64(self * LOG2_10)
    }
    #[inline]
    fn fast_ln(self) -> Self {
        log2_f64(self) * LN_2
    }
    #[inline]
    fn fast_log2(self) -> Self {
        log2_f64(self)
    }
    #[inline]
    fn fast_log10(self) -> Self {
        log2_f64(self) * LOG10_2
    }
    #[inline]
    fn fast_atan2(self, x: Self) -> Self {
        // Only the ratio matters, so bring both into f32 range first
        let scale = self.abs().max(x.abs());
        if scale > 0.0 && scale.is_finite() {
            atan::atan2((self / scale) as f32, (x / scale) as f32) as f64
        } else {
            atan::atan2(self as f32, x as f32) as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FastFloat;

    macro_rules! assert_close_enough {
        ($a:expr, $b:expr) => {
            println!("{} : {}", $a, $b);
            let ratio = $a / $b;
            assert!(ratio < 1.0001);
            assert!(ratio > 0.9999);
        };
    }

    fn init() {
        crate::set_default_tables();
    }

    #[test]
    fn test_fast_pow() {
        init();
        let val = 2.0f32;
        let pow = 2.0;
        assert_close_enough!(val.fast_pow(pow), val.powf(pow));
    }

    #[test]
    fn test_fast_exp() {
        init();
        let val = 86.4f32;
        assert_close_enough!(val.fast_exp(), val.exp());
    }

    #[test]
    fn test_fast_exp2() {
        init();
        let val = 23.5f32;
        assert_close_enough!(val.fast_exp2(), val.exp2());
    }

    #[test]
    fn test_fast_exp10() {
        init();
        let val = -26.96f32;
        assert_close_enough!(val.fast_exp10(), 10.0f32.powf(val));
    }

    #[test]
    fn test_fast_ln() {
        init();
        let val = 5620.1f32;
        assert_close_enough!(val.fast_ln(), val.ln());
    }

    #[test]
    fn test_fast_log2() {
        init();
        let val = 92.0f32;
        assert_close_enough!(val.fast_log2(), val.log2());
    }

    #[test]
    fn test_fast_log10() {
        init();
        let val = 200.0f32;
        assert_close_enough!(val.fast_log10(), val.log10());
    }

    #[test]
    fn test_fast_atan2() {
        let val = 3.0f32;
        let rhs = -3.0;
        assert_close_enough!(val.fast_atan2(rhs), val.atan2(rhs));
    }

    #[test]
    fn test_f64() {
        init();
        let val = 0.37f64;
        assert_close_enough!(val.fast_pow(1.7), val.powf(1.7));
        assert_close_enough!(val.fast_log2(), val.log2());
    }

    #[test]
    fn test_f64_beyond_f32_range() {
        init();
        assert_close_enough!(1.0e300f64.fast_log2(), 1.0e300f64.log2());
        assert_close_enough!(1.0e-50f64.fast_log2(), 1.0e-50f64.log2());
        assert_close_enough!(1.0e39f64.fast_log2(), 1.0e39f64.log2());
        assert_close_enough!(1.0e-310f64.fast_log2(), 1.0e-310f64.log2());
        assert_close_enough!(1.0e200f64.fast_ln(), 1.0e200f64.ln());
        assert_close_enough!(10.0f64.fast_pow(50.0), 1.0e50);
        assert_close_enough!(10.0f64.fast_pow(-200.0), 1.0e-200);
        assert_close_enough!(1000.5f64.fast_exp2(), 1000.5f64.exp2());
        assert_close_enough!(300.0f64.fast_exp10(), 1.0e300);
        assert_close_enough!(1.0e300f64.fast_atan2(-1.0e300), 1.0e300f64.atan2(-1.0e300));
        assert_eq!(2000.0f64.fast_exp2(), f64::INFINITY);
        assert_eq!((-2000.0f64).fast_exp2(), 0.0);
    }

    fn generic_gain<T: FastFloat>(db: T) -> T {
        let ten: T = num_traits::cast(10.0).unwrap();
        let twenty: T = num_traits::cast(20.0).unwrap();
        ten.fast_pow(db / twenty)
    }

    #[test]
    fn test_generic_use() {
        init();
        assert_close_enough!(generic_gain(-6.0f32), 0.501_187_2f32);
        assert_close_enough!(generic_gain(20.0f64), 10.0f64);
    }
}
