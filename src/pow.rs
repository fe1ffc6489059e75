//! Table-driven power and exponential functions
//!
//! `x^y = 2^(y * log2(x))`. The log comes from [`LogApprox`]; the
//! exponential splits its argument into `floor(p) + t`, interpolates `2^t`
//! from a table sampled over [0, 1] and injects `floor(p)` into the exponent
//! field of the result.

use std::f32::consts::{LOG2_10, LOG2_E};

use crate::bits::{scale_by_exp2, split_floor};
use crate::error::DomainError;
use crate::logarithm::LogApprox;
use crate::table::ApproxTable;

/// Approximate powers and exponentials backed by a log table and a `2^t`
/// table
#[derive(Debug, Clone, Copy)]
pub struct PowApprox<'a> {
    log: LogApprox<'a>,
    table: &'a ApproxTable,
}

impl<'a> PowApprox<'a> {
    /// Create an approximator from a `log2(1 + t)` table and a `2^t` table
    pub fn new(log_table: &'a ApproxTable, pow_table: &'a ApproxTable) -> Self {
        Self::from_log(LogApprox::new(log_table), pow_table)
    }

    /// Create an approximator sharing an existing log approximator
    pub fn from_log(log: LogApprox<'a>, pow_table: &'a ApproxTable) -> Self {
        Self {
            log,
            table: pow_table,
        }
    }

    /// The log approximator feeding `pow`
    pub fn log(&self) -> LogApprox<'a> {
        self.log
    }

    /// The `2^t` table in use
    pub fn table(&self) -> &'a ApproxTable {
        self.table
    }

    /// Approximate `2^p` without input validation.
    ///
    /// Saturates to infinity above `2^128` and to zero below the smallest
    /// subnormal. For NaN input the result is unspecified.
    #[inline]
    pub fn exp2_unchecked(&self, p: f32) -> f32 {
        let (integral, fraction) = split_floor(p);
        scale_by_exp2(self.table.interpolate(fraction), integral)
    }

    /// Approximate `2^p`.
    ///
    /// # Errors
    ///
    /// [`DomainError::NonFinite`] for NaN or infinite `p`.
    #[inline]
    pub fn exp2(&self, p: f32) -> Result<f32, DomainError> {
        if !p.is_finite() {
            return Err(DomainError::NonFinite);
        }
        Ok(self.exp2_unchecked(p))
    }

    /// Approximate `e^p`
    #[inline]
    pub fn exp(&self, p: f32) -> Result<f32, DomainError> {
        self.exp2(p * LOG2_E)
    }

    /// Approximate `e^p` without input validation
    #[inline]
    pub fn exp_unchecked(&self, p: f32) -> f32 {
        self.exp2_unchecked(p * LOG2_E)
    }

    /// Approximate `10^p`
    #[inline]
    pub fn exp10(&self, p: f32) -> Result<f32, DomainError> {
        self.exp2(p * LOG2_10)
    }

    /// Approximate `10^p` without input validation
    #[inline]
    pub fn exp10_unchecked(&self, p: f32) -> f32 {
        self.exp2_unchecked(p * LOG2_10)
    }

    /// Approximate `x^y` without input validation.
    ///
    /// `y == 0` and `x == 1` still return exactly 1. Any other `x <= 0`, and
    /// any non-finite input, gives an unspecified result.
    #[inline]
    pub fn pow_unchecked(&self, x: f32, y: f32) -> f32 {
        if y == 0.0 || x == 1.0 {
            return 1.0;
        }
        self.exp2_unchecked(y * self.log.log2_unchecked(x))
    }

    /// Approximate `x^y`.
    ///
    /// `y == 0` and `x == 1` return exactly 1. Zero raised to a positive power
    /// is 0, negative for `-0.0` raised to an odd integer. A negative base
    /// is accepted for integral exponents and gives a negative result for odd
    /// ones.
    ///
    /// # Errors
    ///
    /// * [`DomainError::NonFinite`] if either argument is NaN or infinite
    /// * [`DomainError::ZeroToNegativePower`] for `x == 0, y < 0`
    /// * [`DomainError::NegativeBase`] for `x < 0` with non-integral `y`
    pub fn pow(&self, x: f32, y: f32) -> Result<f32, DomainError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::NonFinite);
        }
        if y == 0.0 || x == 1.0 {
            return Ok(1.0);
        }
        if x > 0.0 {
            return Ok(self.exp2_unchecked(y * self.log.log2_unchecked(x)));
        }
        if x == 0.0 {
            if y < 0.0 {
                return Err(DomainError::ZeroToNegativePower(y));
            }
            // -0.0 keeps its sign for odd powers
            return Ok(if is_odd_integer(y) { x } else { 0.0 });
        }
        if y.fract() != 0.0 {
            return Err(DomainError::NegativeBase { base: x, exponent: y });
        }

        let magnitude = self.exp2_unchecked(y * self.log.log2_unchecked(-x));
        if is_odd_integer(y) {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }
}

#[inline]
fn is_odd_integer(y: f32) -> bool {
    (y % 2.0).abs() == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{default_log_table, default_pow_table};

    fn approx() -> PowApprox<'static> {
        PowApprox::new(default_log_table(), default_pow_table())
    }

    fn relative_error(approx: f32, exact: f64) -> f64 {
        ((approx as f64 - exact) / exact).abs()
    }

    #[test]
    fn test_exp2_integers_exact() {
        let pow = approx();
        for i in -149..=127 {
            assert_eq!(pow.exp2(i as f32).unwrap(), 2.0f64.powi(i) as f32, "2^{}", i);
        }
        assert_eq!(pow.exp2(128.0), Ok(f32::INFINITY));
        assert_eq!(pow.exp2(-400.0), Ok(0.0));
    }

    #[test]
    fn test_exp2_negative_fraction_uses_floor() {
        let pow = approx();
        // -0.5 must split into -1 + 0.5, not 0 - 0.5
        let result = pow.exp2(-0.5).unwrap();
        assert!(relative_error(result, 0.5f64.sqrt()) < 1.0e-6);
    }

    #[test]
    fn test_exp2_accuracy() {
        let pow = approx();
        let mut p = -40.0f32;
        while p < 40.0 {
            let error = relative_error(pow.exp2(p).unwrap(), (p as f64).exp2());
            assert!(error < 2.0e-6, "2^{} error {}", p, error);
            p += 0.0173;
        }
    }

    #[test]
    fn test_exp_and_exp10() {
        let pow = approx();
        assert!(relative_error(pow.exp(1.0).unwrap(), std::f64::consts::E) < 1.0e-5);
        assert!(relative_error(pow.exp10(2.0).unwrap(), 100.0) < 1.0e-5);
        assert!(relative_error(pow.exp_unchecked(-3.0), (-3.0f64).exp()) < 1.0e-5);
        assert!(relative_error(pow.exp10_unchecked(-1.5), 10.0f64.powf(-1.5)) < 1.0e-5);
        assert_eq!(pow.exp(f32::NAN), Err(DomainError::NonFinite));
    }

    #[test]
    fn test_pow_short_circuits() {
        let pow = approx();
        for x in [0.0, 1.0e-30, 0.3, 2.0, 7.5, 1.0e30, -3.0] {
            assert_eq!(pow.pow(x, 0.0), Ok(1.0), "{}^0", x);
            assert_eq!(pow.pow_unchecked(x, 0.0), 1.0);
        }
        for y in [-1000.0, -2.5, 0.1, 3.0, 1.0e20] {
            assert_eq!(pow.pow(1.0, y), Ok(1.0), "1^{}", y);
            assert_eq!(pow.pow_unchecked(1.0, y), 1.0);
        }
    }

    #[test]
    fn test_pow_values() {
        let pow = approx();
        assert_eq!(pow.pow(2.0, 10.0), Ok(1024.0));
        assert!(relative_error(pow.pow(2.0, 0.5).unwrap(), 2.0f64.sqrt()) < 1.0e-5);
        assert!(relative_error(pow.pow(10.0, -2.0).unwrap(), 0.01) < 1.0e-5);
        assert!(relative_error(pow.pow(0.5, 3.3).unwrap(), 0.5f64.powf(3.3)) < 1.0e-5);
        assert_eq!(pow.pow(10.0, 100.0), Ok(f32::INFINITY));
        assert_eq!(pow.pow(10.0, -100.0), Ok(0.0));
    }

    #[test]
    fn test_pow_signed_zero_base() {
        let pow = approx();
        let odd = pow.pow(-0.0, 3.0).unwrap();
        assert_eq!(odd, 0.0);
        assert!(odd.is_sign_negative(), "(-0)^3 should be -0");
        let even = pow.pow(-0.0, 2.0).unwrap();
        assert!(even.is_sign_positive(), "(-0)^2 should be +0");
        let fractional = pow.pow(-0.0, 0.5).unwrap();
        assert!(fractional.is_sign_positive(), "(-0)^0.5 should be +0");
        assert!(pow.pow(0.0, 3.0).unwrap().is_sign_positive());
        assert_eq!(odd.is_sign_negative(), (-0.0f32).powf(3.0).is_sign_negative());
    }

    #[test]
    fn test_pow_zero_and_negative_base() {
        let pow = approx();
        assert_eq!(pow.pow(0.0, 2.0), Ok(0.0));
        assert_eq!(pow.pow(0.0, -1.0), Err(DomainError::ZeroToNegativePower(-1.0)));
        assert_eq!(pow.pow(-0.0, -1.0), Err(DomainError::ZeroToNegativePower(-1.0)));
        assert_eq!(pow.pow(-2.0, 3.0), Ok(-8.0));
        assert_eq!(pow.pow(-2.0, 2.0), Ok(4.0));
        assert_eq!(pow.pow(-2.0, -1.0), Ok(-0.5));
        assert_eq!(
            pow.pow(-2.0, 0.5),
            Err(DomainError::NegativeBase { base: -2.0, exponent: 0.5 })
        );
        assert_eq!(pow.pow(f32::INFINITY, 2.0), Err(DomainError::NonFinite));
        assert_eq!(pow.pow(2.0, f32::NAN), Err(DomainError::NonFinite));
    }
}
