//! Table-driven base 2 logarithm
//!
//! `log2(x) = e + log2(1 + t)` where `x = 2^e * (1 + t)`. The exponent comes
//! straight out of the float's bit layout and `log2(1 + t)` is interpolated
//! from a table sampled over `t` in [0, 1].

use std::f32::consts::{LN_2, LOG10_2};

use crate::bits::{decompose, decompose_unchecked, recompose_log, DecomposedFloat};
use crate::error::DomainError;
use crate::table::ApproxTable;

/// Approximate logarithms backed by a `log2(1 + t)` table
#[derive(Debug, Clone, Copy)]
pub struct LogApprox<'a> {
    table: &'a ApproxTable,
}

impl<'a> LogApprox<'a> {
    /// Create an approximator reading from `table`
    pub fn new(table: &'a ApproxTable) -> Self {
        Self { table }
    }

    /// The table in use
    pub fn table(&self) -> &'a ApproxTable {
        self.table
    }

    #[inline]
    fn evaluate(&self, d: DecomposedFloat) -> f32 {
        recompose_log(d.exponent, self.table.interpolate(d.fraction))
    }

    /// Approximate `log2(x)`.
    ///
    /// # Errors
    ///
    /// [`DomainError::NonPositive`] for `x <= 0`, [`DomainError::NonFinite`]
    /// for NaN or infinite `x`.
    #[inline]
    pub fn log2(&self, x: f32) -> Result<f32, DomainError> {
        Ok(self.evaluate(decompose(x)?))
    }

    /// Approximate `log2(x)` without input validation.
    ///
    /// For `x <= 0`, NaN or infinity the result is an unspecified finite
    /// number. Use this on hot paths where the input is known to be positive.
    #[inline]
    pub fn log2_unchecked(&self, x: f32) -> f32 {
        self.evaluate(decompose_unchecked(x))
    }

    /// Approximate natural logarithm
    #[inline]
    pub fn ln(&self, x: f32) -> Result<f32, DomainError> {
        Ok(self.log2(x)? * LN_2)
    }

    /// Approximate natural logarithm without input validation
    #[inline]
    pub fn ln_unchecked(&self, x: f32) -> f32 {
        self.log2_unchecked(x) * LN_2
    }

    /// Approximate base 10 logarithm
    #[inline]
    pub fn log10(&self, x: f32) -> Result<f32, DomainError> {
        Ok(self.log2(x)? * LOG10_2)
    }

    /// Approximate base 10 logarithm without input validation
    #[inline]
    pub fn log10_unchecked(&self, x: f32) -> f32 {
        self.log2_unchecked(x) * LOG10_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::default_log_table;

    #[test]
    fn test_log2_of_one_is_zero() {
        let log = LogApprox::new(default_log_table());
        assert_eq!(log.log2(1.0), Ok(0.0));
        assert_eq!(log.log2_unchecked(1.0), 0.0);
    }

    #[test]
    fn test_log2_powers_of_two_exact() {
        let log = LogApprox::new(default_log_table());
        for e in -149..=127 {
            let x = 2.0f64.powi(e) as f32;
            assert_eq!(log.log2(x).unwrap(), e as f32, "log2(2^{})", e);
        }
    }

    #[test]
    fn test_log2_accuracy() {
        let log = LogApprox::new(default_log_table());
        let mut x = 1.0e-6f32;
        while x < 1.0e6 {
            let error = (log.log2(x).unwrap() as f64 - (x as f64).log2()).abs();
            assert!(error < 5.0e-6, "log2({}) error {}", x, error);
            x *= 1.013;
        }
    }

    #[test]
    fn test_ln_and_log10() {
        let log = LogApprox::new(default_log_table());
        assert!((log.ln(std::f32::consts::E).unwrap() - 1.0).abs() < 1.0e-5);
        assert!((log.log10(1000.0).unwrap() - 3.0).abs() < 1.0e-5);
        assert!((log.ln_unchecked(10.0) - 10.0f32.ln()).abs() < 1.0e-5);
        assert!((log.log10_unchecked(0.01) + 2.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_domain() {
        let log = LogApprox::new(default_log_table());
        assert_eq!(log.log2(0.0), Err(DomainError::NonPositive(0.0)));
        assert_eq!(log.ln(-1.0), Err(DomainError::NonPositive(-1.0)));
        assert_eq!(log.log10(f32::NAN), Err(DomainError::NonFinite));
        assert!(log.log2_unchecked(-1.0).is_finite());
    }
}
