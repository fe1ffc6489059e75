//! Evaluator bundling a log table and a pow table

use crate::error::DomainError;
use crate::logarithm::LogApprox;
use crate::pow::PowApprox;
use crate::table::{default_log_table, default_pow_table, ApproxTable};

/// Fast approximate maths over an explicit pair of tables.
///
/// This is the injectable form of the engine: several evaluators with
/// different tables can coexist, and none of them touch global state. The
/// process-wide registry hands out `FastMaths<'static>` values built from
/// whatever tables are installed.
///
/// Every function comes in a checked form returning [`DomainError`] and an
/// `_unchecked` form that skips validation.
#[derive(Debug, Clone, Copy)]
pub struct FastMaths<'a> {
    pow: PowApprox<'a>,
}

impl<'a> FastMaths<'a> {
    /// Evaluator over the given `log2(1 + t)` and `2^t` tables
    pub fn new(log_table: &'a ApproxTable, pow_table: &'a ApproxTable) -> Self {
        Self {
            pow: PowApprox::new(log_table, pow_table),
        }
    }

    /// The log half of the engine
    pub fn log_approx(&self) -> LogApprox<'a> {
        self.pow.log()
    }

    /// The pow half of the engine
    pub fn pow_approx(&self) -> PowApprox<'a> {
        self.pow
    }

    /// Approximate `log2(x)`
    #[inline]
    pub fn log2(&self, x: f32) -> Result<f32, DomainError> {
        self.pow.log().log2(x)
    }

    /// Approximate `log2(x)`, unspecified for `x <= 0` or non-finite `x`
    #[inline]
    pub fn log2_unchecked(&self, x: f32) -> f32 {
        self.pow.log().log2_unchecked(x)
    }

    /// Approximate `ln(x)`
    #[inline]
    pub fn ln(&self, x: f32) -> Result<f32, DomainError> {
        self.pow.log().ln(x)
    }

    /// Approximate `ln(x)`, unspecified for `x <= 0` or non-finite `x`
    #[inline]
    pub fn ln_unchecked(&self, x: f32) -> f32 {
        self.pow.log().ln_unchecked(x)
    }

    /// Approximate `log10(x)`
    #[inline]
    pub fn log10(&self, x: f32) -> Result<f32, DomainError> {
        self.pow.log().log10(x)
    }

    /// Approximate `log10(x)`, unspecified for `x <= 0` or non-finite `x`
    #[inline]
    pub fn log10_unchecked(&self, x: f32) -> f32 {
        self.pow.log().log10_unchecked(x)
    }

    /// Approximate `x^y`
    #[inline]
    pub fn pow(&self, x: f32, y: f32) -> Result<f32, DomainError> {
        self.pow.pow(x, y)
    }

    /// Approximate `x^y`, unspecified for `x <= 0` (except `y == 0`)
    #[inline]
    pub fn pow_unchecked(&self, x: f32, y: f32) -> f32 {
        self.pow.pow_unchecked(x, y)
    }

    /// Approximate `2^p`
    #[inline]
    pub fn exp2(&self, p: f32) -> Result<f32, DomainError> {
        self.pow.exp2(p)
    }

    /// Approximate `2^p`, unspecified for NaN
    #[inline]
    pub fn exp2_unchecked(&self, p: f32) -> f32 {
        self.pow.exp2_unchecked(p)
    }

    /// Approximate `e^p`
    #[inline]
    pub fn exp(&self, p: f32) -> Result<f32, DomainError> {
        self.pow.exp(p)
    }

    /// Approximate `e^p`, unspecified for NaN
    #[inline]
    pub fn exp_unchecked(&self, p: f32) -> f32 {
        self.pow.exp_unchecked(p)
    }

    /// Approximate `10^p`
    #[inline]
    pub fn exp10(&self, p: f32) -> Result<f32, DomainError> {
        self.pow.exp10(p)
    }

    /// Approximate `10^p`, unspecified for NaN
    #[inline]
    pub fn exp10_unchecked(&self, p: f32) -> f32 {
        self.pow.exp10_unchecked(p)
    }
}

impl FastMaths<'static> {
    /// Evaluator over the built-in tables
    pub fn with_defaults() -> Self {
        Self::new(default_log_table(), default_pow_table())
    }
}

impl Default for FastMaths<'static> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
