//! Error measurement against the standard library
//!
//! Used by the `accuracy` command to compare table resolutions, and by the
//! tests to check that error shrinks as tables grow.

use serde::{Deserialize, Serialize};

use crate::maths::FastMaths;

/// log2 inputs span `2^-LOG2_SPAN ..= 2^LOG2_SPAN`, exp2 inputs
/// `-LOG2_SPAN ..= LOG2_SPAN`
const LOG2_SPAN: f64 = 16.0;

/// pow bases span `10^-2 ..= 10^2`
const POW_BASE_DECADES: f64 = 2.0;

/// pow exponents span `-4 ..= 4`
const POW_EXPONENT_SPAN: f64 = 4.0;

/// Maximum errors observed over a fixed sampling of each function
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Samples in the log table measured
    pub log_table_size: usize,
    /// Samples in the pow table measured
    pub pow_table_size: usize,
    /// Evaluations per function
    pub samples: usize,
    /// Largest absolute error of `log2`
    pub max_log2_error: f64,
    /// Largest relative error of `exp2`
    pub max_exp2_error: f64,
    /// Largest relative error of `pow`
    pub max_pow_error: f64,
}

/// Measure `maths` at `samples` points per function (at least 2)
pub fn measure(maths: &FastMaths<'_>, samples: usize) -> AccuracyReport {
    let samples = samples.max(2);
    let last = (samples - 1) as f64;

    let mut max_log2_error = 0.0f64;
    let mut max_exp2_error = 0.0f64;
    let mut max_pow_error = 0.0f64;

    for i in 0..samples {
        let position = i as f64 / last;

        let x = (LOG2_SPAN * (2.0 * position - 1.0)).exp2() as f32;
        let approx = maths.log2_unchecked(x) as f64;
        max_log2_error = max_log2_error.max((approx - (x as f64).log2()).abs());

        let p = (LOG2_SPAN * (2.0 * position - 1.0)) as f32;
        let approx = maths.exp2_unchecked(p) as f64;
        max_exp2_error = max_exp2_error.max(relative_error(approx, (p as f64).exp2()));

        // Scatter exponents with the golden ratio so every base meets a
        // different exponent
        let base = 10.0f64.powf(POW_BASE_DECADES * (2.0 * position - 1.0)) as f32;
        let spread = (i as f64 * 0.618_033_988_749_895).fract();
        let exponent = (POW_EXPONENT_SPAN * (2.0 * spread - 1.0)) as f32;
        let approx = maths.pow_unchecked(base, exponent) as f64;
        let exact = (base as f64).powf(exponent as f64);
        max_pow_error = max_pow_error.max(relative_error(approx, exact));
    }

    AccuracyReport {
        log_table_size: maths.log_approx().table().size(),
        pow_table_size: maths.pow_approx().table().size(),
        samples,
        max_log2_error,
        max_exp2_error,
        max_pow_error,
    }
}

fn relative_error(approx: f64, exact: f64) -> f64 {
    ((approx - exact) / exact).abs()
}
