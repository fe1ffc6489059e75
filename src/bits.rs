//! IEEE-754 single precision decomposition primitives
//!
//! Splits a float into its integer exponent and fractional mantissa by
//! reading the bit fields directly, and rebuilds a float from an exponent and
//! a mantissa value by injecting into the exponent field.

use crate::error::DomainError;

const MANTISSA_BITS: u32 = 23;
const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;
const EXPONENT_MASK: u32 = 0xff;
const EXPONENT_FIELD: u32 = EXPONENT_MASK << MANTISSA_BITS;
const EXPONENT_BIAS: i32 = 127;

/// Smallest exponent of a normal f32
const MIN_EXPONENT: i32 = -126;

/// Scale from mantissa bits to a fraction in [0, 1)
const FRACTION_SCALE: f32 = 1.0 / (1u32 << MANTISSA_BITS) as f32;

/// Lifts a subnormal into the normal range
const SUBNORMAL_SCALE: f32 = (1u32 << MANTISSA_BITS) as f32;

/// Exponent products are clamped to this magnitude before splitting.
/// Anything beyond it already saturates to zero or infinity.
const SPLIT_LIMIT: f32 = 256.0;

/// A positive float split as `2^exponent * (1 + fraction)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedFloat {
    /// Unbiased binary exponent
    pub exponent: i32,
    /// Mantissa with the implicit leading one removed, in [0, 1)
    pub fraction: f32,
}

/// Decomposes a positive finite float.
///
/// Subnormal inputs are renormalized so the exponent split stays exact all
/// the way down to the smallest positive f32.
///
/// # Errors
///
/// [`DomainError::NonFinite`] for NaN or infinite input and
/// [`DomainError::NonPositive`] for zero or negative input.
#[inline]
pub fn decompose(x: f32) -> Result<DecomposedFloat, DomainError> {
    if !x.is_finite() {
        return Err(DomainError::NonFinite);
    }
    if x <= 0.0 {
        return Err(DomainError::NonPositive(x));
    }
    Ok(decompose_unchecked(x))
}

/// Decomposes a float without validating it.
///
/// The sign bit is ignored. For zero, NaN or infinite input the result is
/// unspecified, but the call never panics.
#[inline]
pub fn decompose_unchecked(x: f32) -> DecomposedFloat {
    let mut bits = x.to_bits();
    let mut bias = EXPONENT_BIAS;
    if bits & EXPONENT_FIELD == 0 {
        bits = (x * SUBNORMAL_SCALE).to_bits();
        bias += MANTISSA_BITS as i32;
    }

    DecomposedFloat {
        exponent: ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32 - bias,
        fraction: (bits & MANTISSA_MASK) as f32 * FRACTION_SCALE,
    }
}

/// Rebuilds a log2 value from its exponent and the interpolated log2 of the
/// mantissa.
#[inline]
pub fn recompose_log(exponent: i32, fraction_result: f32) -> f32 {
    exponent as f32 + fraction_result
}

/// Splits `p` into `floor(p)` and the remainder in [0, 1].
///
/// Floor semantics (not truncation) keep negative exponents interpolating in
/// the right direction. The remainder can round up to exactly 1.0 for
/// negative inputs very close to an integer, which the closed-interval
/// tables handle.
#[inline]
pub fn split_floor(p: f32) -> (i32, f32) {
    let clamped = p.clamp(-SPLIT_LIMIT, SPLIT_LIMIT);
    let mut integral = clamped as i32;
    if integral as f32 > clamped {
        integral -= 1;
    }
    (integral, clamped - integral as f32)
}

/// `2^n` for `n` in the normal exponent range
#[inline]
fn pow2i(n: i32) -> f32 {
    debug_assert!((MIN_EXPONENT..=EXPONENT_BIAS).contains(&n));
    f32::from_bits(((n + EXPONENT_BIAS) as u32) << MANTISSA_BITS)
}

/// Computes `value * 2^exponent` by adding to the exponent field.
///
/// `value` must be a positive normal float (the pow tables hold values in
/// [1, 2]); for anything else the result is unspecified. Results past the
/// largest f32 saturate to infinity, results below the normal range degrade
/// to subnormals and then zero.
#[inline]
pub fn scale_by_exp2(value: f32, exponent: i32) -> f32 {
    let bits = value.to_bits();
    let field = ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32 + exponent;
    if field > 0 && field < EXPONENT_MASK as i32 {
        return f32::from_bits((bits as i32 + (exponent << MANTISSA_BITS)) as u32);
    }
    if field >= EXPONENT_MASK as i32 {
        return f32::INFINITY;
    }
    if exponent < MIN_EXPONENT - MANTISSA_BITS as i32 - 2 {
        return 0.0;
    }

    // Two exact power-of-two steps into the subnormal range
    value * pow2i(MIN_EXPONENT) * pow2i(exponent - MIN_EXPONENT)
}

const F64_MANTISSA_BITS: u32 = 52;
const F64_MANTISSA_MASK: u64 = (1 << F64_MANTISSA_BITS) - 1;
const F64_EXPONENT_MASK: u64 = 0x7ff;
const F64_EXPONENT_BIAS: i32 = 1023;

/// Lifts an f64 subnormal into the normal range
const F64_SUBNORMAL_SCALE: f64 = (1u64 << 54) as f64;

/// Splits an f64 as `2^exponent * mantissa` with the mantissa narrowed to
/// f32.
///
/// The exponent keeps the full f64 range, so only mantissa precision is lost
/// in the narrowing. The mantissa is in [1, 2] (rounding can reach 2.0). The
/// sign bit is ignored; for zero, NaN or infinite input the result is
/// unspecified.
#[inline]
pub fn split_f64_unchecked(x: f64) -> (i32, f32) {
    let mut bits = x.to_bits();
    let mut bias = F64_EXPONENT_BIAS;
    if (bits >> F64_MANTISSA_BITS) & F64_EXPONENT_MASK == 0 {
        bits = (x * F64_SUBNORMAL_SCALE).to_bits();
        bias += 54;
    }

    let exponent = ((bits >> F64_MANTISSA_BITS) & F64_EXPONENT_MASK) as i32 - bias;
    let one = (F64_EXPONENT_BIAS as u64) << F64_MANTISSA_BITS;
    let mantissa = f64::from_bits((bits & F64_MANTISSA_MASK) | one);
    (exponent, mantissa as f32)
}

/// `value * 2^exponent` in f64, saturating to infinity and underflowing
/// through subnormals to zero.
///
/// Applied as two exact power-of-two steps so neither factor overflows
/// before the product does.
#[inline]
pub fn scale_by_exp2_f64(value: f64, exponent: i32) -> f64 {
    let half = exponent / 2;
    value * 2.0f64.powi(half) * 2.0f64.powi(exponent - half)
}
