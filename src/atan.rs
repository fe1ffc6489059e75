//! Polynomial arctangent
//!
//! No table is involved: the argument is reduced to [-1, 1] and fed to an
//! odd minimax polynomial.

use std::f32::consts::{FRAC_PI_2, PI};

/// Odd minimax coefficients for atan on [-1, 1]
const ATAN_COEFFS: [f32; 6] = [
    0.999_977_26,
    -0.332_623_47,
    0.193_543_46,
    -0.116_432_87,
    0.052_653_32,
    -0.011_721_20,
];

/// atan(z) for z in [-1, 1]
#[inline]
fn atan_reduced(z: f32) -> f32 {
    let z2 = z * z;
    let mut poly = ATAN_COEFFS[5];
    for &c in ATAN_COEFFS[..5].iter().rev() {
        poly = poly * z2 + c;
    }
    z * poly
}

/// Approximate four quadrant arctangent of `y / x`.
///
/// Maximum absolute error is around `1e-5` radians. `atan2(0, 0)` is 0.
#[inline]
pub fn atan2(y: f32, x: f32) -> f32 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }

    if y.abs() > x.abs() {
        // Valid in every quadrant, including x == -0.0
        return FRAC_PI_2.copysign(y) - atan_reduced(x / y);
    }

    // |x| >= |y| and not both zero, so x != 0
    let angle = atan_reduced(y / x);
    if x < 0.0 {
        angle + PI.copysign(y)
    } else {
        angle
    }
}
