//! Rounding-aware float arithmetic for stock quantities.
//!
//! Quantities are expressed in a unit of measure that carries a rounding
//! precision (e.g. `0.01` for units counted to two decimals, `1.0` for
//! indivisible units). Quantity comparisons must never use exact floating
//! equality; they go through [`float_compare`] with the relevant precision.

use core::cmp::Ordering;

/// Round `value` to the nearest multiple of `rounding`, half away from zero.
///
/// `rounding` must be strictly positive.
pub fn float_round(value: f64, rounding: f64) -> f64 {
    debug_assert!(rounding > 0.0, "rounding precision must be positive");
    let normalized = value / rounding;
    // Compensate for binary representation error before rounding, so values
    // like 2.675 at precision 0.01 land on the intended side of the boundary.
    let epsilon = normalized.abs() * f64::EPSILON;
    let adjusted = if normalized >= 0.0 {
        normalized + epsilon
    } else {
        normalized - epsilon
    };
    adjusted.round() * rounding
}

/// Whether `value` is indistinguishable from zero at the given precision.
pub fn float_is_zero(value: f64, rounding: f64) -> bool {
    float_round(value, rounding).abs() < rounding / 2.0
}

/// Compare two magnitudes at the given precision.
///
/// Returns the sign of `value1 - value2` after rounding both operands:
/// `Ordering::Equal` when they differ by less than the precision.
pub fn float_compare(value1: f64, value2: f64, rounding: f64) -> Ordering {
    let value1 = float_round(value1, rounding);
    let value2 = float_round(value2, rounding);
    let delta = value1 - value2;
    if float_is_zero(delta, rounding) {
        Ordering::Equal
    } else if delta < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
