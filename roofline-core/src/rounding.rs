//! Rounding conventions shared by the pipeline stages.
//!
//! Geometry, trim, and price figures round to nearest with ties toward
//! positive infinity. Roofing squares keep the one-decimal value closest to
//! the binary quotient ([`nearest_tenth`]). Material quantities round up and
//! never go through [`round_half_up`].

/// Round to the nearest integer, ties toward positive infinity (`-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round half-up to one decimal place.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    // Adding 0.0 turns a negative zero into a positive one.
    round_half_up(value * 10.0) / 10.0 + 0.0
}

/// One-decimal value closest to the exact binary value of `value`.
///
/// `21.15` is stored just below itself and so becomes `21.1`. Values that
/// sit exactly halfway, such as `0.25`, round away from zero.
pub(crate) fn nearest_tenth(value: f64) -> f64 {
    let quarters = value * 4.0;
    let exact_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    let rounded = if exact_tie {
        (value * 10.0).round() / 10.0
    } else {
        format!("{value:.1}").parse().unwrap_or(value)
    };
    rounded + 0.0
}

/// Nearest integer as `i64`. NaN maps to 0, infinities saturate.
pub(crate) fn nearest(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Smallest integer not below `value`, as `i64`. NaN maps to 0.
pub(crate) fn up(value: f64) -> i64 {
    value.ceil() as i64
}
