//! Numeric conversion helpers centralizing roll-to-index casts.

use num_traits::cast::cast;

/// Map a roll onto `0..len`, clamping out-of-contract rolls.
///
/// Rolls at or above 1.0 (including `+inf`) land on the last index; negative
/// rolls, `-inf` and NaN land on index 0. Returns 0 when `len` is 0.
#[must_use]
pub fn roll_to_index(roll: f64, len: usize) -> usize {
    let Some(last) = len.checked_sub(1) else {
        return 0;
    };
    if roll.is_nan() || roll <= 0.0 {
        return 0;
    }
    let scaled = (roll * usize_to_f64(len)).floor();
    cast::<f64, usize>(scaled).map_or(last, |idx| idx.min(last))
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}
