//! Pet weight unit conversion.
//!
//! Weights are persisted as whole grams and presented in kilograms.

const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Heaviest accepted pet weight, in kilograms. Inputs are validated
/// against it before conversion, which keeps gram values far from the
/// `i64` range.
pub const MAX_WEIGHT_KG: i64 = 10_000;

/// Convert a caller-supplied weight in kilograms to stored grams,
/// rounding to the nearest gram.
pub fn kilograms_to_grams(kilograms: f64) -> i64 {
    (kilograms * GRAMS_PER_KILOGRAM).round() as i64
}

/// Convert stored grams back to kilograms for presentation.
pub fn grams_to_kilograms(grams: i64) -> f64 {
    grams as f64 / GRAMS_PER_KILOGRAM
}
