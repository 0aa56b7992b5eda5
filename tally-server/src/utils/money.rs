//! Money arithmetic helpers
//!
//! Amounts are single-currency `f64` values; every amount that leaves the
//! system is rounded to 2 decimal places.

/// Round an amount to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
