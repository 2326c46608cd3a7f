//! Redondeo a decimales fijos
//!
//! Helpers compartidos por el cálculo de distancias y las tasas del
//! aggregation engine.

/// Redondear a 1 decimal
pub fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Redondear a 2 decimales
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
