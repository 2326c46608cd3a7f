//! Cálculo de distancias great-circle
//!
//! Distancia haversine entre dos pares lat/lng en millas.

use crate::utils::rounding::round_1dp;

/// Radio de la Tierra en millas
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Distancia great-circle entre dos puntos, redondeada a 1 decimal.
///
/// Vector de referencia: Londres (51.5074, -0.1278) a Birmingham
/// (52.4862, -1.8904) = 101.0 millas.
pub fn haversine_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    round_1dp(EARTH_RADIUS_MILES * c)
}
