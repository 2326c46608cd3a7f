//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores,
//! cálculo de distancias great-circle y redondeo.

pub mod errors;
pub mod geo;
pub mod rounding;
