//! Middleware de la aplicación
//!
//! Este módulo contiene el middleware HTTP (CORS).

pub mod cors;
