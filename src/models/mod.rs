//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod analytics;
pub mod booking;
pub mod driver;
pub mod testimonial;
pub mod vehicle;

pub use analytics::*;
pub use booking::*;
pub use driver::*;
pub use testimonial::*;
pub use vehicle::*;
