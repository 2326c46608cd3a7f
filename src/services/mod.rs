//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! El aggregation engine es puro: funciones de snapshot + ventana a
//! view-models, sin estado mutable entre requests.

pub mod aggregation_service;
pub mod export_service;
pub mod report_service;

pub use aggregation_service::*;
pub use export_service::*;
pub use report_service::*;
