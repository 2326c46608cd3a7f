//! Chauffeur Analytics - reporting backend
//!
//! Biblioteca del pipeline de analytics: query layer (repositories),
//! aggregation engine (services) y presentation/export adapter.

pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
