//! Modelo de Vehicle
//!
//! Vehículo de la flota (sedán ejecutivo, SUV blindado, etc.).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
