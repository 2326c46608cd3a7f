//! Modelo de Driver
//!
//! Chófer / operador de protección asignable a bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}
