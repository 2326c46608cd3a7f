//! Modelo de Testimonial
//!
//! Reseñas de clientes - solo se usan para la agregación de satisfacción.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub customer_name: Option<String>,
    /// Rating 1-5, nullable
    pub rating: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
