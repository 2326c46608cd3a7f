//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y sus variantes.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del booking - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    New,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Solo completed y confirmed generan revenue; cancelled cuenta
    /// únicamente en el denominador de la tasa de cancelación.
    pub fn is_revenue_generating(self) -> bool {
        matches!(self, Self::Completed | Self::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub pickup_date: NaiveDate,
    pub pickup_time: Option<NaiveTime>,
    pub status: BookingStatus,
    pub service_type: Option<String>,
    pub total_price: Option<Decimal>,
    pub distance_miles: Option<Decimal>,
    pub wait_time_hours: Option<Decimal>,
    pub delay_minutes: Option<i32>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Revenue del booking - precio nulo se trata como 0
    pub fn revenue(&self) -> Decimal {
        self.total_price.unwrap_or(Decimal::ZERO)
    }

    /// Coordenadas pickup/dropoff, solo cuando las cuatro están presentes
    pub fn coordinates(&self) -> Option<((f64, f64), (f64, f64))> {
        match (self.pickup_lat, self.pickup_lng, self.dropoff_lat, self.dropoff_lng) {
            (Some(plat), Some(plng), Some(dlat), Some(dlng)) => {
                Some(((plat, plng), (dlat, dlng)))
            }
            _ => None,
        }
    }
}
