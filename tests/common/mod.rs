//! Fixtures compartidos para los tests de integración
#![allow(dead_code)]

use chauffeur_analytics::models::{
    Booking, BookingStatus, Driver, ReportWindow, Testimonial, Vehicle,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Ventana de marzo 2026: 28 días, cuatro buckets semanales exactos
pub fn march_window() -> ReportWindow {
    ReportWindow::new(
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
    )
}

/// Booking base creado el día `day` de marzo 2026
pub fn booking(day: u32, status: BookingStatus, price: Option<i64>) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        customer_name: "Test Customer".to_string(),
        customer_email: format!("customer{}@example.com", day),
        customer_phone: None,
        pickup_location: "Mayfair, London".to_string(),
        dropoff_location: "Canary Wharf, London".to_string(),
        pickup_lat: None,
        pickup_lng: None,
        dropoff_lat: None,
        dropoff_lng: None,
        pickup_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        pickup_time: None,
        status,
        service_type: Some("chauffeur".to_string()),
        total_price: price.map(Decimal::from),
        distance_miles: None,
        wait_time_hours: None,
        delay_minutes: None,
        driver_id: None,
        vehicle_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap(),
    }
}

pub fn driver(name: &str) -> Driver {
    Driver {
        id: Uuid::new_v4(),
        name: name.to_string(),
        active: true,
        available: true,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn vehicle(name: &str, active: bool) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: Some("executive".to_string()),
        active,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn testimonial(rating: Option<i32>, active: bool) -> Testimonial {
    Testimonial {
        id: Uuid::new_v4(),
        customer_name: Some("Reviewer".to_string()),
        rating,
        active,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}
