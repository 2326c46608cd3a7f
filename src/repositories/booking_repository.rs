//! Repository de bookings

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::Booking;
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bookings creados dentro de la ventana, ordenados por created_at
    /// ascendente. Ese orden de fetch es el tie-break del sort estable
    /// de la capa de presentación.
    pub async fn find_in_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT *
            FROM bookings
            WHERE created_at::date BETWEEN $1 AND $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Bookings con pickup dentro de la ventana. La tabla de jobs filtra
    /// por la fecha mostrada (pickup_date); el fetch usa el mismo campo
    /// para que el único filtro de fechas visible sea ese.
    pub async fn find_by_pickup_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT *
            FROM bookings
            WHERE pickup_date BETWEEN $1 AND $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}
