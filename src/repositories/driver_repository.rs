//! Repository de drivers

use sqlx::PgPool;

use crate::models::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }
}
