//! Repository de testimonials

use sqlx::PgPool;

use crate::models::Testimonial;
use crate::utils::errors::AppError;

pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Solo testimonials activos; la agregación de rating es global,
    /// sin filtro de fechas.
    pub async fn find_active(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }
}
