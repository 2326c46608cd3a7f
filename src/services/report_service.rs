//! Report service
//!
//! Orquesta el pipeline explícito: `load_snapshot(window)` hace los fetch
//! bulk (fail-fast, sin agregación parcial) y `derive_dashboard` deriva el
//! view-model de forma pura. Un cambio de filtros re-deriva sin re-fetch;
//! solo un cambio de ventana vuelve a tocar la base de datos.

use sqlx::PgPool;

use crate::models::{
    Booking, DashboardReport, Driver, ReportWindow, Testimonial, Vehicle,
};
use crate::repositories::{
    BookingRepository, DriverRepository, TestimonialRepository, VehicleRepository,
};
use crate::services::aggregation_service::{
    compute_driver_utilisation, compute_fleet_utilisation, compute_kpis, compute_series,
    compute_service_mix, SeriesMetric,
};
use crate::utils::errors::AppResult;

/// Snapshot inmutable de filas para una llamada de agregación
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub bookings: Vec<Booking>,
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub testimonials: Vec<Testimonial>,
}

/// Snapshot para la tabla de jobs: bookings por pickup_date (la fecha que
/// muestra y filtra el back office), sin testimonials.
#[derive(Debug, Clone)]
pub struct JobsSnapshot {
    pub bookings: Vec<Booking>,
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
}

pub struct ReportService {
    bookings: BookingRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
    testimonials: TestimonialRepository,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            testimonials: TestimonialRepository::new(pool),
        }
    }

    /// Fetch bulk de todas las entidades. Cualquier fallo se propaga tal
    /// cual; nunca se agrega sobre datos parciales.
    pub async fn load_snapshot(&self, window: &ReportWindow) -> AppResult<ReportSnapshot> {
        let bookings = self.bookings.find_in_window(window.start, window.end).await?;
        let drivers = self.drivers.find_all().await?;
        let vehicles = self.vehicles.find_all().await?;
        let testimonials = self.testimonials.find_active().await?;

        tracing::debug!(
            bookings = bookings.len(),
            drivers = drivers.len(),
            vehicles = vehicles.len(),
            testimonials = testimonials.len(),
            "snapshot cargado"
        );

        Ok(ReportSnapshot {
            bookings,
            drivers,
            vehicles,
            testimonials,
        })
    }

    /// Fetch para la tabla de jobs. La ventana se aplica sobre pickup_date,
    /// de modo que el único filtro de fechas es el del campo Date mostrado.
    pub async fn load_jobs_snapshot(&self, window: &ReportWindow) -> AppResult<JobsSnapshot> {
        let bookings = self
            .bookings
            .find_by_pickup_window(window.start, window.end)
            .await?;
        let drivers = self.drivers.find_all().await?;
        let vehicles = self.vehicles.find_all().await?;

        Ok(JobsSnapshot {
            bookings,
            drivers,
            vehicles,
        })
    }

    /// Derivación pura del reporte completo a partir del snapshot.
    pub fn derive_dashboard(
        snapshot: &ReportSnapshot,
        window: &ReportWindow,
        bucket_days: i64,
    ) -> DashboardReport {
        DashboardReport {
            window: *window,
            kpis: compute_kpis(&snapshot.bookings, &snapshot.testimonials, window),
            revenue_by_period: compute_series(
                &snapshot.bookings,
                window,
                bucket_days,
                SeriesMetric::Revenue,
            ),
            jobs_by_period: compute_series(
                &snapshot.bookings,
                window,
                bucket_days,
                SeriesMetric::Jobs,
            ),
            service_mix: compute_service_mix(&snapshot.bookings, window),
            driver_utilisation: compute_driver_utilisation(&snapshot.bookings, &snapshot.drivers),
            fleet_utilisation: compute_fleet_utilisation(
                &snapshot.bookings,
                &snapshot.vehicles,
                window,
            ),
        }
    }
}
