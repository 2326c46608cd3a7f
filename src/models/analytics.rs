//! Modelos de Analytics
//!
//! Este módulo contiene los view-models del pipeline de reporting:
//! KPIs, series temporales, breakdowns y utilización por entidad.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Rango de fechas `[start, end]` sobre el que se calcula un reporte.
/// Ambos extremos son inclusivos.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Días totales de la ventana (inclusivo, mínimo 0)
    pub fn total_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

/// KPIs del dashboard para una ventana de reporte
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiSet {
    // Métricas financieras
    pub total_revenue: Decimal,
    pub jobs_completed: i64,
    pub avg_job_value: Decimal,

    // Métricas de clientes
    pub repeat_client_rate: f64,
    pub cancellation_rate: f64,

    // Métricas de satisfacción (globales, no acotadas a la ventana)
    pub avg_rating: f64,
    pub total_reviews: i64,

    // Puntualidad - placeholder cuando no hay datos de retraso
    pub on_time_rate: f64,
}

/// Punto de una serie temporal (revenue o jobs por periodo)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub period: String,
    pub value: Decimal,
}

/// Porcentaje de jobs por tipo de servicio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceTypeShare {
    pub service_type: String,
    pub jobs: i64,
    /// Porcentaje redondeado al entero más cercano. Los porcentajes se
    /// redondean de forma independiente y pueden no sumar exactamente 100.
    pub share_pct: i64,
}

/// Horas estimadas acumuladas por conductor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverUtilisation {
    pub name: String,
    pub hours: f64,
    pub jobs: i64,
}

/// Utilización por vehículo dentro de la ventana
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetUtilisation {
    pub vehicle: String,
    pub jobs: i64,
    pub mileage: Decimal,
    pub active: bool,
}

/// Reporte completo para el dashboard de administración
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub window: ReportWindow,
    pub kpis: KpiSet,
    pub revenue_by_period: Vec<SeriesPoint>,
    pub jobs_by_period: Vec<SeriesPoint>,
    pub service_mix: Vec<ServiceTypeShare>,
    pub driver_utilisation: Vec<DriverUtilisation>,
    pub fleet_utilisation: Vec<FleetUtilisation>,
}

/// Query params de los endpoints de reporting
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AnalyticsFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    #[validate(range(min = 1, max = 90))]
    pub bucket_days: Option<i64>,
}

impl AnalyticsFilters {
    /// Ventana efectiva con días por defecto configurables
    pub fn window_or_default(&self, default_days: i64) -> ReportWindow {
        let today = chrono::Utc::now().date_naive();
        let end = self.date_to.unwrap_or(today);
        let start = self
            .date_from
            .unwrap_or(end - chrono::Duration::days(default_days));
        ReportWindow::new(start, end)
    }
}
