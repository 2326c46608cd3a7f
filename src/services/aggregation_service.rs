//! Aggregation engine
//!
//! Funciones puras que transforman un snapshot de bookings (+ drivers,
//! vehicles, testimonials) en KPIs, series temporales, breakdowns y
//! utilización por entidad. Cada request recalcula desde cero; no hay
//! agregación incremental ni estado compartido.

use std::collections::{HashMap, HashSet};

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{
    Booking, BookingStatus, Driver, DriverUtilisation, FleetUtilisation, KpiSet, ReportWindow,
    SeriesPoint, ServiceTypeShare, Testimonial, Vehicle,
};
use crate::utils::geo::haversine_miles;
use crate::utils::rounding::{round_1dp, round_2dp};

/// Velocidad media asumida para estimar horas de trabajo
pub const AVERAGE_SPEED_MPH: f64 = 40.0;
/// Overhead fijo por job (preparación, espera en pickup)
pub const JOB_OVERHEAD_HOURS: f64 = 0.25;
/// Horas por defecto cuando el booking no tiene coordenadas
pub const DEFAULT_JOB_HOURS: f64 = 2.0;
/// Placeholder de puntualidad cuando no existen datos de retraso.
/// Valor heredado del sistema original, no una métrica medida.
pub const ON_TIME_RATE_PLACEHOLDER: f64 = 94.0;
/// Top-N de conductores en el reporte de utilización
pub const TOP_DRIVERS: usize = 5;
/// Muestra fija de vehículos en el reporte de flota
pub const FLEET_SAMPLE_SIZE: usize = 5;
/// Ancho de bucket por defecto para las series temporales
pub const DEFAULT_BUCKET_DAYS: i64 = 7;
/// Etiqueta sentinel para categóricos ausentes
pub const UNKNOWN_SERVICE: &str = "—";
/// Bucket fallback para bookings sin conductor asignado
pub const UNASSIGNED_DRIVER: &str = "Unassigned";

/// Métrica agregada por bucket en una serie temporal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMetric {
    Revenue,
    Jobs,
}

/// Pertenencia a la ventana por fecha calendario de `created_at`
fn in_window(booking: &Booking, window: &ReportWindow) -> bool {
    window.contains(booking.created_at.date_naive())
}

/// Calcular el set de KPIs del dashboard.
///
/// Revenue y jobs solo cuentan bookings completed/confirmed dentro de la
/// ventana. Ratings son globales (no acotados a la ventana) - los callers
/// deben tenerlo en cuenta.
pub fn compute_kpis(
    bookings: &[Booking],
    testimonials: &[Testimonial],
    window: &ReportWindow,
) -> KpiSet {
    let windowed: Vec<&Booking> = bookings.iter().filter(|b| in_window(b, window)).collect();
    let total = windowed.len() as i64;

    let revenue_jobs: Vec<&&Booking> = windowed
        .iter()
        .filter(|b| b.status.is_revenue_generating())
        .collect();

    let total_revenue: Decimal = revenue_jobs.iter().map(|b| b.revenue()).sum();
    let jobs_completed = revenue_jobs.len() as i64;

    let avg_job_value = if jobs_completed > 0 {
        total_revenue / Decimal::from(jobs_completed)
    } else {
        Decimal::ZERO
    };

    // Proxy de clientes recurrentes: (n - emails distintos) / n. No es una
    // tasa de repetición por cohortes; se mantiene la fórmula original.
    let repeat_client_rate = if total > 0 {
        let distinct_emails: HashSet<String> = windowed
            .iter()
            .map(|b| b.customer_email.trim().to_lowercase())
            .collect();
        round_1dp((total - distinct_emails.len() as i64) as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let cancelled = windowed
        .iter()
        .filter(|b| b.status == BookingStatus::Cancelled)
        .count() as i64;
    let cancellation_rate = if total > 0 {
        round_1dp(cancelled as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let ratings: Vec<i32> = testimonials
        .iter()
        .filter(|t| t.active)
        .filter_map(|t| t.rating)
        .collect();
    let total_reviews = ratings.len() as i64;
    let avg_rating = if total_reviews > 0 {
        round_1dp(ratings.iter().sum::<i32>() as f64 / total_reviews as f64)
    } else {
        0.0
    };

    let on_time_rate = compute_on_time_rate(&windowed);

    KpiSet {
        total_revenue,
        jobs_completed,
        avg_job_value,
        repeat_client_rate,
        cancellation_rate,
        avg_rating,
        total_reviews,
        on_time_rate,
    }
}

/// Puntualidad sobre bookings completed/confirmed. Sin ningún dato de
/// retraso en la ventana se devuelve el placeholder constante.
fn compute_on_time_rate(windowed: &[&Booking]) -> f64 {
    let revenue_jobs: Vec<&&Booking> = windowed
        .iter()
        .filter(|b| b.status.is_revenue_generating())
        .collect();

    let has_delay_data = windowed.iter().any(|b| b.delay_minutes.is_some());
    if revenue_jobs.is_empty() || !has_delay_data {
        return ON_TIME_RATE_PLACEHOLDER;
    }

    let on_time = revenue_jobs
        .iter()
        .filter(|b| b.delay_minutes.map_or(true, |m| m <= 0))
        .count();
    round_1dp(on_time as f64 / revenue_jobs.len() as f64 * 100.0)
}

/// Serie temporal con buckets de ancho fijo contando hacia atrás desde el
/// final de la ventana. Los buckets sin bookings aparecen igualmente si son
/// derivables del ancho de la ventana; la salida está ordenada ascendente
/// por índice de bucket ("Week 1" es el más antiguo).
///
/// Con una serie vacía se sustituye un único placeholder
/// `{period: "No data", value: 0}` para que los charts nunca rendericen
/// sobre un array vacío.
pub fn compute_series(
    bookings: &[Booking],
    window: &ReportWindow,
    bucket_days: i64,
    metric: SeriesMetric,
) -> Vec<SeriesPoint> {
    let windowed: Vec<&Booking> = bookings.iter().filter(|b| in_window(b, window)).collect();
    let total_days = window.total_days();

    if windowed.is_empty() || total_days <= 0 || bucket_days <= 0 {
        return vec![SeriesPoint {
            period: "No data".to_string(),
            value: Decimal::ZERO,
        }];
    }

    // Número de buckets derivable del ancho de la ventana (ceil)
    let bucket_count = ((total_days + bucket_days - 1) / bucket_days) as usize;
    let mut values = vec![Decimal::ZERO; bucket_count];

    for booking in &windowed {
        let days_before_end = (window.end - booking.created_at.date_naive()).num_days();
        let idx_from_end = (days_before_end / bucket_days) as usize;
        if idx_from_end >= bucket_count {
            continue;
        }
        // idx 0 = bucket más reciente; la salida va de antiguo a reciente
        let slot = bucket_count - 1 - idx_from_end;

        match metric {
            SeriesMetric::Revenue => {
                if booking.status.is_revenue_generating() {
                    values[slot] += booking.revenue();
                }
            }
            SeriesMetric::Jobs => values[slot] += Decimal::ONE,
        }
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| SeriesPoint {
            period: format!("Week {}", i + 1),
            value,
        })
        .collect()
}

/// Breakdown porcentual de jobs por tipo de servicio. Los porcentajes se
/// redondean al entero más cercano de forma independiente y pueden no sumar
/// 100 exactamente.
pub fn compute_service_mix(bookings: &[Booking], window: &ReportWindow) -> Vec<ServiceTypeShare> {
    let windowed: Vec<&Booking> = bookings.iter().filter(|b| in_window(b, window)).collect();
    let total = windowed.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<String, i64> = HashMap::new();
    for booking in &windowed {
        let label = booking
            .service_type
            .clone()
            .unwrap_or_else(|| UNKNOWN_SERVICE.to_string());
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut shares: Vec<ServiceTypeShare> = counts
        .into_iter()
        .map(|(service_type, jobs)| ServiceTypeShare {
            service_type,
            jobs,
            share_pct: (jobs as f64 / total as f64 * 100.0).round() as i64,
        })
        .collect();

    shares.sort_by(|a, b| b.jobs.cmp(&a.jobs).then(a.service_type.cmp(&b.service_type)));
    shares
}

/// Utilización por conductor: horas estimadas acumuladas sobre bookings
/// completed/confirmed. Con coordenadas se estima
/// `distancia / velocidad media + overhead`; sin coordenadas se usan las
/// horas por defecto. Las horas de espera explícitas se suman aparte.
///
/// Devuelve el top-5 por horas descendente, excluyendo conductores con 0
/// horas acumuladas. Los empates conservan el orden de primera aparición.
pub fn compute_driver_utilisation(
    bookings: &[Booking],
    drivers: &[Driver],
) -> Vec<DriverUtilisation> {
    let names: HashMap<uuid::Uuid, &str> =
        drivers.iter().map(|d| (d.id, d.name.as_str())).collect();

    // Acumulación en orden de primera aparición para que el sort estable
    // preserve el orden de fetch en empates
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<DriverUtilisation> = Vec::new();

    for booking in bookings.iter().filter(|b| b.status.is_revenue_generating()) {
        let name = booking
            .driver_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNASSIGNED_DRIVER)
            .to_string();

        let trip_hours = match booking.coordinates() {
            Some(((plat, plng), (dlat, dlng))) => {
                haversine_miles(plat, plng, dlat, dlng) / AVERAGE_SPEED_MPH + JOB_OVERHEAD_HOURS
            }
            None => DEFAULT_JOB_HOURS,
        };
        let wait_hours = booking
            .wait_time_hours
            .and_then(|w| w.to_f64())
            .unwrap_or(0.0);

        let slot = *index.entry(name.clone()).or_insert_with(|| {
            totals.push(DriverUtilisation {
                name,
                hours: 0.0,
                jobs: 0,
            });
            totals.len() - 1
        });
        totals[slot].hours += trip_hours + wait_hours;
        totals[slot].jobs += 1;
    }

    let mut result: Vec<DriverUtilisation> = totals
        .into_iter()
        .filter(|d| d.hours > 0.0)
        .map(|mut d| {
            d.hours = round_2dp(d.hours);
            d
        })
        .collect();

    // sort_by es estable: los empates mantienen el orden de aparición
    result.sort_by(|a, b| b.hours.partial_cmp(&a.hours).unwrap_or(std::cmp::Ordering::Equal));
    result.truncate(TOP_DRIVERS);
    result
}

/// Utilización de flota sobre una muestra fija de vehículos: jobs que
/// referencian al vehículo dentro de la ventana y millas acumuladas.
/// El flag active se pasa tal cual desde Vehicle.
pub fn compute_fleet_utilisation(
    bookings: &[Booking],
    vehicles: &[Vehicle],
    window: &ReportWindow,
) -> Vec<FleetUtilisation> {
    vehicles
        .iter()
        .take(FLEET_SAMPLE_SIZE)
        .map(|vehicle| {
            let assigned: Vec<&Booking> = bookings
                .iter()
                .filter(|b| in_window(b, window) && b.vehicle_id == Some(vehicle.id))
                .collect();

            let mileage: Decimal = assigned
                .iter()
                .map(|b| b.distance_miles.unwrap_or(Decimal::ZERO))
                .sum();

            FleetUtilisation {
                vehicle: vehicle.name.clone(),
                jobs: assigned.len() as i64,
                mileage,
                active: vehicle.active,
            }
        })
        .collect()
}
