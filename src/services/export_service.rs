//! Presentation / export adapter
//!
//! Convierte el snapshot de bookings en filas planas para la tabla de
//! jobs del back office: filtrado conjuntivo, orden estable, paginación
//! de tamaño fijo y export CSV del conjunto filtrado completo.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, Driver, Vehicle};
use crate::services::aggregation_service::{UNASSIGNED_DRIVER, UNKNOWN_SERVICE};

/// Filas por página en la vista de jobs
pub const PAGE_SIZE: usize = 15;

/// Orden fijo de columnas del export CSV
pub const CSV_COLUMNS: [&str; 9] = [
    "Date", "Job ID", "Customer", "Service", "Driver", "Vehicle", "Revenue", "Distance", "Status",
];

/// Fila plana de la tabla de jobs. Pickup/dropoff solo se usan para la
/// búsqueda de texto libre, no aparecen como columnas del CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRow {
    pub date: NaiveDate,
    pub job_id: String,
    pub customer: String,
    pub service: String,
    pub driver: String,
    pub vehicle: String,
    pub revenue: Decimal,
    pub distance: Decimal,
    pub status: BookingStatus,
    pub pickup_location: String,
    pub dropoff_location: String,
}

/// Campo de ordenación de la tabla
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    Customer,
    Revenue,
    Distance,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Estado inmutable de la vista: filtros + orden + página. Se reemplaza
/// completo en cada interacción; `derive_view` recalcula todo de forma
/// síncrona sobre el snapshot en memoria.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewState {
    pub search: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<BookingStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_dir: SortDirection,
    /// Página 1-based; 0 o ausente se normaliza a 1
    #[serde(default)]
    pub page: usize,
}

/// Vista derivada: página actual + metadatos de paginación
#[derive(Debug, Clone, Serialize)]
pub struct JobTableView {
    pub rows: Vec<JobRow>,
    pub total_rows: usize,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

/// Construir las filas planas a partir del snapshot, resolviendo nombres
/// de conductor/vehículo con fallbacks sentinel.
pub fn build_job_rows(bookings: &[Booking], drivers: &[Driver], vehicles: &[Vehicle]) -> Vec<JobRow> {
    let driver_names: HashMap<Uuid, &str> = drivers.iter().map(|d| (d.id, d.name.as_str())).collect();
    let vehicle_names: HashMap<Uuid, &str> =
        vehicles.iter().map(|v| (v.id, v.name.as_str())).collect();

    bookings
        .iter()
        .map(|b| JobRow {
            date: b.pickup_date,
            job_id: b.id.to_string(),
            customer: b.customer_name.clone(),
            service: b
                .service_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
            driver: b
                .driver_id
                .and_then(|id| driver_names.get(&id).copied())
                .unwrap_or(UNASSIGNED_DRIVER)
                .to_string(),
            vehicle: b
                .vehicle_id
                .and_then(|id| vehicle_names.get(&id).copied())
                .unwrap_or(UNKNOWN_SERVICE)
                .to_string(),
            revenue: b.revenue(),
            distance: b.distance_miles.unwrap_or(Decimal::ZERO),
            status: b.status,
            pickup_location: b.pickup_location.clone(),
            dropoff_location: b.dropoff_location.clone(),
        })
        .collect()
}

/// Filtrado conjuntivo (AND) sobre todos los filtros activos. La búsqueda
/// es substring case-insensitive sobre customer, job id y localizaciones.
pub fn filter_rows(rows: &[JobRow], state: &ViewState) -> Vec<JobRow> {
    let search = state
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    rows.iter()
        .filter(|row| {
            if let Some(needle) = &search {
                let hit = row.customer.to_lowercase().contains(needle)
                    || row.job_id.to_lowercase().contains(needle)
                    || row.pickup_location.to_lowercase().contains(needle)
                    || row.dropoff_location.to_lowercase().contains(needle);
                if !hit {
                    return false;
                }
            }
            if let Some(service) = &state.service_type {
                if !row.service.eq_ignore_ascii_case(service) {
                    return false;
                }
            }
            if let Some(status) = state.status {
                if row.status != status {
                    return false;
                }
            }
            if let Some(from) = state.date_from {
                if row.date < from {
                    return false;
                }
            }
            if let Some(to) = state.date_to {
                if row.date > to {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Orden estable: los empates conservan el orden de fetch original.
pub fn sort_rows(rows: &mut [JobRow], field: SortField, direction: SortDirection) {
    // Vec::sort_by es estable en ambas direcciones; la inversión se hace
    // en el comparador, nunca con reverse() sobre el slice
    rows.sort_by(|a, b| {
        let ord = match field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Customer => a.customer.to_lowercase().cmp(&b.customer.to_lowercase()),
            SortField::Revenue => a.revenue.cmp(&b.revenue),
            SortField::Distance => a.distance.cmp(&b.distance),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Derivar la vista completa (filtrar + ordenar + paginar) desde el
/// snapshot. Página fuera de rango se recorta a la última página.
pub fn derive_view(rows: &[JobRow], state: &ViewState) -> JobTableView {
    let mut filtered = filter_rows(rows, state);
    sort_rows(&mut filtered, state.sort_by, state.sort_dir);

    let total_rows = filtered.len();
    let page_count = total_rows.div_ceil(PAGE_SIZE).max(1);
    let page = state.page.clamp(1, page_count);

    let start = (page - 1) * PAGE_SIZE;
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    JobTableView {
        rows,
        total_rows,
        page,
        page_count,
        page_size: PAGE_SIZE,
    }
}

/// Serializar el conjunto filtrado (no solo la página actual) a CSV con
/// orden de columnas fijo. Cada celda va entre comillas; el revenue lleva
/// el prefijo literal `£`.
pub fn to_csv(rows: &[JobRow]) -> String {
    let mut out = String::new();

    let header: Vec<String> = CSV_COLUMNS.iter().map(|c| quote(c)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let cells = [
            quote(&row.date.format("%Y-%m-%d").to_string()),
            quote(&row.job_id),
            quote(&row.customer),
            quote(&row.service),
            quote(&row.driver),
            quote(&row.vehicle),
            quote(&format!("£{}", row.revenue)),
            quote(&row.distance.to_string()),
            quote(row.status.as_str()),
        ];
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// Nombre del fichero de export con la fecha actual
pub fn export_filename() -> String {
    format!("jobs-export-{}.csv", chrono::Utc::now().date_naive())
}

/// Celda CSV entre comillas, con comillas internas dobladas
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
