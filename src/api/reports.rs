//! Handlers de Reporting
//!
//! Este módulo expone el pipeline de analytics como endpoints JSON
//! más el export CSV del back office.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::models::{AnalyticsFilters, DashboardReport, KpiSet, ReportWindow, SeriesPoint};
use crate::services::aggregation_service::{
    compute_driver_utilisation, compute_fleet_utilisation, compute_kpis, compute_series,
    SeriesMetric, DEFAULT_BUCKET_DAYS,
};
use crate::services::export_service::{
    build_job_rows, derive_view, export_filename, filter_rows, sort_rows, to_csv, JobTableView,
    ViewState,
};
use crate::services::report_service::{ReportService, ReportSnapshot};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppResult};

pub fn create_reports_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/kpis", get(get_kpis))
        .route("/revenue-series", get(get_revenue_series))
        .route("/jobs-series", get(get_jobs_series))
        .route("/driver-utilisation", get(get_driver_utilisation))
        .route("/fleet-utilisation", get(get_fleet_utilisation))
        .route("/jobs", get(get_jobs_table))
        .route("/export", get(export_jobs_csv))
}

/// Validar filtros y resolver la ventana efectiva
fn resolve_window(state: &AppState, filters: &AnalyticsFilters) -> AppResult<(ReportWindow, i64)> {
    filters.validate()?;

    let window = filters.window_or_default(state.config.default_report_days);
    if window.start > window.end {
        return Err(bad_request_error("date_from must not be after date_to"));
    }

    Ok((window, filters.bucket_days.unwrap_or(DEFAULT_BUCKET_DAYS)))
}

async fn load_snapshot(
    state: &AppState,
    window: &ReportWindow,
) -> AppResult<ReportSnapshot> {
    ReportService::new(state.pool.clone()).load_snapshot(window).await
}

/// Reporte completo del dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<DashboardReport>> {
    let (window, bucket_days) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(ReportService::derive_dashboard(&snapshot, &window, bucket_days)))
}

/// Solo el set de KPIs
async fn get_kpis(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<KpiSet>> {
    let (window, _) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(compute_kpis(&snapshot.bookings, &snapshot.testimonials, &window)))
}

async fn get_revenue_series(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<SeriesPoint>>> {
    let (window, bucket_days) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(compute_series(
        &snapshot.bookings,
        &window,
        bucket_days,
        SeriesMetric::Revenue,
    )))
}

async fn get_jobs_series(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<SeriesPoint>>> {
    let (window, bucket_days) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(compute_series(
        &snapshot.bookings,
        &window,
        bucket_days,
        SeriesMetric::Jobs,
    )))
}

async fn get_driver_utilisation(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<impl IntoResponse> {
    let (window, _) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(compute_driver_utilisation(&snapshot.bookings, &snapshot.drivers)))
}

async fn get_fleet_utilisation(
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<impl IntoResponse> {
    let (window, _) = resolve_window(&state, &filters)?;
    let snapshot = load_snapshot(&state, &window).await?;

    Ok(Json(compute_fleet_utilisation(
        &snapshot.bookings,
        &snapshot.vehicles,
        &window,
    )))
}

/// Vista paginada de la tabla de jobs. El view-state llega completo en la
/// query string y se reemplaza en cada interacción. El fetch usa la misma
/// fecha que muestra la tabla (pickup_date), no created_at.
async fn get_jobs_table(
    State(state): State<AppState>,
    Query(view): Query<ViewState>,
) -> AppResult<Json<JobTableView>> {
    let filters = AnalyticsFilters {
        date_from: view.date_from,
        date_to: view.date_to,
        bucket_days: None,
    };
    let (window, _) = resolve_window(&state, &filters)?;
    let snapshot = ReportService::new(state.pool.clone())
        .load_jobs_snapshot(&window)
        .await?;

    let rows = build_job_rows(&snapshot.bookings, &snapshot.drivers, &snapshot.vehicles);
    Ok(Json(derive_view(&rows, &view)))
}

/// Export CSV del conjunto filtrado completo (no solo la página actual)
async fn export_jobs_csv(
    State(state): State<AppState>,
    Query(view): Query<ViewState>,
) -> AppResult<impl IntoResponse> {
    let filters = AnalyticsFilters {
        date_from: view.date_from,
        date_to: view.date_to,
        bucket_days: None,
    };
    let (window, _) = resolve_window(&state, &filters)?;
    let snapshot = ReportService::new(state.pool.clone())
        .load_jobs_snapshot(&window)
        .await?;

    let rows = build_job_rows(&snapshot.bookings, &snapshot.drivers, &snapshot.vehicles);
    let mut filtered = filter_rows(&rows, &view);
    sort_rows(&mut filtered, view.sort_by, view.sort_dir);

    let csv = to_csv(&filtered);
    let disposition = format!("attachment; filename=\"{}\"", export_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
