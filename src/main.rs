use anyhow::Result;
use axum::{
    error_handling::HandleErrorLayer, http::StatusCode, response::Json, routing::get, BoxError,
    Router,
};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tracing::{error, info};

use chauffeur_analytics::api;
use chauffeur_analytics::config::environment::EnvironmentConfig;
use chauffeur_analytics::database::DatabaseConnection;
use chauffeur_analytics::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use chauffeur_analytics::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚘 Chauffeur Analytics - Reporting API");
    info!("======================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Verificar la conexión antes de servir tráfico
    if let Err(e) = db_connection.health_check().await {
        error!("❌ Health check de la base de datos falló: {}", e);
        return Err(anyhow::anyhow!("Error de base de datos: {}", e));
    }
    info!("✅ PostgreSQL conectado y verificado");

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();

    // CORS restringido cuando hay orígenes configurados, permisivo en dev
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(api::create_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .timeout(Duration::from_secs(30)),
        )
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio y la base de datos");
    info!("📊 Endpoints de reporting:");
    info!("   GET  /api/reports/dashboard - Reporte completo del dashboard");
    info!("   GET  /api/reports/kpis - KPIs de la ventana");
    info!("   GET  /api/reports/revenue-series - Serie de revenue por periodo");
    info!("   GET  /api/reports/jobs-series - Serie de jobs por periodo");
    info!("   GET  /api/reports/driver-utilisation - Top conductores por horas");
    info!("   GET  /api/reports/fleet-utilisation - Utilización de flota");
    info!("   GET  /api/reports/jobs - Tabla de jobs filtrada/paginada");
    info!("   GET  /api/reports/export - Export CSV del conjunto filtrado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Endpoint de liveness - hace ping a la base de datos
async fn health_endpoint(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "up",
        Err(e) => {
            error!("Health check falló: {}", e);
            "down"
        }
    };

    Json(json!({
        "service": "chauffeur-analytics",
        "status": if database == "up" { "healthy" } else { "degraded" },
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
